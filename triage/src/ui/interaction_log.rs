//! Audit trail formatting shared by the chat page, the logs page and the
//! terminal.

use crate::model::InteractionEvent;
use crate::ui::copy;
use serde_json::Value;
use tracing::warn;
use triage_markup::prelude::*;

const DETAIL_PRIORITY: [&str; 5] = [
    "status_description",
    "status",
    "error",
    "message_snippet",
    "request_type",
];
const RAW_DETAILS_LIMIT: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Entry { time: String, text: String },
    Broken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRender {
    Placeholder(&'static str),
    Lines(Vec<LogLine>),
}

/// Generic error events without a message carry no information.
pub fn is_noise(event: &Value) -> bool {
    let field = |key: &str| event.get(key).and_then(Value::as_str);
    if field("source") != Some("System") || field("action") != Some("错误") {
        return false;
    }
    match event.get("details").and_then(|d| d.get("message")) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

pub fn format_timestamp(raw: &str) -> String {
    match raw.split_once('T') {
        Some((_, time)) => time.trim_end_matches('Z').to_string(),
        None => raw.to_string(),
    }
}

/// Wording the backend uses for its status codes.
pub fn describe_status(code: &str) -> Option<&'static str> {
    let text = match code {
        "in_consultation" => "问诊进行中",
        "diagnosis_complete" => "诊断已完成",
        "approved" => "处方已通过",
        "rejected" => "处方未通过",
        "info_provided" => "已提供用药信息",
        "interactions_found" => "发现药物相互作用",
        "no_interactions_found" => "无药物相互作用",
        "in_progress" => "接待进行中",
        "completed" => "接待完成",
        "error" => "出现错误",
        "success" => "成功",
        "unhandled" => "未处理",
        _ => return None,
    };
    Some(text)
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text.chars().take(limit).collect();
    format!("{head}...")
}

fn scalar_text(value: &Value) -> Option<String> {
    Some(value_text(value)).filter(|text| !text.trim().is_empty())
}

pub fn detail_text(details: Option<&Value>) -> Option<String> {
    let details = details?;
    let map = match details {
        Value::Null => return None,
        Value::String(s) => return (!s.trim().is_empty()).then(|| s.clone()),
        Value::Object(map) if map.is_empty() => return None,
        Value::Object(map) => map,
        other => return Some(truncate(&value_text(other), RAW_DETAILS_LIMIT)),
    };

    for key in DETAIL_PRIORITY {
        let Some(text) = map.get(key).and_then(scalar_text) else {
            continue;
        };
        if key == "status" {
            return Some(describe_status(&text).map(str::to_string).unwrap_or(text));
        }
        return Some(text);
    }

    Some(truncate(&value_text(details), RAW_DETAILS_LIMIT))
}

pub fn display_text(event: &InteractionEvent) -> String {
    let details = detail_text(event.details.as_ref());

    if let Some(readable) = event.human_readable.as_deref().filter(|h| !h.trim().is_empty()) {
        return match details {
            Some(d) if !readable.contains(&d) => format!("{readable}（{d}）"),
            _ => readable.to_string(),
        };
    }

    let mut text = if event.target().is_empty() {
        format!("{} {}", event.source(), event.action())
    } else {
        format!("{} → {} {}", event.source(), event.target(), event.action())
    };
    if let Some(d) = details {
        text.push_str(&format!("（{d}）"));
    }
    text
}

fn line_for(event: &Value) -> LogLine {
    match serde_json::from_value::<InteractionEvent>(event.clone()) {
        Ok(event) => LogLine::Entry {
            time: format_timestamp(event.timestamp()),
            text: display_text(&event),
        },
        Err(err) => {
            warn!(error = %err, "unreadable interaction log entry");
            LogLine::Broken
        }
    }
}

pub fn prepare(events: Option<&Value>) -> LogRender {
    let events = match events {
        None | Some(Value::Null) => return LogRender::Placeholder(copy::LOG_EMPTY),
        Some(Value::Array(events)) => events,
        Some(_) => return LogRender::Placeholder(copy::LOG_INVALID),
    };
    if events.is_empty() {
        return LogRender::Placeholder(copy::LOG_EMPTY);
    }

    let lines = events
        .iter()
        .filter(|e| !is_noise(e))
        .map(line_for)
        .collect::<Vec<_>>();
    if lines.is_empty() {
        return LogRender::Placeholder(copy::LOG_ALL_FILTERED);
    }
    LogRender::Lines(lines)
}

pub fn render_entries(events: Option<&Value>) -> Vec<Element> {
    match prepare(events) {
        LogRender::Placeholder(text) => vec![p().class("log-placeholder").text(text)],
        LogRender::Lines(lines) => lines
            .into_iter()
            .map(|line| match line {
                LogLine::Entry { time, text } => div()
                    .class("log-entry")
                    .child(span().class("log-time").raw_html(&escape_html(&time)))
                    .child(span().class("log-text").raw_html(&escape_html(&text))),
                LogLine::Broken => div()
                    .class("log-entry")
                    .class("log-error")
                    .text(copy::LOG_ENTRY_BROKEN),
            })
            .collect(),
    }
}
