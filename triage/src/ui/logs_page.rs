use crate::model::LogSummary;
use crate::ui::{copy, interaction_log, styles};
use serde_json::Value;
use triage_markup::prelude::*;

pub const LIST_ID: &str = "log-list";
pub const DETAIL_ID: &str = "log-detail";
const ACTIVE_CLASS: &str = "active";

/// Byte count as `B`, `KB` or `MB` with one decimal above a kilobyte.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// `2024-05-01T09:30:12.123456` becomes `2024-05-01 09:30:12`.
pub fn format_modified(raw: &str) -> String {
    let spaced = raw.replacen('T', " ", 1);
    match spaced.split_once('.') {
        Some((whole, _)) => whole.to_string(),
        None => spaced,
    }
}

/// Newest first; ISO timestamps order lexicographically.
pub fn sort_newest_first(logs: &mut [LogSummary]) {
    logs.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
}

fn log_row(summary: &LogSummary) -> Element {
    tr().attr("data-id", &summary.consultation_id)
        .child(td().class("log-id").text(&summary.consultation_id))
        .child(
            td().class("log-modified")
                .text(&format_modified(summary.modified_time.as_deref().unwrap_or_default())),
        )
        .child(
            td().class("log-size")
                .text(&summary.size.map(human_size).unwrap_or_default()),
        )
}

fn error_line(prefix: &str, message: &str) -> Element {
    p().class("load-error").text(&format!("{prefix}{message}"))
}

/// The log browser screen: a list of archived consultations and the
/// rendered trail of the selected one.
#[derive(Debug, Clone)]
pub struct LogsPage {
    list: Element,
    detail: Element,
    theme: Theme,
}

impl LogsPage {
    pub fn new(theme: Theme) -> Self {
        Self {
            list: div().id(LIST_ID).class("log-list"),
            detail: div()
                .id(DETAIL_ID)
                .class("log-detail")
                .child(p().class("log-placeholder").text(copy::LOG_DETAIL_HINT)),
            theme,
        }
    }

    pub fn list(&self) -> &Element {
        &self.list
    }

    pub fn detail(&self) -> &Element {
        &self.detail
    }

    pub fn show_list(&mut self, mut logs: Vec<LogSummary>) {
        self.list.clear();
        if logs.is_empty() {
            self.list
                .push(p().class("log-placeholder").text(copy::LOG_LIST_EMPTY));
            return;
        }

        sort_newest_first(&mut logs);
        let header = tr()
            .child(th().text(copy::LOG_ID_COLUMN))
            .child(th().text(copy::LOG_TIME_COLUMN))
            .child(th().text(copy::LOG_SIZE_COLUMN));
        self.list.push(
            table()
                .class("log-table")
                .child(header)
                .children_from(logs.iter().map(log_row)),
        );
    }

    pub fn show_list_error(&mut self, message: &str) {
        self.list.clear();
        self.list.push(error_line(copy::LOG_LIST_FAILED, message));
    }

    /// Highlights the row of `consultation_id` and clears any other mark.
    pub fn select(&mut self, consultation_id: &str) {
        let Some(table) = self.list.find_by_class_mut("log-table") else {
            return;
        };
        for row in table.children_mut() {
            let selected = row.attribute("data-id") == Some(consultation_id);
            row.toggle_class(ACTIVE_CLASS, selected);
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.list
            .find_by_class(ACTIVE_CLASS)
            .and_then(|row| row.attribute("data-id"))
    }

    pub fn show_detail(&mut self, consultation_id: &str, events: Option<&Value>) {
        self.select(consultation_id);
        self.detail.clear();
        self.detail.push(h3().text(consultation_id));
        self.detail.push(
            div()
                .class("interaction-log")
                .children_from(interaction_log::render_entries(events)),
        );
    }

    pub fn show_detail_error(&mut self, consultation_id: &str, message: &str) {
        self.select(consultation_id);
        self.detail.clear();
        self.detail.push(h3().text(consultation_id));
        self.detail.push(error_line(copy::LOG_DETAIL_FAILED, message));
    }

    pub fn body(&self) -> Element {
        div()
            .id("app")
            .child(header().child(h1().text(copy::LOGS_PAGE_TITLE)))
            .child(
                div()
                    .class("logs-layout")
                    .child(
                        section()
                            .class("log-list-panel")
                            .child(h4().text(copy::LOG_LIST_HEADING))
                            .child(self.list.clone()),
                    )
                    .child(section().class("log-detail-panel").child(self.detail.clone())),
            )
    }

    pub fn render_html(&self) -> anyhow::Result<String> {
        PageBuilder::new()
            .title(copy::LOGS_PAGE_TITLE)
            .lang(copy::PAGE_LANG)
            .stylesheet(styles::stylesheet(self.theme, styles::logs_rules()))
            .content(self.body())
            .build()
    }
}
