//! The consultation page as an element tree.
//!
//! [`Page`] is the in-memory screen the session controller drives. It can be
//! rendered to a standalone HTML document at any point, which is how the chat
//! command writes snapshots.

use crate::model::Role;
use crate::ui::input::{self, AutoResize};
use crate::ui::view::ConsultationView;
use crate::ui::{copy, interaction_log, messages, results, styles};
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error};
use triage_markup::prelude::*;

pub const TRANSCRIPT_ID: &str = "chat-messages";
pub const RESULT_PANEL_ID: &str = "result-panel";
pub const LOG_ID: &str = "interaction-log";
pub const INPUT_AREA_ID: &str = "input-area";
pub const TEXTAREA_ID: &str = "user-input";
pub const SEND_BUTTON_ID: &str = "send-button";

const REQUIRED_REGIONS: [&str; 6] = [
    TRANSCRIPT_ID,
    RESULT_PANEL_ID,
    LOG_ID,
    INPUT_AREA_ID,
    TEXTAREA_ID,
    SEND_BUTTON_ID,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("page shell lacks required regions: {}", .0.join(", "))]
    MissingRegions(Vec<&'static str>),
}

/// Checks that `shell` carries every region the view operations touch.
pub fn check_shell(shell: &Element) -> Result<(), MountError> {
    let missing = REQUIRED_REGIONS
        .into_iter()
        .filter(|id| shell.find_by_id(id).is_none())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MountError::MissingRegions(missing))
    }
}

/// Where the page last asked the viewport to scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    TranscriptBottom,
    ResultPanel,
}

pub fn default_shell() -> Element {
    let input_area = div()
        .id(INPUT_AREA_ID)
        .class("input-area")
        .child(
            textarea()
                .id(TEXTAREA_ID)
                .attr("rows", "1")
                .attr("placeholder", copy::PLACEHOLDER_WAIT),
        )
        .child(
            button()
                .id(SEND_BUTTON_ID)
                .attr("type", "button")
                .text(copy::SEND),
        );

    div()
        .id("app")
        .child(header().child(h1().text(copy::PAGE_TITLE)))
        .child(
            div()
                .class("layout")
                .child(
                    section()
                        .class("chat-panel")
                        .child(div().id(TRANSCRIPT_ID).class("chat-messages"))
                        .child(input_area),
                )
                .child(
                    section()
                        .class("side-panel")
                        .child(
                            section()
                                .id(RESULT_PANEL_ID)
                                .class("result-panel")
                                .class(results::HIDDEN_CLASS),
                        )
                        .child(
                            section()
                                .class("log-panel")
                                .child(h4().text(copy::LOG_HEADING))
                                .child(div().id(LOG_ID).class("interaction-log")),
                        ),
                ),
        )
}

#[derive(Debug, Clone)]
pub struct Page {
    shell: Element,
    missing: Vec<&'static str>,
    theme: Theme,
    scroll: Option<ScrollTarget>,
    auto_resize: AutoResize,
}

impl Page {
    pub fn new(theme: Theme) -> Self {
        Self::mount(default_shell(), theme)
    }

    /// Attaches to an existing shell. A shell without every required region
    /// yields a broken page: it renders only an error block and ignores all
    /// view operations.
    pub fn mount(shell: Element, theme: Theme) -> Self {
        let missing = match check_shell(&shell) {
            Ok(()) => Vec::new(),
            Err(err) => {
                error!(error = %err, "mounting broken page");
                let MountError::MissingRegions(missing) = err;
                missing
            }
        };

        let mut page = Self {
            shell,
            missing,
            theme,
            scroll: None,
            auto_resize: AutoResize::default(),
        };
        page.set_input_enabled(false);
        page
    }

    pub fn is_broken(&self) -> bool {
        !self.missing.is_empty()
    }

    pub fn missing_regions(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn region(&self, id: &str) -> Option<&Element> {
        if self.is_broken() {
            return None;
        }
        self.shell.find_by_id(id)
    }

    fn region_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.is_broken() {
            return None;
        }
        self.shell.find_by_id_mut(id)
    }

    pub fn transcript(&self) -> Option<&Element> {
        self.region(TRANSCRIPT_ID)
    }

    pub fn result_panel(&self) -> Option<&Element> {
        self.region(RESULT_PANEL_ID)
    }

    pub fn interaction_log(&self) -> Option<&Element> {
        self.region(LOG_ID)
    }

    pub fn textarea(&self) -> Option<&Element> {
        self.region(TEXTAREA_ID)
    }

    pub fn send_button(&self) -> Option<&Element> {
        self.region(SEND_BUTTON_ID)
    }

    pub fn transcript_len(&self) -> usize {
        self.transcript().map_or(0, |t| t.children().len())
    }

    pub fn is_input_enabled(&self) -> bool {
        self.textarea()
            .is_some_and(|t| t.attribute("disabled").is_none())
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.textarea().and_then(|t| t.attribute("placeholder"))
    }

    /// Current textarea height in pixels, read back from its style.
    pub fn input_height(&self) -> Option<u32> {
        self.textarea()
            .and_then(|t| t.attribute("style"))
            .and_then(|s| s.strip_prefix("height: "))
            .and_then(|s| s.strip_suffix("px"))
            .and_then(|s| s.parse().ok())
    }

    pub fn scroll_target(&self) -> Option<ScrollTarget> {
        self.scroll
    }

    /// Replaces the textarea content, as a keystroke would. The height is
    /// refitted once typing pauses, see [`Page::tick`].
    pub fn type_input(&mut self, text: &str, now: Instant) {
        if !self.is_input_enabled() {
            return;
        }
        let Some(area) = self.region_mut(TEXTAREA_ID) else {
            return;
        };
        area.set_text(text);
        self.auto_resize.schedule(now);
    }

    pub fn focus_input(&mut self, now: Instant) {
        if self.is_input_enabled() {
            self.auto_resize.schedule(now);
        }
    }

    /// Applies a pending resize once the debounce interval has passed.
    /// Returns true when the height was refitted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.auto_resize.due(now) {
            return false;
        }
        match self.region_mut(TEXTAREA_ID) {
            Some(area) => {
                input::fit_height(area);
                true
            }
            None => false,
        }
    }

    /// Takes the typed text out of the textarea, leaving it empty.
    pub fn take_input(&mut self) -> String {
        let Some(area) = self.region_mut(TEXTAREA_ID) else {
            return String::new();
        };
        let text = area.text_content();
        area.set_text("");
        input::set_height(area, input::MIN_HEIGHT_PX);
        text
    }

    pub fn body(&self) -> Element {
        if self.is_broken() {
            return div()
                .class("fatal-error")
                .text(&format!("{}{}", copy::PAGE_BROKEN, self.missing.join(", ")));
        }
        self.shell.clone()
    }

    pub fn render_html(&self) -> anyhow::Result<String> {
        PageBuilder::new()
            .title(copy::PAGE_TITLE)
            .lang(copy::PAGE_LANG)
            .stylesheet(styles::stylesheet(self.theme, styles::chat_rules()))
            .content(self.body())
            .build()
    }
}

impl ConsultationView for Page {
    fn append_message(&mut self, role: Role, message: &str, is_loading: bool) {
        let Some(transcript) = self.region_mut(TRANSCRIPT_ID) else {
            return;
        };
        messages::append_message(transcript, role, message, is_loading);
        self.scroll = Some(ScrollTarget::TranscriptBottom);
    }

    fn remove_last_message(&mut self) {
        if let Some(transcript) = self.region_mut(TRANSCRIPT_ID) {
            messages::remove_last_message(transcript);
        }
    }

    fn display_diagnosis_info(&mut self, info: Option<&Value>) {
        let Some(panel) = self.region_mut(RESULT_PANEL_ID) else {
            return;
        };
        if results::display_diagnosis_info(panel, info) {
            self.scroll = Some(ScrollTarget::ResultPanel);
        } else {
            debug!("diagnosis payload without a condition, panel unchanged");
        }
    }

    fn display_prescription(&mut self, prescription: Option<&Value>) {
        let Some(panel) = self.region_mut(RESULT_PANEL_ID) else {
            return;
        };
        if results::display_prescription(panel, prescription) {
            self.scroll = Some(ScrollTarget::ResultPanel);
        }
    }

    fn display_interaction_log(&mut self, events: Option<&Value>) {
        if let Some(log) = self.region_mut(LOG_ID) {
            log.replace_children(interaction_log::render_entries(events));
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if let Some(area) = self.region_mut(INPUT_AREA_ID) {
            input::set_input_enabled(area, TEXTAREA_ID, SEND_BUTTON_ID, enabled);
        }
        if !enabled {
            self.auto_resize = AutoResize::default();
        }
    }

    fn set_placeholder(&mut self, text: &str) {
        if let Some(area) = self.region_mut(TEXTAREA_ID) {
            area.set_attr("placeholder", text);
        }
    }
}
