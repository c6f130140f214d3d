use crate::ui::copy;
use std::time::{Duration, Instant};
use triage_markup::Element;

pub const DISABLED_CLASS: &str = "input-disabled";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

const LINE_HEIGHT_PX: u32 = 24;
const PADDING_PX: u32 = 20;
pub const MIN_HEIGHT_PX: u32 = 44;
pub const MAX_HEIGHT_PX: u32 = 160;
const CHARS_PER_LINE: usize = 48;

/// Height the textarea needs to show `text` without scrolling, clamped to
/// the allowed range.
pub fn scroll_height(text: &str) -> u32 {
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(CHARS_PER_LINE).max(1))
        .sum();
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    rows.saturating_mul(LINE_HEIGHT_PX)
        .saturating_add(PADDING_PX)
        .clamp(MIN_HEIGHT_PX, MAX_HEIGHT_PX)
}

pub fn set_height(textarea: &mut Element, px: u32) {
    textarea.set_attr("style", &format!("height: {px}px"));
}

pub fn fit_height(textarea: &mut Element) {
    let px = scroll_height(&textarea.text_content());
    set_height(textarea, px);
}

/// Toggles the reply box. `container` holds the textarea and the send
/// button; both are looked up by id.
pub fn set_input_enabled(
    container: &mut Element,
    textarea_id: &str,
    button_id: &str,
    enabled: bool,
) {
    container.toggle_class(DISABLED_CLASS, !enabled);

    if let Some(button) = container.find_by_id_mut(button_id) {
        if enabled {
            button.remove_attr("disabled");
        } else {
            button.set_attr("disabled", "disabled");
        }
    }

    let Some(textarea) = container.find_by_id_mut(textarea_id) else {
        return;
    };
    if enabled {
        textarea.remove_attr("disabled");
        textarea.set_attr("placeholder", copy::PLACEHOLDER_READY);
        fit_height(textarea);
    } else {
        textarea.set_attr("disabled", "disabled");
        textarea.set_attr("placeholder", copy::PLACEHOLDER_WAIT);
        set_height(textarea, MIN_HEIGHT_PX);
    }
}

/// Debounces resize requests coming from input and focus events.
#[derive(Debug, Clone)]
pub struct AutoResize {
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl Default for AutoResize {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl AutoResize {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending_since: None,
        }
    }

    /// Records an input or focus event; a burst of events keeps pushing the
    /// deadline out.
    pub fn schedule(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True once the quiet period after the last event has elapsed; the
    /// pending request is consumed.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}
