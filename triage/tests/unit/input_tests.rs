use std::time::{Duration, Instant};
use triage::ui::copy;
use triage::ui::input::{
    AutoResize, DISABLED_CLASS, MAX_HEIGHT_PX, MIN_HEIGHT_PX, scroll_height, set_input_enabled,
};
use triage_markup::prelude::*;

fn input_area() -> Element {
    div()
        .id("area")
        .child(textarea().id("box"))
        .child(button().id("send"))
}

#[test]
fn scroll_height_is_clamped() {
    assert_eq!(scroll_height(""), MIN_HEIGHT_PX);
    assert_eq!(scroll_height("一\n二\n三"), 3 * 24 + 20);
    assert_eq!(scroll_height(&"行\n".repeat(40)), MAX_HEIGHT_PX);
}

#[test]
fn long_lines_wrap() {
    let one_line = "a".repeat(48);
    let two_lines = "a".repeat(49);
    assert!(scroll_height(&two_lines) > scroll_height(&one_line));
}

#[test]
fn disabling_locks_both_controls() {
    let mut area = input_area();
    set_input_enabled(&mut area, "box", "send", false);

    assert!(area.has_class(DISABLED_CLASS));
    let textarea = area.find_by_id("box").unwrap();
    assert!(textarea.attribute("disabled").is_some());
    assert_eq!(textarea.attribute("placeholder"), Some(copy::PLACEHOLDER_WAIT));
    assert_eq!(
        textarea.attribute("style"),
        Some(format!("height: {MIN_HEIGHT_PX}px").as_str())
    );
    assert!(area.find_by_id("send").unwrap().attribute("disabled").is_some());
}

#[test]
fn enabling_resets_placeholder() {
    let mut area = input_area();
    set_input_enabled(&mut area, "box", "send", false);
    set_input_enabled(&mut area, "box", "send", true);

    assert!(!area.has_class(DISABLED_CLASS));
    let textarea = area.find_by_id("box").unwrap();
    assert!(textarea.attribute("disabled").is_none());
    assert_eq!(textarea.attribute("placeholder"), Some(copy::PLACEHOLDER_READY));
    assert!(area.find_by_id("send").unwrap().attribute("disabled").is_none());
}

#[test]
fn resize_is_debounced() {
    let t0 = Instant::now();
    let mut resize = AutoResize::new(Duration::from_millis(100));
    assert!(!resize.due(t0));

    resize.schedule(t0);
    assert!(!resize.due(t0 + Duration::from_millis(50)));
    resize.schedule(t0 + Duration::from_millis(50));
    assert!(!resize.due(t0 + Duration::from_millis(120)));
    assert!(resize.due(t0 + Duration::from_millis(150)));
    assert!(!resize.is_pending());
    assert!(!resize.due(t0 + Duration::from_millis(400)));
}
