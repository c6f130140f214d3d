use serde_json::json;
use std::time::{Duration, Instant};
use triage::model::Role;
use triage::ui::copy;
use triage::ui::page::{MountError, RESULT_PANEL_ID, ScrollTarget, check_shell, default_shell};
use triage::ui::{ConsultationView, Page};
use triage_markup::prelude::*;

#[test]
fn fresh_page_waits_for_the_consultation() {
    let page = Page::new(Theme::Light);
    assert!(!page.is_broken());
    assert!(!page.is_input_enabled());
    assert_eq!(page.placeholder(), Some(copy::PLACEHOLDER_WAIT));
    assert_eq!(page.transcript_len(), 0);
    assert!(page.result_panel().unwrap().has_class("hidden"));
    assert!(page.send_button().unwrap().attribute("disabled").is_some());
    assert_eq!(page.scroll_target(), None);
}

#[test]
fn default_shell_has_every_region() {
    assert_eq!(check_shell(&default_shell()), Ok(()));
}

#[test]
fn shell_without_regions_mounts_broken() {
    let shell = div().child(div().id("chat-messages"));
    assert!(matches!(
        check_shell(&shell),
        Err(MountError::MissingRegions(missing)) if missing.contains(&RESULT_PANEL_ID)
    ));

    let mut page = Page::mount(shell, Theme::Light);
    assert!(page.is_broken());
    assert!(page.missing_regions().contains(&"user-input"));

    page.append_message(Role::Doctor, "你好", false);
    page.set_input_enabled(true);
    assert_eq!(page.transcript_len(), 0);
    assert!(!page.is_input_enabled());

    let html = page.render_html().unwrap();
    assert!(html.contains(copy::PAGE_BROKEN));
    assert!(html.contains("fatal-error"));
    assert!(!html.contains("你好"));
}

#[test]
fn scroll_follows_the_latest_output() {
    let mut page = Page::new(Theme::Light);
    page.append_message(Role::Receptionist, "您好", false);
    assert_eq!(page.scroll_target(), Some(ScrollTarget::TranscriptBottom));

    page.display_diagnosis_info(Some(&json!({"condition": "感冒"})));
    assert_eq!(page.scroll_target(), Some(ScrollTarget::ResultPanel));
    assert!(!page.result_panel().unwrap().has_class("hidden"));
}

#[test]
fn typing_resizes_after_a_pause() {
    let t0 = Instant::now();
    let mut page = Page::new(Theme::Light);

    page.type_input("ignored while disabled", t0);
    assert_eq!(page.textarea().unwrap().text_content(), "");

    page.set_input_enabled(true);
    page.type_input("一\n二\n三", t0);
    assert!(!page.tick(t0 + Duration::from_millis(10)));
    assert!(page.tick(t0 + Duration::from_millis(100)));
    assert_eq!(page.input_height(), Some(3 * 24 + 20));

    assert_eq!(page.take_input(), "一\n二\n三");
    assert_eq!(page.textarea().unwrap().text_content(), "");
}

#[test]
fn interaction_log_area_shows_placeholder() {
    let mut page = Page::new(Theme::Light);
    page.display_interaction_log(Some(&json!([])));
    assert!(page.interaction_log().unwrap().text_content().contains(copy::LOG_EMPTY));
}

#[test]
fn rendered_page_is_safe_and_themed() {
    let mut page = Page::new(Theme::Dark);
    page.append_message(Role::Patient, "<script>alert(1)</script>", false);

    let html = page.render_html().unwrap();
    assert!(html.contains("<html lang=\"zh-CN\">"));
    assert!(html.contains(copy::PAGE_TITLE));
    assert!(html.contains("#0b1320"));
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("id=\"chat-messages\""));
}

#[test]
fn focus_schedules_a_resize_only_when_enabled() {
    let t0 = Instant::now();
    let mut page = Page::new(Theme::Light);
    page.focus_input(t0);
    assert!(!page.tick(t0 + Duration::from_millis(200)));

    page.set_input_enabled(true);
    page.focus_input(t0);
    assert!(!page.tick(t0 + Duration::from_millis(50)));
    assert!(page.tick(t0 + Duration::from_millis(150)));
    assert_eq!(page.input_height(), Some(44));
}
