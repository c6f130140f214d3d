use serde_json::json;
use triage::model::Role;
use triage::ui::{ConsultationView, TerminalView, copy};

fn printed(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).unwrap()
}

#[test]
fn input_state_tracks_placeholder_and_prompt() {
    let mut view = TerminalView::new(Vec::new());
    assert!(!view.is_input_enabled());
    assert!(view.prompt().is_none());
    assert_eq!(view.placeholder(), copy::PLACEHOLDER_WAIT);

    view.set_input_enabled(true);
    assert!(view.prompt().is_some());
    assert_eq!(view.placeholder(), copy::PLACEHOLDER_READY);
}

#[test]
fn messages_keep_every_line() {
    let mut view = TerminalView::new(Vec::new());
    view.append_message(Role::Doctor, "第一行\n第二行", false);
    let out = printed(view);
    assert!(out.contains("第一行"));
    assert!(out.contains("    第二行"));
}

#[test]
fn loading_line_is_cleared_in_place() {
    let mut view = TerminalView::new(Vec::new());
    view.append_message(Role::System, copy::THINKING, true);
    view.remove_last_message();
    view.append_message(Role::Doctor, "好的", false);

    let out = printed(view);
    let thinking = out.find(copy::THINKING).unwrap();
    let reply = out.find("好的").unwrap();
    assert!(thinking < reply);
    // Clear line sequence from crossterm.
    assert!(out.contains("\x1b[2K"));
}

#[test]
fn no_prescription_notice_is_printed_once() {
    let mut view = TerminalView::new(Vec::new());
    view.display_prescription(None);
    view.display_prescription(Some(&json!({"medications": []})));
    let out = printed(view);
    assert_eq!(out.matches(copy::NO_PRESCRIPTION).count(), 1);
}

#[test]
fn prescription_lists_medications() {
    let mut view = TerminalView::new(Vec::new());
    view.display_prescription(Some(&json!({
        "medications": [{"name": "布洛芬", "dosage": "200mg", "frequency": "每日两次"}],
        "notes": "饭后服用",
        "pharmacist_notes": 1
    })));
    let out = printed(view);
    assert!(out.contains("布洛芬"));
    assert!(out.contains("每日两次"));
    assert!(out.contains("饭后服用"));
    assert!(
        out.lines()
            .any(|l| l.contains(copy::PHARMACIST_NOTES_LABEL) && l.trim_end().ends_with('1'))
    );
}

#[test]
fn interaction_log_is_opt_in() {
    let events = json!([{"timestamp": "2024-05-01T10:00:00", "source": "Doctor", "action": "诊断"}]);

    let mut quiet = TerminalView::new(Vec::new());
    quiet.display_interaction_log(Some(&events));
    assert!(printed(quiet).is_empty());

    let mut loud = TerminalView::new(Vec::new()).with_log(true);
    loud.display_interaction_log(Some(&events));
    let out = printed(loud);
    assert!(out.contains(copy::LOG_HEADING));
    assert!(out.contains("Doctor 诊断"));
}

#[test]
fn only_distinct_hints_are_printed() {
    let mut view = TerminalView::new(Vec::new());
    view.set_placeholder(copy::PLACEHOLDER_READY);
    view.set_placeholder(copy::PLACEHOLDER_ENDED);
    view.set_placeholder(copy::PLACEHOLDER_ENDED);
    assert_eq!(view.placeholder(), copy::PLACEHOLDER_ENDED);
    let out = printed(view);
    assert_eq!(out.matches(copy::PLACEHOLDER_ENDED).count(), 1);
    assert!(!out.contains(copy::PLACEHOLDER_READY));
}
