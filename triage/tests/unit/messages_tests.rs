use triage::model::Role;
use triage::ui::messages::{append_message, is_loading_bubble, message_bubble, remove_last_message};
use triage_markup::prelude::*;

#[test]
fn loading_then_remove_restores_length() {
    let mut transcript = div();
    append_message(&mut transcript, Role::Receptionist, "您好", false);
    append_message(&mut transcript, Role::System, "正在处理...", true);
    assert_eq!(transcript.children().len(), 2);

    assert!(remove_last_message(&mut transcript));
    assert_eq!(transcript.children().len(), 1);
}

#[test]
fn remove_never_touches_real_messages() {
    let mut transcript = div();
    append_message(&mut transcript, Role::Doctor, "请描述症状", false);
    assert!(!remove_last_message(&mut transcript));
    assert_eq!(transcript.children().len(), 1);

    let mut empty = div();
    assert!(!remove_last_message(&mut empty));
}

#[test]
fn at_most_one_loading_bubble() {
    let mut transcript = div();
    append_message(&mut transcript, Role::System, "a", true);
    append_message(&mut transcript, Role::System, "b", true);
    let loading = transcript
        .children()
        .iter()
        .filter(|c| is_loading_bubble(c))
        .count();
    assert_eq!(loading, 1);
    assert!(transcript.last_child().is_some_and(is_loading_bubble));
}

#[test]
fn message_is_escaped_before_line_breaks() {
    let html = message_bubble(Role::Doctor, "<b>注意</b>\n多休息", false).render();
    assert!(html.contains("&lt;b&gt;注意&lt;/b&gt;<br>多休息"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("class=\"message doctor-message\""));
}

#[test]
fn loading_bubble_keeps_newlines_and_has_spinner() {
    let bubble = message_bubble(Role::System, "稍候\n<i>", true);
    assert!(is_loading_bubble(&bubble));
    assert!(bubble.has_class("loading"));
    let html = bubble.render();
    assert!(!html.contains("<br>"));
    assert!(html.contains("&lt;i&gt;"));
}

#[test]
fn avatar_glyphs() {
    let unknown = message_bubble(Role::Unknown, "x", false);
    let avatar = unknown.find_by_class("avatar").unwrap();
    assert_eq!(avatar.text_content(), "?");
    assert!(unknown.has_class("unknown-message"));
}
