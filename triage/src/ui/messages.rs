use crate::model::Role;
use triage_markup::prelude::*;

/// Marks a bubble as a loading placeholder.
pub const SPINNER_CLASS: &str = "spinner";

pub fn message_bubble(role: Role, message: &str, is_loading: bool) -> Element {
    let body = if is_loading {
        div()
            .class("message-content")
            .child(span().class(SPINNER_CLASS))
            .child(span().raw_html(&escape_html(message)))
    } else {
        div()
            .class("message-content")
            .raw_html(&escape_multiline(message))
    };

    let mut bubble = div()
        .class("message")
        .class(&format!("{}-message", role.as_ref()))
        .child(div().class("avatar").text(role.avatar()))
        .child(body);
    if is_loading {
        bubble.add_class("loading");
    }
    bubble
}

pub fn is_loading_bubble(el: &Element) -> bool {
    el.contains_class(SPINNER_CLASS)
}

/// Appends a bubble to the transcript. A new loading bubble replaces a
/// trailing one so there is never more than one placeholder.
pub fn append_message(transcript: &mut Element, role: Role, message: &str, is_loading: bool) {
    if is_loading {
        remove_last_message(transcript);
    }
    transcript.push(message_bubble(role, message, is_loading));
}

/// Removes the last bubble if it is a loading placeholder; real messages are
/// never touched.
pub fn remove_last_message(transcript: &mut Element) -> bool {
    if transcript.last_child().is_some_and(is_loading_bubble) {
        transcript.pop();
        return true;
    }
    false
}
