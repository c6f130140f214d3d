use triage_markup::prelude::*;

pub fn stylesheet(theme: Theme, rules: Vec<CssRule>) -> String {
    let mut all = vec![theme.palette()];
    all.extend(shared_rules());
    all.extend(rules);
    render_rules(&all)
}

fn shared_rules() -> Vec<CssRule> {
    vec![
        CssRule::new("*").property("box-sizing", "border-box"),
        CssRule::new("body")
            .property("margin", "0")
            .property("font-family", "\"PingFang SC\", \"Microsoft YaHei\", sans-serif")
            .property("color", "var(--ink)")
            .property("background", "var(--bg)"),
        CssRule::new("header")
            .property("padding", "0.75rem 1.25rem")
            .property("border-bottom", "1px solid var(--line)")
            .property("background", "var(--panel)"),
        CssRule::new("h1").property("margin", "0").property("font-size", "1.2rem"),
        CssRule::new(".hidden").property("display", "none"),
        CssRule::new(".fatal-error")
            .property("margin", "2rem")
            .property("padding", "1rem")
            .property("border", "1px solid var(--bad)")
            .property("color", "var(--bad)"),
    ]
}

pub fn chat_rules() -> Vec<CssRule> {
    vec![
        CssRule::new(".layout")
            .property("display", "grid")
            .property("grid-template-columns", "minmax(0, 1fr) 380px")
            .property("gap", "1rem")
            .property("padding", "1rem"),
        CssRule::new(".chat-messages")
            .property("height", "60vh")
            .property("overflow-y", "auto")
            .property("padding", "0.5rem"),
        CssRule::new(".message")
            .property("display", "flex")
            .property("gap", "0.5rem")
            .property("margin-bottom", "0.75rem")
            .child(
                CssRule::new(".avatar")
                    .property("width", "2rem")
                    .property("height", "2rem")
                    .property("border-radius", "50%")
                    .property("text-align", "center")
                    .property("line-height", "2rem")
                    .property("background", "var(--line)"),
            ),
        CssRule::new(".patient-message").property("flex-direction", "row-reverse"),
        CssRule::new(".message-content")
            .property("padding", "0.5rem 0.75rem")
            .property("border-radius", "8px")
            .property("background", "var(--panel)"),
        CssRule::new(".spinner")
            .property("display", "inline-block")
            .property("width", "0.8rem")
            .property("height", "0.8rem")
            .property("margin-right", "0.4rem")
            .property("border", "2px solid var(--muted)")
            .property("border-top-color", "transparent")
            .property("border-radius", "50%"),
        CssRule::new(".input-area")
            .property("display", "flex")
            .property("gap", "0.5rem")
            .property("margin-top", "0.5rem"),
        CssRule::new(".input-area textarea")
            .property("flex", "1")
            .property("resize", "none"),
        CssRule::new(".input-disabled").property("opacity", "0.6"),
        CssRule::new(".result-panel, .log-panel")
            .property("padding", "1rem")
            .property("margin-bottom", "1rem")
            .property("border", "1px solid var(--line)")
            .property("border-radius", "8px")
            .property("background", "var(--panel)"),
        CssRule::new(".no-prescription").property("color", "var(--muted)"),
        CssRule::new(".log-entry")
            .property("font-size", "0.85rem")
            .property("padding", "0.2rem 0"),
        CssRule::new(".log-time")
            .property("color", "var(--muted)")
            .property("margin-right", "0.5rem"),
        CssRule::new(".log-error").property("color", "var(--bad)"),
    ]
}

pub fn logs_rules() -> Vec<CssRule> {
    vec![
        CssRule::new(".logs-layout")
            .property("display", "grid")
            .property("grid-template-columns", "420px minmax(0, 1fr)")
            .property("gap", "1rem")
            .property("padding", "1rem"),
        CssRule::new(".log-table")
            .property("width", "100%")
            .property("border-collapse", "collapse"),
        CssRule::new(".log-table td, .log-table th")
            .property("padding", "0.3rem 0.5rem")
            .property("border-bottom", "1px solid var(--line)")
            .property("text-align", "left"),
        CssRule::new(".log-table tr.active").property("background", "var(--line)"),
        CssRule::new(".log-entry")
            .property("font-size", "0.85rem")
            .property("padding", "0.2rem 0"),
        CssRule::new(".log-time")
            .property("color", "var(--muted)")
            .property("margin-right", "0.5rem"),
        CssRule::new(".log-error, .load-error").property("color", "var(--bad)"),
    ]
}
