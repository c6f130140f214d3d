use triage_markup::prelude::*;

#[test]
fn builds_pretty_printed_page() {
    let html = PageBuilder::new()
        .title("Chat <1>")
        .lang("zh-CN")
        .stylesheet(render_rules(&[CssRule::new(".a > .b").property("color", "red")]))
        .content(div().id("app").child(p().text("hello & bye")))
        .build()
        .expect("page builds");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"zh-CN\">"));
    assert!(html.contains("Chat &lt;1&gt;"));
    assert!(html.contains("hello &amp; bye"));
    // stylesheet content is raw text, selectors survive untouched
    assert!(html.contains(".a > .b {"));
}

#[test]
fn reparsed_text_stays_escaped() {
    let html = PageBuilder::new()
        .content(div().text("<script>alert(1)</script>"))
        .build()
        .expect("page builds");

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn theme_parses_case_insensitively() {
    assert_eq!("Dark".parse::<Theme>().ok(), Some(Theme::Dark));
    assert_eq!(Theme::Light.to_string(), "light");
    assert!(Theme::Dark.palette().render().contains("--bg: #0b1320;"));
}

#[test]
fn nested_rules_flatten_to_descendant_selectors() {
    let css = CssRule::new(".message, .note")
        .property("display", "flex")
        .child(CssRule::new(".avatar").property("width", "2rem"))
        .render();

    assert!(css.contains(".message, .note {\n    display: flex;\n}"));
    assert!(css.contains(".message .avatar, .note .avatar {\n    width: 2rem;\n}"));
}

#[test]
fn empty_rules_render_nothing() {
    assert_eq!(render_rules(&[CssRule::new(".unused")]), "");
}
