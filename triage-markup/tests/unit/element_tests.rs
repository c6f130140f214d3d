use triage_markup::prelude::*;

#[test]
fn renders_nested_elements_with_escaped_text() {
    let el = div()
        .class("card")
        .child(p().text("1 < 2"))
        .child(span().raw_html("<b>ok</b>"));
    assert_eq!(
        el.render(),
        r#"<div class="card"><p>1 &lt; 2</p><span><b>ok</b></span></div>"#
    );
}

#[test]
fn attributes_keep_insertion_order_and_escape_values() {
    let el = textarea()
        .id("user-input")
        .attr("placeholder", "say \"hi\"")
        .attr("rows", "1");
    assert_eq!(
        el.render(),
        r#"<textarea id="user-input" placeholder="say &quot;hi&quot;" rows="1"></textarea>"#
    );
}

#[test]
fn void_elements_have_no_closing_tag() {
    assert_eq!(element("br").render(), "<br>");
}

#[test]
fn class_helpers_do_not_duplicate() {
    let mut el = div().class("a").class("a");
    assert_eq!(el.attribute("class"), Some("a"));
    el.add_class("b");
    assert!(el.has_class("b"));
    el.remove_class("a");
    assert_eq!(el.attribute("class"), Some("b"));
    el.toggle_class("b", false);
    assert_eq!(el.attribute("class"), None);
}

#[test]
fn finds_descendants_by_id_and_class() {
    let mut tree = div()
        .id("root")
        .child(section().id("panel").child(span().class("spinner")));

    assert!(tree.contains_class("spinner"));
    assert!(tree.find_by_class("spinner").is_some());

    let panel = tree.find_by_id_mut("panel").expect("panel exists");
    panel.push(p().text("added"));
    assert_eq!(tree.find_by_id("panel").map(|p| p.children().len()), Some(2));
    assert!(tree.find_by_id("missing").is_none());
}

#[test]
fn text_content_collects_descendants() {
    let el = div().text("a").child(p().text("b").child(span().text("c")));
    assert_eq!(el.text_content(), "abc");
}
