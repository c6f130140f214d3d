use crate::{Element, escape_html};
use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];
const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];
const INDENT: usize = 4;

/// A complete standalone document: one inline stylesheet and one content
/// element inside `<body>`.
#[derive(Clone, Debug, Default)]
pub struct PageBuilder {
    title: String,
    lang: Option<String>,
    stylesheet: Option<String>,
    content: Option<Element>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = value.into();
        self
    }

    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Inline stylesheet placed in `<head>`.
    pub fn stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = Some(css.into());
        self
    }

    pub fn content(mut self, value: Element) -> Self {
        self.content = Some(value);
        self
    }

    /// Renders the document and reformats it through a real HTML parser,
    /// which also normalizes anything malformed in the content tree.
    pub fn build(self) -> Result<String> {
        let lang = self.lang.as_deref().unwrap_or("en");
        let style = self
            .stylesheet
            .map(|css| format!("<style>{css}</style>"))
            .unwrap_or_default();
        let body = self.content.map(|c| c.render()).unwrap_or_default();

        let document = format!(
            "<!DOCTYPE html><html lang=\"{}\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             {style}<title>{}</title></head><body>{body}</body></html>",
            escape_html(lang),
            escape_html(&self.title),
        );

        pretty_print_html(&document)
    }
}

pub fn pretty_print_html(html: &str) -> Result<String> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .context("failed to parse generated html")?;

    let mut out = String::new();
    write_node(&dom.document, 0, false, &mut out);
    Ok(out)
}

fn write_node(node: &Handle, depth: usize, raw_text: bool, out: &mut String) {
    let pad = " ".repeat(depth * INDENT);
    match &node.data {
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                write_node(child, depth, false, out);
            }
        }
        NodeData::Doctype { .. } => out.push_str("<!DOCTYPE html>\n"),
        NodeData::Text { contents } => {
            let contents = contents.borrow();
            let text = contents.trim();
            if text.is_empty() {
                return;
            }
            out.push_str(&pad);
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_html(text));
            }
            out.push('\n');
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            out.push_str(&pad);
            out.push('<');
            out.push_str(tag);
            for attr in attrs.borrow().iter() {
                out.push_str(&format!(
                    " {}=\"{}\"",
                    attr.name.local,
                    escape_html(&attr.value)
                ));
            }
            out.push_str(">\n");
            if VOID_TAGS.contains(&tag) {
                return;
            }

            let raw_children = RAW_TEXT_TAGS.contains(&tag);
            for child in node.children.borrow().iter() {
                write_node(child, depth + 1, raw_children, out);
            }
            out.push_str(&pad);
            out.push_str(&format!("</{tag}>\n"));
        }
        _ => {}
    }
}
