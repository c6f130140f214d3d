const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text_content: Option<String>,
    raw: bool,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text_content: None,
            raw: false,
        }
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Text is escaped when the element is rendered.
    pub fn text(mut self, text: &str) -> Self {
        self.text_content = Some(text.to_string());
        self.raw = false;
        self
    }

    /// Inserts markup verbatim. Callers pass sanitizer output only.
    pub fn raw_html(mut self, html: &str) -> Self {
        self.text_content = Some(html.to_string());
        self.raw = true;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn child_opt(mut self, child: Option<Element>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    pub fn children_from(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn element_id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.retain(|(k, _)| k != key);
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes = self.attribute("class").unwrap_or_default().to_string();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self.set_attr("class", &classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(classes) = self.attribute("class") else {
            return;
        };
        let remaining = classes
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &remaining);
        }
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text_content = Some(text.to_string());
        self.raw = false;
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.children.pop()
    }

    pub fn last_child(&self) -> Option<&Element> {
        self.children.last()
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.text_content = None;
    }

    pub fn retain(&mut self, keep: impl FnMut(&Element) -> bool) {
        self.children.retain(keep);
    }

    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    /// True when this element or any descendant carries `class`.
    pub fn contains_class(&self, class: &str) -> bool {
        self.has_class(class) || self.children.iter().any(|c| c.contains_class(class))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.element_id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.element_id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_by_class_mut(class))
    }

    /// Concatenated text of this element and its descendants, as stored.
    pub fn text_content(&self) -> String {
        let mut out = self.text_content.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn render(&self) -> String {
        let mut html = format!("<{}", self.tag);

        for (key, value) in &self.attributes {
            html.push_str(&format!(" {}=\"{}\"", key, crate::escape_html(value)));
        }

        html.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return html;
        }

        if let Some(text) = &self.text_content {
            if self.raw {
                html.push_str(text);
            } else {
                html.push_str(&crate::escape_html(text));
            }
        }

        for child in &self.children {
            html.push_str(&child.render());
        }

        html.push_str(&format!("</{}>", self.tag));
        html
    }
}
