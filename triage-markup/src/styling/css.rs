//! Minimal stylesheet model. Nested rules are flattened into descendant
//! selectors on output, so pages never depend on CSS nesting support.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssRule {
    selectors: Vec<String>,
    declarations: Vec<(String, String)>,
    nested: Vec<CssRule>,
}

impl CssRule {
    /// `selector` may be a comma separated list.
    pub fn new(selector: &str) -> Self {
        Self {
            selectors: split_selectors(selector),
            declarations: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.declarations.push((name.to_string(), value.to_string()));
        self
    }

    /// A rule scoped below this one: `.message` + `.avatar` becomes
    /// `.message .avatar`.
    pub fn child(mut self, rule: CssRule) -> Self {
        self.nested.push(rule);
        self
    }

    pub fn render(&self) -> String {
        let mut css = String::new();
        self.render_scoped(&[], &mut css);
        css
    }

    fn render_scoped(&self, parents: &[String], css: &mut String) {
        let selectors = if parents.is_empty() {
            self.selectors.clone()
        } else {
            parents
                .iter()
                .flat_map(|p| self.selectors.iter().map(move |s| format!("{p} {s}")))
                .collect()
        };

        if !self.declarations.is_empty() {
            css.push_str(&selectors.join(", "));
            css.push_str(" {\n");
            for (name, value) in &self.declarations {
                css.push_str(&format!("    {name}: {value};\n"));
            }
            css.push_str("}\n");
        }

        for rule in &self.nested {
            rule.render_scoped(&selectors, css);
        }
    }
}

fn split_selectors(selector: &str) -> Vec<String> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_rules(rules: &[CssRule]) -> String {
    rules
        .iter()
        .map(CssRule::render)
        .filter(|css| !css.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
