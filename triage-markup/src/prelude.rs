pub use crate::escape::{
    escape_html, escape_multiline, line_breaks, sanitize, sanitize_opt, value_text,
};
pub use crate::html::{
    Element, PageBuilder, button, div, element, h1, h3, h4, header, li, p, section, span, strong,
    table, td, textarea, th, tr, ul,
};
pub use crate::styling::css::{CssRule, render_rules};
pub use crate::theme::Theme;
