use crate::styling::css::CssRule;
use strum_macros::{Display, EnumString};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS custom properties consumed by the page stylesheets.
    pub fn palette(self) -> CssRule {
        let (bg, panel, line, ink, muted, brand, bad) = match self {
            Theme::Light => (
                "#eef2f7", "#ffffff", "#d9dee5", "#1f2937", "#4b5563", "#1d4ed8", "#b91c1c",
            ),
            Theme::Dark => (
                "#0b1320", "#111a2b", "#243247", "#e6edf8", "#9fb0c9", "#3b82f6", "#f87171",
            ),
        };

        CssRule::new(":root")
            .property("--bg", bg)
            .property("--panel", panel)
            .property("--line", line)
            .property("--ink", ink)
            .property("--muted", muted)
            .property("--brand", brand)
            .property("--bad", bad)
    }
}
