//! Named terminal styles.
//!
//! Templates refer to styles by semantic name through the `style` filter
//! (`{{ name | style("title") }}`) and never pick colors themselves. Swapping a
//! color here changes every screen that uses that name.
//!
//! An unknown style name is rendered with a `(!?)` prefix so typos in templates
//! show up in the output instead of silently losing their style.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const TITLE: &str = "title";
    pub const HEADER: &str = "header";
    pub const LABEL: &str = "label";
    pub const ID: &str = "id";
    pub const TIME: &str = "time";
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";
    pub const REQUIRED: &str = "required";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Applies a named style, with ANSI codes.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Checks the style name but leaves `text` unstyled.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.styles.contains_key(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static FRONTDESK_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    Theme::new()
        .add(names::REGULAR, Style::new())
        .add(names::MUTED, muted.clone())
        .add(names::TITLE, Style::new().bold())
        .add(names::HEADER, Style::new().cyan().bold())
        .add(names::LABEL, muted.clone())
        .add(names::ID, Style::new().yellow())
        .add(names::TIME, muted.clone().italic())
        .add(names::ACTIVE, Style::new().green())
        .add(names::INACTIVE, Style::new().red())
        .add(names::REQUIRED, Style::new().red())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keeps_text() {
        assert_eq!(FRONTDESK_THEME.apply_plain(names::TITLE, "Ana"), "Ana");
    }

    #[test]
    fn test_unknown_style_is_flagged() {
        assert_eq!(FRONTDESK_THEME.apply_plain("titel", "Ana"), "(!?) Ana");
        assert!(FRONTDESK_THEME.apply("titel", "Ana").starts_with("(!?)"));
    }
}
