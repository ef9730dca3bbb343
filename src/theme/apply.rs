use serde::Serialize;

use super::palette::Palette;
use super::{Fonts, Mode};

/// Document-level styling derived from a resolved palette: the CSS custom properties
/// and whether the root element carries the `dark` class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedTheme {
    pub vars: Vec<(String, String)>,
    pub dark: bool,
}

impl AppliedTheme {
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `:root { ... }` block for the page head.
    pub fn style_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.vars {
            css.push_str(&format!("    {}: {};\n", name, value));
        }
        css.push('}');
        css
    }

    pub fn html_class(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }
}

/// Project a resolved palette onto CSS custom properties.
/// Called once per render with everything it needs passed in.
pub fn apply_theme(
    palette: &Palette,
    mode: Mode,
    gradient: Option<&str>,
    fonts: &Fonts,
) -> AppliedTheme {
    let mut vars: Vec<(String, String)> = vec![
        ("--color-primary".into(), css_value(&palette.primary)),
        ("--color-secondary".into(), css_value(&palette.secondary)),
        ("--color-bg".into(), css_value(&palette.background)),
        ("--color-surface".into(), css_value(&palette.surface)),
        ("--color-text".into(), css_value(&palette.text)),
        ("--color-text-secondary".into(), css_value(&palette.muted)),
        ("--color-border".into(), css_value(&palette.border)),
        ("--color-emphasis".into(), css_value(&palette.emphasis)),
        (
            "--gradient-primary".into(),
            css_value(gradient.unwrap_or(&palette.primary)),
        ),
        ("--font-body".into(), font_stack(&fonts.body)),
        ("--font-heading".into(), font_stack(&fonts.heading)),
    ];
    for (i, color) in palette.variants.iter().enumerate() {
        vars.push((format!("--color-variant-{}", i), css_value(color)));
    }

    AppliedTheme {
        vars,
        dark: mode == Mode::Dark,
    }
}

/// Strip characters that could close the declaration or the style element.
pub fn css_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn font_stack(family: &str) -> String {
    let family: String = css_value(family).replace(['\'', '"'], "");
    if family.is_empty() {
        "system-ui, sans-serif".to_string()
    } else {
        format!("'{}', system-ui, sans-serif", family)
    }
}
