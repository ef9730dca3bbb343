//! Page bodies. Each renderer returns `(body_html, page_css)`; the shell in
//! `render.rs` wraps them with navigation and theme variables.

pub mod about;
pub mod blog;
pub mod contact;
pub mod portfolio;
pub mod resume;

use crate::theme::apply::css_value;

/// `style="--accent:…"` for an item color, or nothing.
pub(crate) fn accent_style(color: Option<&String>) -> String {
    match color.map(|c| css_value(c)).filter(|c| !c.is_empty()) {
        Some(c) => format!(" style=\"--accent:{}\"", crate::render::html_escape(&c)),
        None => String::new(),
    }
}

/// Per-theme overrides layered after the base stylesheet.
pub fn theme_css(theme_id: &str) -> &'static str {
    match theme_id {
        "bostami" => BOSTAMI_CSS,
        "ryancv" => RYANCV_CSS,
        _ => "",
    }
}

const BOSTAMI_CSS: &str = r#"
.theme-bostami .card { border: none; border-radius: 20px; background: var(--color-surface); box-shadow: 0 8px 24px rgba(0,0,0,.06); }
.theme-bostami .service-card { background: color-mix(in srgb, var(--accent) 14%, var(--color-surface)); }
.theme-bostami h1 { background: var(--gradient-primary); -webkit-background-clip: text; background-clip: text; color: transparent; }
.theme-bostami .nav-link.active { background: var(--gradient-primary); color: #fff; padding: 4px 12px; border-radius: 8px; }
"#;

const RYANCV_CSS: &str = r#"
.theme-ryancv .card { border-radius: 4px; }
.theme-ryancv .section-title { text-transform: uppercase; letter-spacing: .08em; font-size: 1rem; }
.theme-ryancv .section-title::after { content: ""; display: block; width: 36px; height: 3px; margin-top: 6px; background: var(--gradient-primary); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_is_sanitized() {
        assert_eq!(accent_style(None), "");
        assert_eq!(accent_style(Some(&"#fff".to_string())), " style=\"--accent:#fff\"");
        assert_eq!(
            accent_style(Some(&"red;}</style>".to_string())),
            " style=\"--accent:red/style\""
        );
    }

    #[test]
    fn unknown_theme_has_no_overrides() {
        assert_eq!(theme_css("nope"), "");
        assert!(theme_css("bostami").contains(".theme-bostami"));
    }
}
