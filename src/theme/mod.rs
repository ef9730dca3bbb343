//! Theme and site configuration resolution.
//!
//! The effective config is the left fold of three layers through one deep merge:
//! hardcoded defaults, the selected theme definition, and the tenant's remote config.

pub mod apply;
pub mod definitions;
pub mod merge;
pub mod palette;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use self::palette::Palette;

/// Cookie that persists the visitor's last selected mode.
pub const MODE_COOKIE: &str = "theme-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Mode::Light),
            "dark" => Some(Mode::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub footer: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        SiteMeta {
            title: "Portfolio".into(),
            description: String::new(),
            footer: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFlags {
    /// `top` or `side`.
    pub nav: String,
    pub sidebar_profile: bool,
    pub sticky_header: bool,
    pub posts_per_page: usize,
    pub portfolio_columns: usize,
    /// Default PDF template when the request does not name one.
    pub cv_template: String,
}

impl Default for LayoutFlags {
    fn default() -> Self {
        LayoutFlags {
            nav: "top".into(),
            sidebar_profile: false,
            sticky_header: true,
            posts_per_page: 6,
            portfolio_columns: 3,
            cv_template: "classic".into(),
        }
    }
}

impl LayoutFlags {
    pub fn side_nav(&self) -> bool {
        self.nav == "side"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub blog: bool,
    pub portfolio: bool,
    pub resume: bool,
    pub contact_form: bool,
    pub pdf_download: bool,
    pub mode_toggle: bool,
    pub search: bool,
    pub show_warnings: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        FeatureFlags {
            blog: true,
            portfolio: true,
            resume: true,
            contact_form: true,
            pdf_download: true,
            mode_toggle: true,
            search: true,
            show_warnings: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub body: String,
    pub heading: String,
    /// Load the families from Google Fonts.
    pub google: bool,
}

impl Default for Fonts {
    fn default() -> Self {
        Fonts {
            body: "Inter".into(),
            heading: "Poppins".into(),
            google: true,
        }
    }
}

/// Effective configuration after layering.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub theme: String,
    pub mode: Mode,
    pub site: SiteMeta,
    pub layout: LayoutFlags,
    pub features: FeatureFlags,
    pub fonts: Fonts,
    /// The merged JSON the typed sections were read from.
    pub raw: Value,
}

impl SiteConfig {
    /// Resolve the effective config from an optional remote tenant config.
    /// Never fails: malformed sections fall back to their defaults.
    pub fn resolve(remote: Option<&Value>) -> SiteConfig {
        let defaults = definitions::defaults();
        let remote = remote.cloned().unwrap_or(Value::Null);

        let theme = selected_theme(&remote);
        let definition = definitions::definition(&theme).unwrap_or(Value::Null);
        let mut raw = merge::resolve_layers(&[&defaults, &definition, &remote]);

        // The gradient is taken whole from the highest layer that sets one.
        if let Some(gradient) = [&remote, &definition]
            .into_iter()
            .find_map(|layer| layer.get("gradient").filter(|g| !g.is_null()))
        {
            raw["gradient"] = gradient.clone();
        }

        let mode = raw
            .get("mode")
            .and_then(Value::as_str)
            .and_then(Mode::parse)
            .unwrap_or_default();

        SiteConfig {
            mode,
            site: section(&raw, "site"),
            layout: section(&raw, "layout"),
            features: section(&raw, "features"),
            fonts: section(&raw, "fonts"),
            theme,
            raw,
        }
    }

    pub fn palette(&self, mode: Mode) -> Palette {
        palette::select_palette(&self.raw, mode)
    }

    pub fn gradient(&self, palette: &Palette) -> Option<String> {
        palette::build_gradient(&self.raw, palette)
    }
}

fn selected_theme(remote: &Value) -> String {
    match remote.get("theme").and_then(Value::as_str) {
        Some(id) if definitions::THEME_IDS.contains(&id) => id.to_string(),
        Some(id) => {
            log::warn!("Unknown theme '{}', using '{}'", id, definitions::DEFAULT_THEME);
            definitions::DEFAULT_THEME.to_string()
        }
        None => definitions::DEFAULT_THEME.to_string(),
    }
}

fn section<T: DeserializeOwned + Default>(raw: &Value, key: &str) -> T {
    match raw.get(key) {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            log::warn!("Config section '{}' is malformed ({}), using defaults", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_remote_config_yields_defaults() {
        let cfg = SiteConfig::resolve(None);
        assert_eq!(cfg.theme, "default");
        assert_eq!(cfg.mode, Mode::Light);
        assert_eq!(cfg.layout, LayoutFlags::default());
        assert_eq!(cfg.features, FeatureFlags::default());
        assert_eq!(cfg.raw, definitions::defaults());
    }

    #[test]
    fn partial_remote_overrides_only_present_keys() {
        let remote = json!({"features": {"blog": false}, "site": {"title": "Jane Doe"}});
        let cfg = SiteConfig::resolve(Some(&remote));

        let mut expected = definitions::defaults();
        expected["features"]["blog"] = json!(false);
        expected["site"]["title"] = json!("Jane Doe");
        assert_eq!(cfg.raw, expected);
        assert!(!cfg.features.blog);
        assert!(cfg.features.portfolio);
        assert_eq!(cfg.site.title, "Jane Doe");
    }

    #[test]
    fn theme_definition_sits_between_defaults_and_remote() {
        let remote = json!({"theme": "bostami", "layout": {"nav": "top"}});
        let cfg = SiteConfig::resolve(Some(&remote));
        assert_eq!(cfg.theme, "bostami");
        // remote wins over the definition
        assert_eq!(cfg.layout.nav, "top");
        // definition wins over defaults
        assert!(cfg.layout.sidebar_profile);
        assert_eq!(cfg.palette(Mode::Light).primary, "#FA5252");
        // defaults fill what the definition leaves out
        assert_eq!(cfg.layout.posts_per_page, 6);
    }

    #[test]
    fn unknown_theme_uses_default() {
        let cfg = SiteConfig::resolve(Some(&json!({"theme": "vaporwave"})));
        assert_eq!(cfg.theme, "default");
        assert_eq!(cfg.palette(Mode::Light), Palette::light());
    }

    #[test]
    fn malformed_sections_fall_back() {
        let remote = json!({"layout": {"posts_per_page": "many"}, "mode": "sepia", "features": []});
        let cfg = SiteConfig::resolve(Some(&remote));
        assert_eq!(cfg.layout, LayoutFlags::default());
        assert_eq!(cfg.mode, Mode::Light);
        assert_eq!(cfg.features, FeatureFlags::default());
    }

    #[test]
    fn missing_remote_dark_palette_uses_default_dark() {
        let remote = json!({"palettes": {"light": {"primary": "#123456"}}});
        let cfg = SiteConfig::resolve(Some(&remote));
        assert_eq!(cfg.palette(Mode::Light).primary, "#123456");
        assert_eq!(cfg.palette(Mode::Dark), Palette::dark());
    }

    #[test]
    fn flat_colors_apply_through_resolve() {
        let remote = json!({"colors": {"primary": "#123456"}});
        let cfg = SiteConfig::resolve(Some(&remote));
        assert_eq!(cfg.palette(Mode::Light).primary, "#123456");
        assert_eq!(cfg.palette(Mode::Light).surface, Palette::light().surface);
        assert_eq!(cfg.palette(Mode::Dark).primary, "#123456");
        assert_eq!(cfg.palette(Mode::Dark).background, Palette::dark().background);
    }

    #[test]
    fn theme_palette_still_wins_over_flat_colors() {
        let remote = json!({"theme": "bostami", "colors": {"primary": "#123456"}});
        let cfg = SiteConfig::resolve(Some(&remote));
        assert_eq!(cfg.palette(Mode::Light).primary, "#FA5252");
    }

    #[test]
    fn no_palettes_anywhere_uses_built_in_per_mode() {
        let cfg = SiteConfig::resolve(None);
        assert_eq!(cfg.palette(Mode::Light), Palette::light());
        assert_eq!(cfg.palette(Mode::Dark), Palette::dark());
    }

    #[test]
    fn remote_from_to_gradient_replaces_default_stops() {
        let remote = json!({"gradient": {"from": "#000000", "to": "#ffffff"}});
        let cfg = SiteConfig::resolve(Some(&remote));
        let p = cfg.palette(Mode::Light);
        assert_eq!(
            cfg.gradient(&p).as_deref(),
            Some("linear-gradient(135deg, #000000, #ffffff)")
        );
    }

    #[test]
    fn theme_from_to_gradient_is_used() {
        let cfg = SiteConfig::resolve(Some(&json!({"theme": "ryancv"})));
        let p = cfg.palette(Mode::Light);
        assert_eq!(
            cfg.gradient(&p).as_deref(),
            Some("linear-gradient(45deg, #78CC6D, #5AB44E)")
        );
    }

    #[test]
    fn default_gradient_uses_palette_stops() {
        let cfg = SiteConfig::resolve(None);
        let p = cfg.palette(Mode::Light);
        assert_eq!(
            cfg.gradient(&p).as_deref(),
            Some("linear-gradient(135deg, #4F46E5 0%, #06B6D4 100%)")
        );
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(Mode::parse(" Dark "), Some(Mode::Dark));
        assert_eq!(Mode::parse("light"), Some(Mode::Light));
        assert_eq!(Mode::parse("auto"), None);
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
    }
}
