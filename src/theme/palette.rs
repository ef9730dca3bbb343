use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Mode;

/// Named colors for one mode plus the accent variants cycled across card lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted: String,
    pub border: String,
    pub emphasis: String,
    pub variants: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::light()
    }
}

impl Palette {
    /// Light palette of the default theme.
    pub fn light() -> Self {
        Palette {
            primary: "#4F46E5".into(),
            secondary: "#06B6D4".into(),
            background: "#F8FAFC".into(),
            surface: "#FFFFFF".into(),
            text: "#1E293B".into(),
            muted: "#64748B".into(),
            border: "#E2E8F0".into(),
            emphasis: "#0F172A".into(),
            variants: vec![
                "#EEF2FF".into(),
                "#ECFEFF".into(),
                "#FDF2F8".into(),
                "#F0FDF4".into(),
                "#FFFBEB".into(),
                "#F5F3FF".into(),
            ],
        }
    }

    /// Dark palette of the default theme.
    pub fn dark() -> Self {
        Palette {
            primary: "#818CF8".into(),
            secondary: "#22D3EE".into(),
            background: "#0F172A".into(),
            surface: "#1E293B".into(),
            text: "#E2E8F0".into(),
            muted: "#94A3B8".into(),
            border: "#334155".into(),
            emphasis: "#F8FAFC".into(),
            variants: vec![
                "#312E81".into(),
                "#164E63".into(),
                "#831843".into(),
                "#14532D".into(),
                "#78350F".into(),
                "#4C1D95".into(),
            ],
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Light => Palette::light(),
            Mode::Dark => Palette::dark(),
        }
    }

    /// Accent color for the `index`-th item of a list, cycling through the variants.
    pub fn variant(&self, index: usize) -> &str {
        if self.variants.is_empty() {
            return &self.primary;
        }
        &self.variants[index % self.variants.len()]
    }

    /// Look up a color by its palette key (`primary`, `surface`, ...).
    pub fn color(&self, name: &str) -> Option<&str> {
        let c = match name {
            "primary" => &self.primary,
            "secondary" => &self.secondary,
            "background" => &self.background,
            "surface" => &self.surface,
            "text" => &self.text,
            "muted" => &self.muted,
            "border" => &self.border,
            "emphasis" => &self.emphasis,
            _ => return None,
        };
        Some(c.as_str())
    }

    /// Layer a loosely-typed JSON palette over `self`, key by key.
    /// Keys that are missing, blank or not strings keep the base color.
    pub fn layered(self, over: &Value) -> Palette {
        let pick = |key: &str, fallback: String| -> String {
            over.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        let variants: Vec<String> = over
            .get("variants")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Palette {
            primary: pick("primary", self.primary),
            secondary: pick("secondary", self.secondary),
            background: pick("background", self.background),
            surface: pick("surface", self.surface),
            text: pick("text", self.text),
            muted: pick("muted", self.muted),
            border: pick("border", self.border),
            emphasis: pick("emphasis", self.emphasis),
            variants: if variants.is_empty() {
                self.variants
            } else {
                variants
            },
        }
    }
}

/// Pick the palette for `mode` from an effective config.
///
/// Order: `palettes.<mode>`, then the flat `colors` object, then the default theme's
/// built-in palette for `mode`. The chosen object is layered over that built-in palette
/// so partial palettes never leave holes.
pub fn select_palette(config: &Value, mode: Mode) -> Palette {
    let chosen = config
        .get("palettes")
        .and_then(|p| p.get(mode.as_str()))
        .filter(|v| v.is_object())
        .or_else(|| config.get("colors").filter(|v| v.is_object()));

    match chosen {
        Some(over) => Palette::for_mode(mode).layered(over),
        None => {
            log::debug!("No configured palette for {} mode, using the built-in one", mode.as_str());
            Palette::for_mode(mode)
        }
    }
}

/// Build a CSS `linear-gradient(...)` from the config's `gradient` entry.
///
/// Explicit `stops` (palette key or CSS color, optional position) win; otherwise the
/// two-color `from`/`to` fallback is used. Fewer than two resolvable stops yields `None`.
pub fn build_gradient(config: &Value, palette: &Palette) -> Option<String> {
    let entry = config.get("gradient")?;
    if !entry.is_object() {
        return None;
    }
    let angle = entry.get("angle").and_then(Value::as_f64).unwrap_or(135.0);

    let mut stops: Vec<String> = entry
        .get("stops")
        .and_then(Value::as_array)
        .map(|stops| stops.iter().filter_map(|s| resolve_stop(s, palette)).collect())
        .unwrap_or_default();

    if stops.len() < 2 {
        stops = ["from", "to"]
            .iter()
            .filter_map(|k| entry.get(*k).and_then(Value::as_str))
            .filter_map(|c| resolve_color(c, palette))
            .collect();
    }

    if stops.len() < 2 {
        return None;
    }
    Some(format!(
        "linear-gradient({}deg, {})",
        format_number(angle),
        stops.join(", ")
    ))
}

fn resolve_stop(stop: &Value, palette: &Palette) -> Option<String> {
    match stop {
        Value::String(c) => resolve_color(c, palette),
        Value::Object(_) => {
            let color = resolve_color(stop.get("color")?.as_str()?, palette)?;
            match stop.get("position").and_then(Value::as_f64) {
                Some(pos) => Some(format!("{} {}%", color, format_number(pos.clamp(0.0, 100.0)))),
                None => Some(color),
            }
        }
        _ => None,
    }
}

/// Resolve a palette key name or a literal CSS color.
pub fn resolve_color(raw: &str, palette: &Palette) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(c) = palette.color(raw) {
        return Some(c.to_string());
    }
    let lower = raw.to_ascii_lowercase();
    let literal = lower.starts_with('#')
        || lower.starts_with("rgb")
        || lower.starts_with("hsl")
        || matches!(lower.as_str(), "white" | "black" | "transparent");
    if literal && !raw.contains([';', '{', '}', '<', '>']) {
        Some(raw.to_string())
    } else {
        None
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v).trim_end_matches('0').to_string()
    }
}
