use serde_json::{json, Value};

pub const DEFAULT_THEME: &str = "default";

/// Every theme id a tenant may select.
pub const THEME_IDS: &[&str] = &[DEFAULT_THEME, "bostami", "ryancv"];

/// Hardcoded base layer. Every lookup in the resolver terminates here.
/// It holds no palettes; `select_palette` falls back to the built-in ones.
pub fn defaults() -> Value {
    json!({
        "theme": DEFAULT_THEME,
        "mode": "light",
        "site": {
            "title": "Portfolio",
            "description": "Personal portfolio and curriculum vitae",
            "footer": "",
        },
        "layout": {
            "nav": "top",
            "sidebar_profile": false,
            "sticky_header": true,
            "posts_per_page": 6,
            "portfolio_columns": 3,
            "cv_template": "classic",
        },
        "features": {
            "blog": true,
            "portfolio": true,
            "resume": true,
            "contact_form": true,
            "pdf_download": true,
            "mode_toggle": true,
            "search": true,
            "show_warnings": false,
        },
        "fonts": {
            "body": "Inter",
            "heading": "Poppins",
            "google": true,
        },
        "gradient": {
            "angle": 135,
            "stops": [
                {"color": "primary", "position": 0},
                {"color": "secondary", "position": 100},
            ],
        },
    })
}

/// Static definition for a named theme, or `None` for unknown ids.
pub fn definition(id: &str) -> Option<Value> {
    match id {
        DEFAULT_THEME => Some(json!({})),
        "bostami" => Some(bostami()),
        "ryancv" => Some(ryancv()),
        _ => None,
    }
}

fn bostami() -> Value {
    json!({
        "layout": {
            "nav": "side",
            "sidebar_profile": true,
            "portfolio_columns": 3,
            "cv_template": "dotted",
        },
        "fonts": {"body": "Poppins", "heading": "Poppins"},
        "palettes": {
            "light": {
                "primary": "#FA5252",
                "secondary": "#DD2476",
                "background": "#F3F6F6",
                "surface": "#FFFFFF",
                "text": "#44566C",
                "muted": "#7B7B7B",
                "border": "#E3E3E3",
                "emphasis": "#0B0B0B",
                "variants": ["#FCF4FF", "#EEFBFF", "#FFF0F0", "#FFF3FC", "#FFF4F4", "#F3FAFF"],
            },
            "dark": {
                "primary": "#FA5252",
                "secondary": "#DD2476",
                "background": "#111111",
                "surface": "#212425",
                "text": "#A6A6A6",
                "muted": "#7B7B7B",
                "border": "#333333",
                "emphasis": "#FFFFFF",
                "variants": ["#1D1D1D", "#232323", "#2A2A2A", "#1F2224", "#25211F", "#1E2320"],
            },
        },
        "gradient": {
            "angle": 90,
            "stops": [
                {"color": "primary", "position": 0},
                {"color": "secondary", "position": 100},
            ],
        },
    })
}

fn ryancv() -> Value {
    json!({
        "layout": {
            "nav": "top",
            "sidebar_profile": true,
            "portfolio_columns": 2,
            "cv_template": "classic",
        },
        "fonts": {"body": "Roboto", "heading": "Poppins"},
        "palettes": {
            "light": {
                "primary": "#78CC6D",
                "secondary": "#5AB44E",
                "background": "#F1F1F1",
                "surface": "#FFFFFF",
                "text": "#323232",
                "muted": "#888888",
                "border": "#EEEEEE",
                "emphasis": "#141414",
                "variants": ["#F2FBF0", "#EEF7F9", "#FBF5EC", "#F4F0FB"],
            },
            "dark": {
                "primary": "#78CC6D",
                "secondary": "#5AB44E",
                "background": "#181818",
                "surface": "#232323",
                "text": "#D1D1D1",
                "muted": "#8A8A8A",
                "border": "#2F2F2F",
                "emphasis": "#FFFFFF",
                "variants": ["#1F2A1D", "#1C2629", "#2A251C", "#241F2A"],
            },
        },
        "gradient": {"from": "primary", "to": "secondary", "angle": 45},
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_has_a_definition() {
        for id in THEME_IDS {
            assert!(definition(id).is_some(), "missing definition for {}", id);
        }
        assert!(definition("unknown").is_none());
    }

    #[test]
    fn defaults_leave_palettes_to_the_selector() {
        let d = defaults();
        assert!(d.get("palettes").is_none());
        assert!(d.get("colors").is_none());
        assert_eq!(d["gradient"]["stops"].as_array().map(Vec::len), Some(2));
    }
}
