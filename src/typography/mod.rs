use crate::theme::Fonts;

const SYSTEM_FONTS: &[&str] = &["system-ui", "sans-serif", "serif", "monospace", "Helvetica", "Arial", "Georgia"];

/// Build the font loading tags for the theme's families (Google Fonts only).
pub fn build_font_links(fonts: &Fonts) -> String {
    if !fonts.google {
        return String::new();
    }

    let mut families: Vec<String> = Vec::new();
    let mut maybe_add = |name: &str| {
        let name = name.trim();
        let safe = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
        if !name.is_empty() && safe && !SYSTEM_FONTS.contains(&name) {
            let family = name.replace(' ', "+");
            if !families.contains(&family) {
                families.push(family);
            }
        }
    };
    maybe_add(&fonts.body);
    maybe_add(&fonts.heading);

    if families.is_empty() {
        return String::new();
    }

    let params: Vec<String> = families
        .iter()
        .map(|f| format!("family={}:wght@300;400;500;600;700", f))
        .collect();
    format!(
        r#"    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?{}&display=swap" rel="stylesheet">
"#,
        params.join("&")
    )
}
