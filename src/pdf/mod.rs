//! CV export. Two templates map the same [`CvData`] onto paginated A4 documents.

pub mod classic;
pub mod dotted;
pub mod layout;
pub mod metrics;
pub mod pattern;
pub mod writer;

use serde::Serialize;

use crate::content::view::ViewModel;
use crate::theme::palette::Palette;
use crate::theme::Mode;
use writer::{Color, Document};

/// Shown instead of a name when the tenant has none.
pub const UNTITLED: &str = "Curriculum Vitae";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Classic,
    Dotted,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::Classic, Template::Dotted];

    pub fn parse(s: &str) -> Option<Template> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Template::Classic),
            "dotted" => Some(Template::Dotted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Dotted => "dotted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Template::Classic => "Classic",
            Template::Dotted => "Dotted",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CvEntry {
    pub title: String,
    pub organization: String,
    pub period: String,
    pub description: String,
}

/// Everything a CV template prints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CvData {
    pub name: String,
    pub role: String,
    pub summary: String,
    /// `(label, value)`
    pub contacts: Vec<(String, String)>,
    /// `(name, level 0..=100)`
    pub skills: Vec<(String, u8)>,
    pub experience: Vec<CvEntry>,
    pub education: Vec<CvEntry>,
    pub knowledge: Vec<String>,
}

impl CvData {
    pub fn from_view(view: &ViewModel) -> CvData {
        let about = &view.about;
        let mut contacts: Vec<(String, String)> = view
            .contacts
            .iter()
            .filter(|c| !c.value.trim().is_empty())
            .map(|c| {
                let label = if c.label.trim().is_empty() { c.kind.clone() } else { c.label.clone() };
                (label, c.value.trim().to_string())
            })
            .collect();
        if contacts.is_empty() {
            for (label, value) in [
                ("Email", &about.email),
                ("Phone", &about.phone),
                ("Location", &about.location),
                ("Website", &about.website),
            ] {
                if !value.trim().is_empty() {
                    contacts.push((label.to_string(), value.trim().to_string()));
                }
            }
        }

        let entries = |items: &[crate::content::ResumeEntry]| -> Vec<CvEntry> {
            items
                .iter()
                .filter(|e| !e.title.trim().is_empty() || !e.organization.trim().is_empty())
                .map(|e| CvEntry {
                    title: e.title.trim().to_string(),
                    organization: e.organization.trim().to_string(),
                    period: e.period.trim().to_string(),
                    description: e.description.trim().to_string(),
                })
                .collect()
        };

        CvData {
            name: about.name.trim().to_string(),
            role: about.role.trim().to_string(),
            summary: about.bio.trim().to_string(),
            contacts,
            skills: view
                .skills
                .iter()
                .filter(|s| !s.name.trim().is_empty())
                .map(|s| (s.name.trim().to_string(), s.level.min(100)))
                .collect(),
            experience: entries(view.experiences.as_slice()),
            education: entries(view.educations.as_slice()),
            knowledge: view
                .knowledges
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNTITLED
        } else {
            &self.name
        }
    }

    /// `cv-alex-morgan.pdf`, or `cv.pdf` without a name.
    pub fn filename(&self) -> String {
        let slug = slug::slugify(&self.name);
        if slug.is_empty() {
            "cv.pdf".to_string()
        } else {
            format!("cv-{}.pdf", slug)
        }
    }
}

/// Palette colors resolved for print.
#[derive(Debug, Clone, PartialEq)]
pub struct Ink {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    /// Readable text color on top of `primary`.
    pub on_primary: Color,
    pub variants: Vec<Color>,
}

impl Ink {
    pub fn from_palette(palette: &Palette, mode: Mode) -> Ink {
        let fallback = Palette::for_mode(mode);
        let pick = |value: &str, default: &str| {
            Color::from_css(value)
                .or_else(|| Color::from_css(default))
                .unwrap_or(Color::BLACK)
        };
        let primary = pick(&palette.primary, &fallback.primary);
        let on_primary = if primary.luminance() > 0.6 { Color::rgb(17, 17, 17) } else { Color::WHITE };
        let variants: Vec<Color> = palette.variants.iter().filter_map(|v| Color::from_css(v)).collect();
        Ink {
            primary,
            secondary: pick(&palette.secondary, &fallback.secondary),
            background: pick(&palette.background, &fallback.background),
            surface: pick(&palette.surface, &fallback.surface),
            text: pick(&palette.text, &fallback.text),
            muted: pick(&palette.muted, &fallback.muted),
            border: pick(&palette.border, &fallback.border),
            on_primary,
            variants,
        }
    }

    pub fn variant(&self, index: usize) -> Color {
        if self.variants.is_empty() {
            self.primary
        } else {
            self.variants[index % self.variants.len()]
        }
    }
}

/// Lay out `data` with `template`. Pure: the same inputs give the same document.
pub fn render(template: Template, data: &CvData, palette: &Palette, mode: Mode) -> Document {
    let ink = Ink::from_palette(palette, mode);
    let doc = match template {
        Template::Classic => classic::render(data, &ink),
        Template::Dotted => dotted::render(data, &ink, mode),
    };
    log::debug!(
        "Rendered {} CV for {} ({} page(s))",
        template.as_str(),
        data.display_name(),
        doc.pages.len()
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::view::ViewModel;

    fn sample() -> CvData {
        CvData::from_view(&ViewModel::build(None, &Palette::light()))
    }

    fn all_text(doc: &Document) -> Vec<String> {
        doc.pages
            .iter()
            .flat_map(|p| p.texts().into_iter().map(String::from))
            .collect()
    }

    #[test]
    fn template_parsing() {
        assert_eq!(Template::parse("Dotted"), Some(Template::Dotted));
        assert_eq!(Template::parse(" classic "), Some(Template::Classic));
        assert_eq!(Template::parse("fancy"), None);
        assert_eq!(Template::default(), Template::Classic);
    }

    #[test]
    fn placeholders_produce_full_cv() {
        let data = sample();
        assert_eq!(data.name, "Alex Morgan");
        assert!(!data.experience.is_empty());
        assert!(!data.skills.is_empty());
        assert_eq!(data.filename(), "cv-alex-morgan.pdf");

        for template in Template::ALL {
            let doc = render(template, &data, &Palette::light(), Mode::Light);
            let text = all_text(&doc);
            assert!(text.iter().any(|t| t == "Alex Morgan"), "{:?}", template);
            assert!(text.iter().any(|t| t.eq_ignore_ascii_case("experience")), "{:?}", template);
            assert!(doc.to_bytes().starts_with(b"%PDF-1.4"));
        }
    }

    #[test]
    fn empty_sections_are_omitted() {
        let data = CvData {
            summary: "Just a summary.".into(),
            ..CvData::default()
        };
        assert_eq!(data.filename(), "cv.pdf");
        for template in Template::ALL {
            let doc = render(template, &data, &Palette::dark(), Mode::Dark);
            let text = all_text(&doc);
            assert!(text.iter().any(|t| t == UNTITLED));
            for heading in ["experience", "education", "skills", "knowledge", "contact"] {
                assert!(
                    !text.iter().any(|t| t.eq_ignore_ascii_case(heading)),
                    "{} rendered {}",
                    template.as_str(),
                    heading
                );
            }
            assert_eq!(doc.pages.len(), 1);
        }
    }

    #[test]
    fn long_cv_paginates() {
        let mut data = sample();
        let entry = data.experience[0].clone();
        for _ in 0..40 {
            data.experience.push(entry.clone());
        }
        for template in Template::ALL {
            let doc = render(template, &data, &Palette::light(), Mode::Light);
            assert!(doc.pages.len() > 1, "{:?}", template);
        }
    }

    #[test]
    fn dotted_is_reproducible() {
        let data = sample();
        let a = render(Template::Dotted, &data, &Palette::light(), Mode::Light);
        let b = render(Template::Dotted, &data, &Palette::light(), Mode::Light);
        assert_eq!(a, b);
        let dark = render(Template::Dotted, &data, &Palette::light(), Mode::Dark);
        assert_ne!(a.pages[0], dark.pages[0]);
    }

    #[test]
    fn ink_falls_back_on_bad_colors() {
        let mut palette = Palette::light();
        palette.primary = "var(--nope)".into();
        let ink = Ink::from_palette(&palette, Mode::Light);
        assert_eq!(Some(ink.primary), Color::from_css(&Palette::light().primary));
    }
}
