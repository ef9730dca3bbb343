use serde::Serialize;

use super::{placeholders, About, ContactEntry, ContentBundle, Post, ResumeEntry, Skill, Social, Work};
use crate::theme::palette::Palette;

/// Ready-to-render content after fallback resolution and color assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub about: About,
    pub works: Vec<Work>,
    pub blogs: Vec<Post>,
    pub experiences: Vec<ResumeEntry>,
    pub educations: Vec<ResumeEntry>,
    pub skills: Vec<Skill>,
    pub knowledges: Vec<String>,
    pub contacts: Vec<ContactEntry>,
    pub socials: Vec<Social>,
    /// Names of the collections that were filled from bundled placeholders.
    pub placeholders: Vec<&'static str>,
}

/// Items that take an accent color from the palette when they have none.
trait Colored {
    fn color_slot(&mut self) -> &mut Option<String>;
}

macro_rules! colored {
    ($($t:ty),*) => {
        $(impl Colored for $t {
            fn color_slot(&mut self) -> &mut Option<String> {
                &mut self.color
            }
        })*
    };
}

colored!(Work, Post, ResumeEntry, Skill, ContactEntry, super::Service);

fn paint<T: Colored>(items: &mut [T], palette: &Palette) {
    for (i, item) in items.iter_mut().enumerate() {
        let slot = item.color_slot();
        let blank = slot.as_deref().map(|c| c.trim().is_empty()).unwrap_or(true);
        if blank {
            *slot = Some(palette.variant(i).to_string());
        }
    }
}

fn or_placeholder<T: Clone>(
    remote: Option<&Vec<T>>,
    name: &'static str,
    fallback: fn() -> Vec<T>,
    used: &mut Vec<&'static str>,
) -> Vec<T> {
    match remote {
        Some(items) if !items.is_empty() => items.clone(),
        _ => {
            used.push(name);
            fallback()
        }
    }
}

impl ViewModel {
    /// Build the view model. Each collection falls back to its placeholders when the
    /// bundle is missing or the collection is empty; then uncolored items are painted
    /// with the palette variants in order.
    pub fn build(bundle: Option<&ContentBundle>, palette: &Palette) -> ViewModel {
        let mut used = Vec::new();

        let about = match bundle.and_then(|b| b.about.clone()) {
            Some(about) => about,
            None => {
                used.push("about");
                placeholders::about()
            }
        };

        let mut view = ViewModel {
            about,
            works: or_placeholder(bundle.map(|b| &b.works), "works", placeholders::works, &mut used),
            blogs: or_placeholder(bundle.map(|b| &b.blogs), "blogs", placeholders::blogs, &mut used),
            experiences: or_placeholder(
                bundle.map(|b| &b.experiences),
                "experiences",
                placeholders::experiences,
                &mut used,
            ),
            educations: or_placeholder(
                bundle.map(|b| &b.educations),
                "educations",
                placeholders::educations,
                &mut used,
            ),
            skills: or_placeholder(bundle.map(|b| &b.skills), "skills", placeholders::skills, &mut used),
            knowledges: or_placeholder(
                bundle.map(|b| &b.knowledges),
                "knowledges",
                placeholders::knowledges,
                &mut used,
            ),
            contacts: or_placeholder(
                bundle.map(|b| &b.contacts),
                "contacts",
                placeholders::contacts,
                &mut used,
            ),
            socials: or_placeholder(bundle.map(|b| &b.socials), "socials", placeholders::socials, &mut used),
            placeholders: Vec::new(),
        };
        view.placeholders = used;

        assign_ids(&mut view.works, |w| (&mut w.id, w.title.clone()));
        assign_ids(&mut view.blogs, |p| (&mut p.id, p.title.clone()));

        paint(&mut view.about.services, palette);
        paint(&mut view.works, palette);
        paint(&mut view.blogs, palette);
        paint(&mut view.experiences, palette);
        paint(&mut view.educations, palette);
        paint(&mut view.skills, palette);
        paint(&mut view.contacts, palette);
        view
    }

    pub fn work(&self, id: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.blogs.iter().find(|p| p.id == id)
    }

    /// Works carrying `tag` (compared by slug, so "Web Design" matches "web-design").
    pub fn works_by_tag(&self, tag: &str) -> Vec<&Work> {
        let wanted = slug::slugify(tag);
        self.works
            .iter()
            .filter(|w| w.all_tags().iter().any(|t| slug::slugify(t) == wanted))
            .collect()
    }

    /// Distinct work tags (categories included), sorted case-insensitively.
    pub fn tags(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for w in &self.works {
            for t in w.all_tags() {
                if !seen.iter().any(|s| slug::slugify(s) == slug::slugify(t)) {
                    seen.push(t.to_string());
                }
            }
        }
        seen.sort_by_key(|t| t.to_lowercase());
        seen
    }

    pub fn search_works(&self, query: &str) -> Vec<&Work> {
        let q = query.trim().to_lowercase();
        self.works
            .iter()
            .filter(|w| {
                q.is_empty()
                    || w.title.to_lowercase().contains(&q)
                    || w.description.to_lowercase().contains(&q)
                    || w.all_tags().iter().any(|t| t.to_lowercase().contains(&q))
            })
            .collect()
    }

    pub fn search_posts(&self, query: &str) -> Vec<&Post> {
        let q = query.trim().to_lowercase();
        self.blogs
            .iter()
            .filter(|p| {
                q.is_empty()
                    || p.title.to_lowercase().contains(&q)
                    || p.excerpt.to_lowercase().contains(&q)
                    || p.content.to_lowercase().contains(&q)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&q))
            })
            .collect()
    }

    pub fn posts_tagged(&self, tag: &str) -> Vec<&Post> {
        let wanted = slug::slugify(tag);
        self.blogs
            .iter()
            .filter(|p| p.tags.iter().any(|t| slug::slugify(t) == wanted))
            .collect()
    }
}

/// Fill blank ids from the title slug, then the 1-based position; keep them unique.
fn assign_ids<T, F>(items: &mut [T], mut fields: F)
where
    F: FnMut(&mut T) -> (&mut String, String),
{
    let mut taken: Vec<String> = Vec::new();
    for (i, item) in items.iter_mut().enumerate() {
        let (id, title) = fields(item);
        if id.trim().is_empty() {
            let from_title = slug::slugify(&title);
            *id = if from_title.is_empty() {
                (i + 1).to_string()
            } else {
                from_title
            };
        }
        if taken.contains(id) {
            *id = format!("{}-{}", id, i + 1);
        }
        taken.push(id.clone());
    }
}

/// Slice one page out of `items`. Pages are 1-based; returns the page and the page count.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> (Vec<T>, usize) {
    let per_page = per_page.max(1);
    let total_pages = ((items.len() + per_page - 1) / per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let slice = items.iter().skip(start).take(per_page).cloned().collect();
    (slice, total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cycled<T>(items: &[T], palette: &Palette, color: impl Fn(&T) -> Option<&String>) -> bool {
        items
            .iter()
            .enumerate()
            .all(|(i, it)| color(it).map(String::as_str) == Some(palette.variant(i)))
    }

    #[test]
    fn missing_bundle_uses_every_placeholder_with_cycled_colors() {
        let palette = Palette::light();
        let view = ViewModel::build(None, &palette);

        assert_eq!(view.works.len(), placeholders::works().len());
        assert_eq!(view.blogs.len(), placeholders::blogs().len());
        assert_eq!(view.experiences.len(), placeholders::experiences().len());
        assert_eq!(view.educations.len(), placeholders::educations().len());
        assert_eq!(view.skills.len(), placeholders::skills().len());
        assert_eq!(view.contacts.len(), placeholders::contacts().len());
        assert_eq!(view.knowledges, placeholders::knowledges());
        assert_eq!(view.about.name, placeholders::about().name);

        assert!(cycled(&view.works, &palette, |w| w.color.as_ref()));
        assert!(cycled(&view.blogs, &palette, |p| p.color.as_ref()));
        assert!(cycled(&view.experiences, &palette, |e| e.color.as_ref()));
        assert!(cycled(&view.skills, &palette, |s| s.color.as_ref()));
        assert!(cycled(&view.contacts, &palette, |c| c.color.as_ref()));
        assert!(view.placeholders.contains(&"works"));
        assert!(view.placeholders.contains(&"about"));
    }

    #[test]
    fn empty_remote_collections_fall_back_individually() {
        let bundle = ContentBundle::from_value(&json!({
            "works": [],
            "blogs": [{"title": "Remote post"}],
        }));
        let view = ViewModel::build(Some(&bundle), &Palette::dark());
        assert_eq!(view.works, ViewModel::build(None, &Palette::dark()).works);
        assert_eq!(view.blogs.len(), 1);
        assert_eq!(view.blogs[0].id, "remote-post");
        assert!(!view.placeholders.contains(&"blogs"));
    }

    #[test]
    fn explicit_colors_are_kept() {
        let bundle = ContentBundle::from_value(&json!({
            "skills": [{"name": "A", "color": "#123"}, {"name": "B"}],
        }));
        let palette = Palette::light();
        let view = ViewModel::build(Some(&bundle), &palette);
        assert_eq!(view.skills[0].color.as_deref(), Some("#123"));
        assert_eq!(view.skills[1].color.as_deref(), Some(palette.variant(1)));
    }

    #[test]
    fn duplicate_and_blank_ids_are_fixed() {
        let bundle = ContentBundle::from_value(&json!({
            "works": [{"id": "x", "title": "One"}, {"id": "x", "title": "Two"}, {"title": ""}],
        }));
        let view = ViewModel::build(Some(&bundle), &Palette::light());
        let ids: Vec<&str> = view.works.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "x-2", "3"]);
    }

    #[test]
    fn filter_and_lookup() {
        let view = ViewModel::build(None, &Palette::light());
        let web = view.works_by_tag("web");
        assert!(!web.is_empty());
        assert!(web.iter().all(|w| w.all_tags().contains(&"Web")));
        assert_eq!(view.work("3").map(|w| w.title.as_str()), Some("Brand Identity"));
        assert!(view.work("nope").is_none());
        assert_eq!(view.post("2").map(|p| p.title.as_str()), Some("Designing with constraints"));
        assert!(view.tags().contains(&"Design".to_string()));
        assert_eq!(view.search_posts("ERROR").len(), 1);
        assert_eq!(view.search_works("").len(), view.works.len());
        assert_eq!(view.posts_tagged("design").len(), 1);
    }

    #[test]
    fn pagination_clamps() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 1, 3), (vec![1, 2, 3], 3));
        assert_eq!(paginate(&items, 3, 3), (vec![7], 3));
        assert_eq!(paginate(&items, 9, 3), (vec![7], 3));
        assert_eq!(paginate::<u32>(&[], 1, 3), (vec![], 1));
    }
}
