//! Content entities served by the tenant content endpoint.
//!
//! Parsing is lenient: a malformed entry is dropped instead of failing the bundle,
//! and a malformed `about` block counts as absent.

pub mod placeholders;
pub mod view;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: Option<String>,
}

/// Portfolio item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub image: String,
    pub link: String,
    pub client: String,
    pub color: Option<String>,
}

impl Work {
    /// Category followed by tags, without blanks or duplicates.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for t in std::iter::once(&self.category).chain(self.tags.iter()) {
            let t = t.trim();
            if !t.is_empty() && !out.iter().any(|o| o.eq_ignore_ascii_case(t)) {
                out.push(t);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    /// ISO date (`2024-03-01`) or RFC 3339 timestamp.
    pub date: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub image: String,
    pub tags: Vec<String>,
    pub color: Option<String>,
}

/// One experience or education row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeEntry {
    pub title: String,
    pub organization: String,
    pub period: String,
    pub description: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    /// 0–100.
    #[serde(deserialize_with = "de_level")]
    pub level: u8,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactEntry {
    /// `phone`, `email`, `location`, ...
    pub kind: String,
    pub label: String,
    pub value: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub name: String,
    pub url: String,
}

/// Everything the content endpoint may return. Empty collections mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentBundle {
    pub about: Option<About>,
    pub works: Vec<Work>,
    pub blogs: Vec<Post>,
    pub experiences: Vec<ResumeEntry>,
    pub educations: Vec<ResumeEntry>,
    pub skills: Vec<Skill>,
    pub knowledges: Vec<String>,
    pub contacts: Vec<ContactEntry>,
    pub socials: Vec<Social>,
}

impl ContentBundle {
    pub fn from_value(v: &Value) -> ContentBundle {
        let about = v
            .get("about")
            .filter(|a| a.is_object())
            .and_then(|a| serde_json::from_value::<About>(a.clone()).ok())
            .filter(|a| !a.name.trim().is_empty());

        ContentBundle {
            about,
            works: items(v, "works"),
            blogs: items(v, "blogs"),
            experiences: items(v, "experiences"),
            educations: items(v, "educations"),
            skills: items(v, "skills"),
            knowledges: items::<String>(v, "knowledges")
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            contacts: items(v, "contacts"),
            socials: items(v, "socials"),
        }
    }
}

fn items<T: DeserializeOwned>(v: &Value, key: &str) -> Vec<T> {
    let Some(Value::Array(raw)) = v.get(key) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(raw.len());
    for (i, entry) in raw.iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(item) => out.push(item),
            Err(e) => log::debug!("Dropping malformed {}[{}]: {}", key, i, e),
        }
    }
    out
}

/// Ids arrive as strings or numbers.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Levels arrive as numbers, numeric strings or "85%".
fn de_level<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let raw = match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_entries_are_dropped() {
        let v = json!({
            "works": [
                {"id": 1, "title": "Good"},
                {"title": 42},
                "nonsense",
                {"id": "b", "title": "Also good", "tags": ["web"]},
            ],
        });
        let bundle = ContentBundle::from_value(&v);
        assert_eq!(bundle.works.len(), 2);
        assert_eq!(bundle.works[0].id, "1");
        assert_eq!(bundle.works[1].tags, vec!["web".to_string()]);
    }

    #[test]
    fn about_without_name_counts_as_absent() {
        let bundle = ContentBundle::from_value(&json!({"about": {"bio": "x"}}));
        assert!(bundle.about.is_none());
        let bundle = ContentBundle::from_value(&json!({"about": {"name": "Ada"}}));
        assert_eq!(bundle.about.unwrap().name, "Ada");
    }

    #[test]
    fn skill_levels_are_lenient() {
        let v = json!({"skills": [
            {"name": "Rust", "level": 92.4},
            {"name": "Go", "level": "70%"},
            {"name": "C", "level": 400},
            {"name": "Zig"},
        ]});
        let levels: Vec<u8> = ContentBundle::from_value(&v).skills.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![92, 70, 100, 0]);
    }

    #[test]
    fn non_object_bundle_is_empty() {
        assert_eq!(ContentBundle::from_value(&json!([1, 2])), ContentBundle::default());
    }

    #[test]
    fn work_tags_merge_category() {
        let w = Work {
            category: "Web".into(),
            tags: vec!["web".into(), "Rust".into(), " ".into()],
            ..Work::default()
        };
        assert_eq!(w.all_tags(), vec!["Web", "Rust"]);
    }
}
