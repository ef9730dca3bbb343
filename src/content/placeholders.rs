//! Bundled content shown whenever the tenant has not provided a collection.
//! Colors are left unset so the active palette's variants are cycled over them.

use super::{About, ContactEntry, Post, ResumeEntry, Service, Skill, Social, Work};

pub fn about() -> About {
    About {
        name: "Alex Morgan".into(),
        role: "Software Engineer".into(),
        bio: "I build reliable web services and tools. I care about clear interfaces, \
              honest documentation and software that keeps working on a bad day."
            .into(),
        avatar: String::new(),
        location: "Lisbon, Portugal".into(),
        email: "hello@example.com".into(),
        phone: "+351 900 000 000".into(),
        website: "https://example.com".into(),
        services: vec![
            service("Backend Development", "APIs, data pipelines and the plumbing between them."),
            service("Web Design", "Clean, accessible interfaces that load fast."),
            service("Technical Writing", "Docs and guides people actually read."),
            service("Consulting", "Architecture reviews and pragmatic roadmaps."),
        ],
    }
}

fn service(title: &str, description: &str) -> Service {
    Service {
        title: title.into(),
        description: description.into(),
        icon: String::new(),
        color: None,
    }
}

pub fn works() -> Vec<Work> {
    vec![
        work("1", "Weather Dashboard", "Web", &["Rust", "API"], "A compact dashboard aggregating forecasts from several providers."),
        work("2", "Recipe Finder", "Mobile", &["UI"], "Search recipes by the ingredients already in your kitchen."),
        work("3", "Brand Identity", "Design", &["Branding"], "Logo, palette and type system for a small coffee roaster."),
        work("4", "Task Queue", "Web", &["Rust"], "A durable job queue with retries and a small admin UI."),
        work("5", "Travel Journal", "Mobile", &["UI", "Offline"], "Offline-first journaling with map pins and photos."),
        work("6", "Annual Report", "Design", &["Print"], "Layout and infographics for a non-profit annual report."),
    ]
}

fn work(id: &str, title: &str, category: &str, tags: &[&str], description: &str) -> Work {
    Work {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: description.into(),
        image: String::new(),
        link: String::new(),
        client: String::new(),
        color: None,
    }
}

pub fn blogs() -> Vec<Post> {
    vec![
        post(
            "1",
            "Shipping small, shipping often",
            "2024-05-14",
            "Why tiny releases beat big-bang launches.",
            "Small releases are easier to review, easier to roll back and easier to reason about.\n\n\
             Keep each change focused and the feedback loop short.",
            &["process"],
        ),
        post(
            "2",
            "Designing with constraints",
            "2024-03-02",
            "A fixed palette and a single typeface go a long way.",
            "Constraints remove decisions. A limited palette forces hierarchy through *spacing* \
             and *weight* instead of color.",
            &["design"],
        ),
        post(
            "3",
            "Notes on error handling",
            "2023-11-20",
            "Every failure path should end somewhere useful.",
            "An error that reaches the user should tell them what happened and what to do next.\n\n\
             - log the cause\n- show a fallback\n- keep their input",
            &["engineering"],
        ),
    ]
}

fn post(id: &str, title: &str, date: &str, excerpt: &str, content: &str, tags: &[&str]) -> Post {
    Post {
        id: id.into(),
        title: title.into(),
        date: date.into(),
        excerpt: excerpt.into(),
        content: content.into(),
        image: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        color: None,
    }
}

pub fn experiences() -> Vec<ResumeEntry> {
    vec![
        entry("Senior Software Engineer", "Northwind Labs", "2021 - Present", "Lead the platform team; own the public API and its SDKs."),
        entry("Software Engineer", "Acme Corp", "2018 - 2021", "Built internal tooling and the billing service."),
        entry("Junior Developer", "Studio Pixel", "2016 - 2018", "Front-end work for agency clients."),
    ]
}

pub fn educations() -> Vec<ResumeEntry> {
    vec![
        entry("MSc Computer Science", "University of Lisbon", "2014 - 2016", "Thesis on distributed caching."),
        entry("BSc Computer Engineering", "University of Porto", "2011 - 2014", ""),
    ]
}

fn entry(title: &str, organization: &str, period: &str, description: &str) -> ResumeEntry {
    ResumeEntry {
        title: title.into(),
        organization: organization.into(),
        period: period.into(),
        description: description.into(),
        color: None,
    }
}

pub fn skills() -> Vec<Skill> {
    [("Rust", 90), ("TypeScript", 80), ("SQL", 75), ("UI Design", 65), ("Writing", 85)]
        .iter()
        .map(|(name, level)| Skill {
            name: name.to_string(),
            level: *level,
            color: None,
        })
        .collect()
}

pub fn knowledges() -> Vec<String> {
    [
        "Distributed Systems",
        "REST APIs",
        "PostgreSQL",
        "Docker",
        "CI/CD",
        "Accessibility",
        "Typography",
        "Mentoring",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

pub fn contacts() -> Vec<ContactEntry> {
    vec![
        contact("phone", "Phone", "+351 900 000 000"),
        contact("email", "Email", "hello@example.com"),
        contact("location", "Location", "Lisbon, Portugal"),
    ]
}

fn contact(kind: &str, label: &str, value: &str) -> ContactEntry {
    ContactEntry {
        kind: kind.into(),
        label: label.into(),
        value: value.into(),
        color: None,
    }
}

pub fn socials() -> Vec<Social> {
    vec![
        Social {
            name: "GitHub".into(),
            url: "https://github.com/".into(),
        },
        Social {
            name: "LinkedIn".into(),
            url: "https://www.linkedin.com/".into(),
        },
    ]
}
