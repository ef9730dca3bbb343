use crate::designs::accent_style;
use crate::loader::Site;
use crate::render::{format_date, html_escape, initials, truncate_words};

/// About page: intro, services, and teasers for the latest works and posts.
pub fn render_body(site: &Site) -> (String, String) {
    let about = &site.view.about;
    let features = &site.config.features;

    let mut html = String::from("<section class=\"about\">");

    // Intro (the sidebar already shows the profile card when enabled)
    if !site.config.layout.sidebar_profile {
        let avatar = if about.avatar.trim().is_empty() {
            format!("<div class=\"avatar avatar-initials\">{}</div>", html_escape(&initials(&about.name)))
        } else {
            format!(
                "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
                html_escape(&about.avatar),
                html_escape(&about.name)
            )
        };
        html.push_str(&format!(
            "<div class=\"about-intro\">{}<div><p class=\"eyebrow\">{}</p></div></div>",
            avatar,
            html_escape(&about.role)
        ));
    }
    html.push_str(&format!("<h1>{}</h1>", html_escape(&about.name)));
    for para in about.bio.split("\n\n").filter(|p| !p.trim().is_empty()) {
        html.push_str(&format!("<p class=\"bio\">{}</p>", html_escape(para.trim())));
    }

    if !about.services.is_empty() {
        html.push_str("<h2 class=\"section-title\">What I do</h2><div class=\"service-grid\">");
        for s in &about.services {
            html.push_str(&format!(
                "<div class=\"card service-card accent-bar\"{}><h3>{}</h3><p>{}</p></div>",
                accent_style(s.color.as_ref()),
                html_escape(&s.title),
                html_escape(&s.description)
            ));
        }
        html.push_str("</div>");
    }

    if features.portfolio && !site.view.works.is_empty() {
        html.push_str("<h2 class=\"section-title\">Recent work</h2><div class=\"teaser-grid\">");
        for w in site.view.works.iter().take(3) {
            html.push_str(&format!(
                "<a class=\"card teaser accent-bar\" href=\"{}\"{}><h3>{}</h3><span class=\"meta\">{}</span></a>",
                html_escape(&site.link(&format!("/portfolio/{}", w.id))),
                accent_style(w.color.as_ref()),
                html_escape(&w.title),
                html_escape(&w.category)
            ));
        }
        html.push_str("</div>");
    }

    if features.blog && !site.view.blogs.is_empty() {
        html.push_str("<h2 class=\"section-title\">Latest posts</h2><ul class=\"post-teasers\">");
        for p in site.view.blogs.iter().take(2) {
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a> <span class=\"meta\">{}</span><p>{}</p></li>",
                html_escape(&site.link(&format!("/blog/{}", p.id))),
                html_escape(&p.title),
                html_escape(&format_date(&p.date)),
                html_escape(&truncate_words(&p.excerpt, 24))
            ));
        }
        html.push_str("</ul>");
    }

    html.push_str("</section>");
    (html, CSS.to_string())
}

const CSS: &str = r#"
.about-intro { display: flex; gap: 16px; align-items: center; margin-bottom: 12px; }
.about-intro .avatar { margin: 0; }
.eyebrow { color: var(--color-primary); font-weight: 600; letter-spacing: .04em; }
.bio { max-width: 680px; color: var(--color-text-secondary); }
.service-grid, .teaser-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 16px; }
.teaser { text-decoration: none; color: var(--color-text); }
.post-teasers { list-style: none; display: flex; flex-direction: column; gap: 12px; }
"#;
