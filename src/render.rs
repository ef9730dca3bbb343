use pulldown_cmark::{html, Event, Options, Parser};

use crate::content::Social;
use crate::loader::Site;
use crate::typography;

/// Which top-level section a page belongs to. Drives the active nav link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Resume,
    Portfolio,
    Blog,
    Contact,
    Other,
}

/// One page ready for the site shell.
pub struct PageFrame {
    pub title: String,
    pub section: Section,
    /// Path of the current page, used as the mode toggle's return target.
    pub path: String,
    pub body: String,
    pub extra_css: String,
}

impl PageFrame {
    pub fn new(title: &str, section: Section, path: &str, body: String) -> Self {
        PageFrame {
            title: title.to_string(),
            section,
            path: path.to_string(),
            body,
            extra_css: String::new(),
        }
    }

    pub fn with_css(mut self, css: &str) -> Self {
        self.extra_css = css.to_string();
        self
    }
}

/// Render a full HTML document: theme variables, fonts, navigation, footer.
pub fn render_page(site: &Site, frame: &PageFrame) -> String {
    let cfg = &site.config;
    let site_title = if cfg.site.title.trim().is_empty() {
        site.view.about.name.clone()
    } else {
        cfg.site.title.clone()
    };
    let page_title = if frame.title.is_empty() || frame.title == site_title {
        site_title.clone()
    } else {
        format!("{} | {}", frame.title, site_title)
    };

    let nav_links = build_nav_links(site, frame.section);
    let tools = build_header_tools(site, &frame.path);
    let socials = build_social_links(&site.view.socials);
    let footer_text = if cfg.site.footer.trim().is_empty() {
        format!("&copy; {}", html_escape(&site_title))
    } else {
        html_escape(&cfg.site.footer)
    };

    let warning_html = if cfg.features.show_warnings && !site.warnings.is_empty() {
        let items: String = site
            .warnings
            .iter()
            .map(|w| format!("<li>{}</li>", html_escape(w)))
            .collect();
        format!(
            "<div class=\"site-warning\" data-warning role=\"status\"><strong>Showing fallback content.</strong><ul>{}</ul></div>",
            items
        )
    } else {
        String::new()
    };

    let brand = format!(
        "<a class=\"brand\" href=\"{}\">{}</a>",
        html_escape(&site.link("/")),
        html_escape(&site_title)
    );

    let chrome = if cfg.layout.side_nav() {
        let profile = if cfg.layout.sidebar_profile {
            build_profile_card(site)
        } else {
            String::new()
        };
        format!(
            r#"<div class="site-wrapper layout-side">
    <aside class="sidebar">
        {brand}
        {profile}
        <nav class="site-nav">{nav_links}</nav>
        <div class="sidebar-bottom">{tools}{socials}</div>
    </aside>
    <main class="content">
        {warning_html}{body}
        <footer class="site-footer"><div class="footer-text">{footer_text}</div></footer>
    </main>
</div>"#,
            brand = brand,
            profile = profile,
            nav_links = nav_links,
            tools = tools,
            socials = socials,
            warning_html = warning_html,
            body = frame.body,
            footer_text = footer_text,
        )
    } else {
        let profile = if cfg.layout.sidebar_profile {
            format!("<aside class=\"profile-column\">{}</aside>", build_profile_card(site))
        } else {
            String::new()
        };
        format!(
            r#"<header class="site-header{sticky}">
    {brand}
    <nav class="site-nav">{nav_links}</nav>
    <div class="header-tools">{tools}</div>
</header>
<div class="site-wrapper layout-top{with_profile}">
    {profile}
    <main class="content">
        {warning_html}{body}
    </main>
</div>
<footer class="site-footer">{socials}<div class="footer-text">{footer_text}</div></footer>"#,
            sticky = if cfg.layout.sticky_header { " sticky" } else { "" },
            brand = brand,
            nav_links = nav_links,
            tools = tools,
            with_profile = if profile.is_empty() { "" } else { " with-profile" },
            profile = profile,
            warning_html = warning_html,
            body = frame.body,
            socials = socials,
            footer_text = footer_text,
        )
    };

    let description = if cfg.site.description.trim().is_empty() {
        site.view.about.role.clone()
    } else {
        cfg.site.description.clone()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="{html_class}" data-theme="{theme_id}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    <meta name="description" content="{description}">
    <meta name="color-scheme" content="{html_class}">
    <link rel="alternate" type="application/rss+xml" title="{site_title}" href="/feed">
{font_links}    <style>
{theme_vars}
{base_css}
{extra_css}
    </style>
</head>
<body class="theme-{theme_id}" data-status="{status}">
{chrome}
</body>
</html>"#,
        html_class = site.theme.html_class(),
        theme_id = html_escape(&cfg.theme),
        page_title = html_escape(&page_title),
        description = html_escape(&description),
        site_title = html_escape(&site_title),
        font_links = typography::build_font_links(&cfg.fonts),
        theme_vars = site.theme.style_block(),
        base_css = BASE_CSS,
        extra_css = frame.extra_css,
        status = match site.status {
            crate::loader::LoadStatus::Error => "error",
            _ => "ready",
        },
        chrome = chrome,
    )
}

fn build_nav_links(site: &Site, active: Section) -> String {
    let features = &site.config.features;
    let mut links: Vec<(&str, &str, Section)> = vec![("/", "About", Section::About)];
    if features.resume {
        links.push(("/resume", "Resume", Section::Resume));
    }
    if features.portfolio {
        links.push(("/portfolio", "Portfolio", Section::Portfolio));
    }
    if features.blog {
        links.push(("/blog", "Blog", Section::Blog));
    }
    if features.contact_form {
        links.push(("/contact", "Contact", Section::Contact));
    }

    links
        .iter()
        .map(|(path, label, section)| {
            let class = if *section == active { "nav-link active" } else { "nav-link" };
            format!(
                "<a href=\"{}\" class=\"{}\">{}</a>",
                html_escape(&site.link(path)),
                class,
                label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mode toggle and CV download, whichever the feature flags allow.
fn build_header_tools(site: &Site, current_path: &str) -> String {
    let features = &site.config.features;
    let mut html = String::new();
    if features.mode_toggle {
        let other = site.mode.toggled();
        let next = site.link(current_path);
        let href = site.link(&format!("/mode/{}?next={}", other.as_str(), url_encode(&next)));
        html.push_str(&format!(
            "<a href=\"{}\" class=\"mode-toggle\" rel=\"nofollow\" title=\"Switch to {} mode\">{}</a>",
            html_escape(&href),
            other.as_str(),
            if other == crate::theme::Mode::Dark { "&#9790;" } else { "&#9788;" }
        ));
    }
    if features.resume && features.pdf_download {
        html.push_str(&format!(
            "<a href=\"{}\" class=\"btn btn-small cv-download\">Download CV</a>",
            html_escape(&site.link("/resume.pdf"))
        ));
    }
    html
}

pub fn build_profile_card(site: &Site) -> String {
    let about = &site.view.about;
    let avatar = if about.avatar.trim().is_empty() {
        format!("<div class=\"avatar avatar-initials\">{}</div>", html_escape(&initials(&about.name)))
    } else {
        format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            html_escape(&about.avatar),
            html_escape(&about.name)
        )
    };
    let mut details = String::new();
    for c in &site.view.contacts {
        details.push_str(&format!(
            "<li><span class=\"contact-label\">{}</span> {}</li>",
            html_escape(&c.label),
            html_escape(&c.value)
        ));
    }
    format!(
        r#"<div class="profile-card">
    {avatar}
    <h2 class="profile-name">{name}</h2>
    <p class="profile-role">{role}</p>
    <ul class="profile-details">{details}</ul>
</div>"#,
        avatar = avatar,
        name = html_escape(&about.name),
        role = html_escape(&about.role),
        details = details,
    )
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

pub fn build_social_links(socials: &[Social]) -> String {
    // (name, icon_svg)
    let icons: &[(&str, &str)] = &[
        ("github",
         r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"/></svg>"#),
        ("linkedin",
         r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/><rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/></svg>"#),
        ("instagram",
         r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="2" y="2" width="20" height="20" rx="5"/><path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z"/><line x1="17.5" y1="6.5" x2="17.51" y2="6.5"/></svg>"#),
        ("dribbble",
         r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><path d="M19.13 5.09C15.22 9.14 10 10.44 2.25 10.94"/><path d="M21.75 12.84c-6.62-1.41-12.14 1-16.38 6.32"/><path d="M8.56 2.75c4.37 6 6 12.56 6.44 19.5"/></svg>"#),
        ("x",
         r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="currentColor"><path d="M18.244 2.25h3.308l-7.227 8.26 8.502 11.24H16.17l-5.214-6.817L4.99 21.75H1.68l7.73-8.835L1.254 2.25H8.08l4.713 6.231zm-1.161 17.52h1.833L7.084 4.126H5.117z"/></svg>"#),
    ];

    let links: Vec<String> = socials
        .iter()
        .filter(|s| is_safe_href(&s.url))
        .map(|s| {
            let key = s.name.trim().to_lowercase();
            let key = if key == "twitter" { "x".to_string() } else { key };
            let label = icons
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, svg)| svg.to_string())
                .unwrap_or_else(|| html_escape(&s.name));
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" title=\"{}\">{}</a>",
                html_escape(&s.url),
                html_escape(&s.name),
                label
            )
        })
        .collect();

    if links.is_empty() {
        return String::new();
    }
    format!("<div class=\"social-links\">{}</div>", links.join("\n"))
}

/// Only http(s), mailto and site-relative links are rendered from tenant data.
pub fn is_safe_href(href: &str) -> bool {
    let h = href.trim().to_lowercase();
    h.starts_with("https://")
        || h.starts_with("http://")
        || h.starts_with("mailto:")
        || (h.starts_with('/') && !h.starts_with("//"))
}

/// Append the auth token to a site path, if there is one.
pub fn link(path: &str, token: Option<&str>) -> String {
    match token.filter(|t| !t.is_empty()) {
        Some(token) => {
            let sep = if path.contains('?') { '&' } else { '?' };
            format!("{}{}token={}", path, sep, url_encode(token))
        }
        None => path.to_string(),
    }
}

pub fn url_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render post markdown. Raw HTML in the source is shown as text.
pub fn markdown_to_html(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// `2024-05-14` (or an RFC 3339 timestamp) as `May 14, 2024`. Unparseable input is
/// returned unchanged.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn parse_date(raw: &str) -> Option<chrono::NaiveDate> {
    let raw = raw.trim();
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|d| d.date())
        })
}

pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        let mut result = words[..max_words].join(" ");
        result.push('…');
        result
    }
}

/// Page links; `href(page)` builds the target for each page number.
pub fn build_pagination(current: usize, total: usize, href: impl Fn(usize) -> String) -> String {
    if total <= 1 {
        return String::new();
    }
    let mut html = String::from(r#"<nav class="pagination">"#);
    if current > 1 {
        html.push_str(&format!(r#"<a href="{}">&laquo; Prev</a>"#, html_escape(&href(current - 1))));
    }
    for p in 1..=total {
        if p == current {
            html.push_str(&format!(r#"<span class="current">{}</span>"#, p));
        } else {
            html.push_str(&format!(r#"<a href="{}">{}</a>"#, html_escape(&href(p)), p));
        }
    }
    if current < total {
        html.push_str(&format!(r#"<a href="{}">Next &raquo;</a>"#, html_escape(&href(current + 1))));
    }
    html.push_str("</nav>");
    html
}

/// Query string from the non-empty pairs, e.g. `?q=rust&page=2`.
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, url_encode(v)))
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

pub fn render_not_found_body(site: &Site, what: &str) -> String {
    format!(
        r#"<section class="not-found"><h1>Not found</h1><p>That {} does not exist.</p><a class="btn" href="{}">&larr; Back home</a></section>"#,
        html_escape(what),
        html_escape(&site.link("/"))
    )
}

/// Bare error page for the catchers.
pub fn render_error_page(code: u16, message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>{code}</title></head>\
         <body style='font-family:sans-serif;text-align:center;padding:80px'>\
         <h1>{code}</h1><p>{message}</p><a href='/'>&larr; Home</a></body></html>",
        code = code,
        message = html_escape(message)
    )
}

const BASE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: var(--font-body);
    color: var(--color-text);
    background: var(--color-bg);
    line-height: 1.6;
}

a { color: var(--color-primary); }
h1, h2, h3, h4 { font-family: var(--font-heading); color: var(--color-emphasis); line-height: 1.25; }
h1 { font-size: 2rem; margin-bottom: .5rem; }
h2 { font-size: 1.4rem; margin: 1.5rem 0 .75rem; }
h3 { font-size: 1.1rem; }
p { margin-bottom: .75rem; }

.brand { font-family: var(--font-heading); font-weight: 700; font-size: 1.25rem; color: var(--color-emphasis); text-decoration: none; }

/* ── Top layout ── */
.site-header {
    display: flex;
    align-items: center;
    gap: 24px;
    padding: 16px 32px;
    background: var(--color-surface);
    border-bottom: 1px solid var(--color-border);
}
.site-header.sticky { position: sticky; top: 0; z-index: 10; }
.site-header .site-nav { display: flex; gap: 18px; flex: 1; }
.header-tools { display: flex; gap: 12px; align-items: center; }
.layout-top { max-width: 1100px; margin: 0 auto; padding: 32px; }
.layout-top.with-profile { display: grid; grid-template-columns: 280px 1fr; gap: 32px; align-items: start; }
.profile-column { position: sticky; top: 90px; }

/* ── Side layout ── */
.layout-side { display: flex; min-height: 100vh; }
.sidebar {
    width: 280px;
    position: fixed;
    top: 0;
    left: 0;
    height: 100vh;
    padding: 28px 24px;
    display: flex;
    flex-direction: column;
    gap: 20px;
    overflow-y: auto;
    background: var(--color-surface);
    border-right: 1px solid var(--color-border);
}
.sidebar .site-nav { display: flex; flex-direction: column; gap: 6px; }
.sidebar-bottom { margin-top: auto; display: flex; flex-direction: column; gap: 12px; }
.layout-side .content { margin-left: 280px; padding: 40px; flex: 1; max-width: 1000px; }

.nav-link { color: var(--color-text-secondary); text-decoration: none; font-weight: 500; }
.nav-link.active, .nav-link:hover { color: var(--color-primary); }

.mode-toggle { font-size: 1.2rem; text-decoration: none; color: var(--color-text); }
.btn {
    display: inline-block;
    padding: 10px 20px;
    border-radius: 999px;
    border: none;
    background: var(--gradient-primary);
    color: #fff;
    text-decoration: none;
    font-weight: 600;
    cursor: pointer;
}
.btn-small { padding: 6px 14px; font-size: .85rem; }

.profile-card { background: var(--color-surface); border: 1px solid var(--color-border); border-radius: 16px; padding: 24px; text-align: center; }
.avatar { width: 96px; height: 96px; border-radius: 50%; object-fit: cover; margin: 0 auto 12px; }
.avatar-initials { display: flex; align-items: center; justify-content: center; background: var(--gradient-primary); color: #fff; font-size: 2rem; font-weight: 700; }
.profile-role { color: var(--color-text-secondary); }
.profile-details { list-style: none; text-align: left; margin-top: 12px; font-size: .9rem; }
.contact-label { color: var(--color-text-secondary); }

.site-warning { border: 1px solid var(--color-border); border-left: 4px solid var(--color-secondary); padding: 12px 16px; margin-bottom: 20px; border-radius: 6px; background: var(--color-surface); font-size: .9rem; }
.site-warning ul { margin: 6px 0 0 18px; }
.flash { padding: 12px; margin-bottom: 16px; border-radius: 6px; font-size: 14px; }
.flash-success { background: rgba(34,197,94,.12); color: #16a34a; }
.flash-error { background: rgba(239,68,68,.12); color: #ef4444; }

.card { background: var(--color-surface); border: 1px solid var(--color-border); border-radius: 12px; padding: 20px; }
.accent-bar { border-top: 4px solid var(--accent, var(--color-primary)); }
.tag { display: inline-block; padding: 2px 10px; border-radius: 999px; font-size: .8rem; border: 1px solid var(--color-border); color: var(--color-text-secondary); text-decoration: none; margin: 0 4px 4px 0; }
.tag.active { background: var(--color-primary); color: #fff; border-color: var(--color-primary); }
.meta { color: var(--color-text-secondary); font-size: .85rem; }

.pagination { display: flex; gap: 8px; margin-top: 24px; }
.pagination a, .pagination span { padding: 4px 10px; border-radius: 6px; border: 1px solid var(--color-border); text-decoration: none; }
.pagination .current { background: var(--color-primary); color: #fff; }

.social-links { display: flex; gap: 12px; }
.social-links a { color: var(--color-text-secondary); }
.site-footer { padding: 24px 32px; color: var(--color-text-secondary); font-size: .85rem; display: flex; gap: 16px; justify-content: space-between; align-items: center; }
.not-found { text-align: center; padding: 60px 0; }

@media (max-width: 800px) {
    .layout-side { flex-direction: column; }
    .sidebar { position: static; width: 100%; height: auto; }
    .layout-side .content { margin-left: 0; padding: 20px; }
    .layout-top.with-profile { grid-template-columns: 1fr; }
    .site-header { flex-wrap: wrap; padding: 12px 16px; }
}
"#;
