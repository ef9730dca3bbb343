use crate::content::Work;
use crate::designs::accent_style;
use crate::loader::Site;
use crate::render::{html_escape, is_safe_href, query_string};

/// Portfolio grid with tag filter chips and, when enabled, a search box.
pub fn render_grid(site: &Site, works: &[&Work], tag: Option<&str>, query: &str) -> (String, String) {
    let active = tag.map(slug::slugify).unwrap_or_default();
    let mut html = String::from("<section class=\"portfolio\"><h1>Portfolio</h1>");

    // Filter chips
    html.push_str("<div class=\"tag-filter\">");
    html.push_str(&format!(
        "<a class=\"tag{}\" href=\"{}\">All</a>",
        if active.is_empty() { " active" } else { "" },
        html_escape(&site.link(&format!("/portfolio{}", query_string(&[("q", query)]))))
    ));
    for t in site.view.tags() {
        let s = slug::slugify(&t);
        html.push_str(&format!(
            "<a class=\"tag{}\" href=\"{}\">{}</a>",
            if s == active { " active" } else { "" },
            html_escape(&site.link(&format!("/portfolio{}", query_string(&[("tag", &s), ("q", query)])))),
            html_escape(&t)
        ));
    }
    html.push_str("</div>");

    if site.config.features.search {
        html.push_str(&search_form(site, "/portfolio", query, &active));
    }

    if works.is_empty() {
        html.push_str("<p class=\"empty\">No projects match.</p>");
    } else {
        html.push_str(&format!(
            "<div class=\"work-grid\" style=\"--columns:{}\">",
            site.config.layout.portfolio_columns.clamp(1, 4)
        ));
        for w in works {
            html.push_str(&work_card(site, w));
        }
        html.push_str("</div>");
    }

    html.push_str("</section>");
    (html, CSS.to_string())
}

fn work_card(site: &Site, w: &Work) -> String {
    let image = if w.image.trim().is_empty() {
        "<div class=\"work-thumb work-thumb-blank\"></div>".to_string()
    } else {
        format!(
            "<img class=\"work-thumb\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            html_escape(&w.image),
            html_escape(&w.title)
        )
    };
    format!(
        "<a class=\"card work-card accent-bar\" href=\"{href}\"{style}>{image}<h3>{title}</h3><span class=\"meta\">{category}</span></a>",
        href = html_escape(&site.link(&format!("/portfolio/{}", w.id))),
        style = accent_style(w.color.as_ref()),
        image = image,
        title = html_escape(&w.title),
        category = html_escape(&w.category),
    )
}

pub(crate) fn search_form(site: &Site, action: &str, query: &str, tag: &str) -> String {
    let mut hidden = String::new();
    if !tag.is_empty() {
        hidden.push_str(&format!("<input type=\"hidden\" name=\"tag\" value=\"{}\">", html_escape(tag)));
    }
    if let Some(token) = site.request.token.as_deref() {
        hidden.push_str(&format!("<input type=\"hidden\" name=\"token\" value=\"{}\">", html_escape(token)));
    }
    format!(
        "<form class=\"search-form\" method=\"get\" action=\"{}\">{}<input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search…\"><button class=\"btn btn-small\" type=\"submit\">Search</button></form>",
        action,
        hidden,
        html_escape(query)
    )
}

/// Single project page.
pub fn render_single(site: &Site, w: &Work) -> (String, String) {
    let mut html = format!(
        "<article class=\"work-single accent-bar card\"{}><a class=\"meta\" href=\"{}\">&larr; Portfolio</a><h1>{}</h1>",
        accent_style(w.color.as_ref()),
        html_escape(&site.link("/portfolio")),
        html_escape(&w.title)
    );

    let mut meta = Vec::new();
    if !w.category.is_empty() {
        meta.push(html_escape(&w.category));
    }
    if !w.client.is_empty() {
        meta.push(format!("Client: {}", html_escape(&w.client)));
    }
    if !meta.is_empty() {
        html.push_str(&format!("<p class=\"meta\">{}</p>", meta.join(" · ")));
    }
    if !w.image.trim().is_empty() {
        html.push_str(&format!(
            "<img class=\"work-hero\" src=\"{}\" alt=\"{}\">",
            html_escape(&w.image),
            html_escape(&w.title)
        ));
    }
    for para in w.description.split("\n\n").filter(|p| !p.trim().is_empty()) {
        html.push_str(&format!("<p>{}</p>", html_escape(para.trim())));
    }
    if !w.tags.is_empty() {
        html.push_str("<div class=\"work-tags\">");
        for t in &w.tags {
            html.push_str(&format!(
                "<a class=\"tag\" href=\"{}\">{}</a>",
                html_escape(&site.link(&format!("/portfolio?tag={}", slug::slugify(t)))),
                html_escape(t)
            ));
        }
        html.push_str("</div>");
    }
    if is_safe_href(&w.link) {
        html.push_str(&format!(
            "<p><a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Visit project</a></p>",
            html_escape(&w.link)
        ));
    }
    html.push_str("</article>");
    (html, CSS.to_string())
}

const CSS: &str = r#"
.tag-filter { margin: 8px 0 16px; }
.search-form { display: flex; gap: 8px; margin-bottom: 20px; }
.search-form input[type=search] { flex: 1; max-width: 320px; padding: 6px 12px; border-radius: 999px; border: 1px solid var(--color-border); background: var(--color-surface); color: var(--color-text); }
.work-grid { display: grid; grid-template-columns: repeat(var(--columns, 3), minmax(0, 1fr)); gap: 18px; }
.work-card { text-decoration: none; color: var(--color-text); display: flex; flex-direction: column; gap: 6px; }
.work-thumb { width: 100%; aspect-ratio: 4 / 3; object-fit: cover; border-radius: 8px; }
.work-thumb-blank { background: var(--accent, var(--gradient-primary)); opacity: .85; }
.work-hero { width: 100%; border-radius: 10px; margin: 12px 0; }
.work-tags { margin: 12px 0; }
@media (max-width: 800px) { .work-grid { grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); } }
"#;
