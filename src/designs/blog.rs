use crate::content::Post;
use crate::designs::accent_style;
use crate::designs::portfolio::search_form;
use crate::loader::Site;
use crate::render::{build_pagination, format_date, html_escape, markdown_to_html, query_string, truncate_words};

/// Which slice of the blog the list shows.
pub struct ListState<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub query: &'a str,
    pub tag: &'a str,
}

/// Blog index: one page of post cards, search box, pagination.
pub fn render_list(site: &Site, posts: &[Post], state: &ListState) -> (String, String) {
    let mut html = String::from("<section class=\"blog\"><h1>Blog</h1>");

    if !state.tag.is_empty() {
        html.push_str(&format!(
            "<p class=\"meta\">Tagged <span class=\"tag active\">{}</span> <a href=\"{}\">clear</a></p>",
            html_escape(state.tag),
            html_escape(&site.link("/blog"))
        ));
    }
    if site.config.features.search {
        html.push_str(&search_form(site, "/blog", state.query, state.tag));
    }

    if posts.is_empty() {
        html.push_str("<p class=\"empty\">No posts found.</p>");
    } else {
        html.push_str("<div class=\"post-list\">");
        for p in posts {
            let summary = if p.excerpt.trim().is_empty() {
                truncate_words(&p.content, 30)
            } else {
                p.excerpt.clone()
            };
            html.push_str(&format!(
                "<article class=\"card post-card accent-bar\"{style}><span class=\"meta\">{date}</span>\
                 <h2><a href=\"{href}\">{title}</a></h2><p>{summary}</p>{tags}</article>",
                style = accent_style(p.color.as_ref()),
                date = html_escape(&format_date(&p.date)),
                href = html_escape(&site.link(&format!("/blog/{}", p.id))),
                title = html_escape(&p.title),
                summary = html_escape(&summary),
                tags = post_tags(site, p),
            ));
        }
        html.push_str("</div>");
    }

    html.push_str(&build_pagination(state.page, state.total_pages, |page| {
        let page = page.to_string();
        site.link(&format!(
            "/blog{}",
            query_string(&[("q", state.query), ("tag", state.tag), ("page", &page)])
        ))
    }));
    html.push_str("</section>");
    (html, CSS.to_string())
}

fn post_tags(site: &Site, p: &Post) -> String {
    if p.tags.is_empty() {
        return String::new();
    }
    let links: String = p
        .tags
        .iter()
        .map(|t| {
            format!(
                "<a class=\"tag\" href=\"{}\">{}</a>",
                html_escape(&site.link(&format!("/blog?tag={}", slug::slugify(t)))),
                html_escape(t)
            )
        })
        .collect();
    format!("<div class=\"post-tags\">{}</div>", links)
}

/// Single post with its markdown body rendered.
pub fn render_single(site: &Site, p: &Post) -> (String, String) {
    let hero = if p.image.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<img class=\"post-hero\" src=\"{}\" alt=\"{}\">",
            html_escape(&p.image),
            html_escape(&p.title)
        )
    };
    let body = if p.content.trim().is_empty() {
        format!("<p>{}</p>", html_escape(&p.excerpt))
    } else {
        markdown_to_html(&p.content)
    };
    let html = format!(
        "<article class=\"post-single\"{style}><a class=\"meta\" href=\"{back}\">&larr; Blog</a>\
         <h1>{title}</h1><p class=\"meta\">{date}</p>{hero}<div class=\"post-body\">{body}</div>{tags}</article>",
        style = accent_style(p.color.as_ref()),
        back = html_escape(&site.link("/blog")),
        title = html_escape(&p.title),
        date = html_escape(&format_date(&p.date)),
        hero = hero,
        body = body,
        tags = post_tags(site, p),
    );
    (html, CSS.to_string())
}

const CSS: &str = r#"
.post-list { display: flex; flex-direction: column; gap: 16px; }
.post-card h2 { margin: 4px 0 8px; font-size: 1.25rem; }
.post-card h2 a { color: var(--color-emphasis); text-decoration: none; }
.post-single { max-width: 720px; }
.post-single h1 { border-left: 4px solid var(--accent, var(--color-primary)); padding-left: 12px; }
.post-hero { width: 100%; border-radius: 10px; margin: 12px 0; }
.post-body { margin: 20px 0; }
.post-body pre { background: var(--color-surface); padding: 12px; border-radius: 8px; overflow-x: auto; }
.post-body ul, .post-body ol { margin: 0 0 12px 22px; }
"#;
