use crate::loader::Site;
use crate::render::{parse_date, url_encode};
use crate::rss::xml_escape;

/// sitemap.xml for the sections the site has switched on.
pub fn generate_sitemap(site: &Site, site_url: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    let features = &site.config.features;

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    let mut push = |path: &str, lastmod: Option<String>, priority: &str| {
        let lastmod = lastmod
            .map(|d| format!("<lastmod>{}</lastmod>", d))
            .unwrap_or_default();
        xml.push_str(&format!(
            "  <url><loc>{}{}</loc>{}<priority>{}</priority></url>\n",
            xml_escape(site_url),
            xml_escape(path),
            lastmod,
            priority
        ));
    };

    push("/", None, "1.0");
    if features.resume {
        push("/resume", None, "0.8");
    }
    if features.portfolio {
        push("/portfolio", None, "0.8");
        for w in &site.view.works {
            push(&format!("/portfolio/{}", url_encode(&w.id)), None, "0.6");
        }
    }
    if features.blog {
        push("/blog", None, "0.8");
        for p in &site.view.blogs {
            let lastmod = parse_date(&p.date).map(|d| d.format("%Y-%m-%d").to_string());
            push(&format!("/blog/{}", url_encode(&p.id)), lastmod, "0.6");
        }
    }
    push("/contact", None, "0.5");

    xml.push_str("</urlset>");
    xml
}

pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        site_url.trim_end_matches('/')
    )
}
