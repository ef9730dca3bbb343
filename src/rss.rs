use chrono::NaiveDate;

use crate::loader::Site;
use crate::render::{parse_date, url_encode};

/// Number of posts the feed carries.
const FEED_COUNT: usize = 25;

/// RSS 2.0 feed of the site's blog posts, newest first. Undated posts go last.
pub fn generate_feed(site: &Site, site_url: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    let title = if site.config.site.title.trim().is_empty() {
        site.view.about.name.as_str()
    } else {
        site.config.site.title.as_str()
    };

    let mut posts: Vec<(&crate::content::Post, Option<NaiveDate>)> =
        site.view.blogs.iter().map(|p| (p, parse_date(&p.date))).collect();
    posts.sort_by(|a, b| b.1.cmp(&a.1));
    posts.truncate(FEED_COUNT);

    let last_build = posts
        .first()
        .and_then(|(_, d)| *d)
        .map(|d| format!("    <lastBuildDate>{}</lastBuildDate>\n", rfc2822(d)))
        .unwrap_or_default();

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{title}</title>
    <link>{url}</link>
    <description>{desc}</description>
    <atom:link href="{url}/feed" rel="self" type="application/rss+xml"/>
    <language>en</language>
{last_build}"#,
        title = xml_escape(title),
        url = xml_escape(site_url),
        desc = xml_escape(&site.config.site.description),
        last_build = last_build,
    );

    for (post, date) in &posts {
        let link = format!("{}/blog/{}", site_url, url_encode(&post.id));
        let pub_date = date
            .map(|d| format!("\n        <pubDate>{}</pubDate>", rfc2822(d)))
            .unwrap_or_default();
        xml.push_str(&format!(
            r#"    <item>
        <title>{title}</title>
        <link>{link}</link>
        <guid isPermaLink="true">{link}</guid>{date}
        <description>{desc}</description>
    </item>
"#,
            title = xml_escape(&post.title),
            link = xml_escape(&link),
            date = pub_date,
            desc = xml_escape(&post.excerpt),
        ));
    }

    xml.push_str("</channel>\n</rss>");
    xml
}

fn rfc2822(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y 00:00:00 +0000").to_string()
}

pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_rfc2822() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(rfc2822(d), "Fri, 01 Mar 2024 00:00:00 +0000");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(xml_escape("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
