use std::io::Cursor;

use rocket::form::Form;
use rocket::http::uri::Origin;
use rocket::http::{ContentType, Cookie, CookieJar, SameSite};
use rocket::request::FlashMessage;
use rocket::response::content::{RawHtml, RawXml};
use rocket::response::{self, Flash, Redirect, Responder, Response};
use rocket::serde::json::Json;
use rocket::{Request, State};

use crate::api::ContactMessage;
use crate::content::view::paginate;
use crate::content::{Post, Work};
use crate::designs;
use crate::health::{self, HealthReport};
use crate::loader::Site;
use crate::pdf::{self, CvData, Template};
use crate::rate_limit::RateLimiter;
use crate::render::{render_not_found_body, render_page, PageFrame, Section};
use crate::routes::{deliver_contact, ClientIp, SiteContext};
use crate::theme::{Mode, MODE_COOKIE};

/// Wrap a design body in the site shell, with the theme's overrides after the page css.
fn page(site: &Site, title: &str, section: Section, path: &str, (body, css): (String, String)) -> RawHtml<String> {
    let css = format!("{}{}", css, designs::theme_css(&site.config.theme));
    let frame = PageFrame::new(title, section, path, body).with_css(&css);
    RawHtml(render_page(site, &frame))
}

fn not_found(site: &Site, what: &str, section: Section) -> RawHtml<String> {
    let body = render_not_found_body(site, what);
    RawHtml(render_page(site, &PageFrame::new("Not found", section, "/", body)))
}

// ── About ──────────────────────────────────────────────

#[get("/?<token>")]
pub async fn about(ctx: SiteContext<'_>, token: Option<String>) -> RawHtml<String> {
    let site = ctx.site(token).await;
    let title = site.view.about.name.clone();
    page(&site, &title, Section::About, "/", designs::about::render_body(&site))
}

// ── Resume ─────────────────────────────────────────────

#[get("/resume?<token>")]
pub async fn resume(ctx: SiteContext<'_>, token: Option<String>) -> Option<RawHtml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.resume {
        return None;
    }
    Some(page(&site, "Resume", Section::Resume, "/resume", designs::resume::render_body(&site)))
}

/// A generated CV, sent as a download.
pub struct PdfDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl<'r> Responder<'r, 'static> for PdfDownload {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::PDF)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .raw_header("Cache-Control", "no-store")
            .sized_body(self.bytes.len(), Cursor::new(self.bytes))
            .ok()
    }
}

#[get("/resume.pdf?<template>&<token>")]
pub async fn resume_pdf(
    ctx: SiteContext<'_>,
    template: Option<&str>,
    token: Option<String>,
) -> Option<PdfDownload> {
    let site = ctx.site(token).await;
    let features = &site.config.features;
    if !features.resume || !features.pdf_download {
        return None;
    }

    let template = template
        .and_then(Template::parse)
        .or_else(|| Template::parse(&site.config.layout.cv_template))
        .unwrap_or_default();
    let data = CvData::from_view(&site.view);
    let doc = pdf::render(template, &data, &site.palette, site.mode);
    let bytes = doc.to_bytes();
    log::info!(
        "CV download: {} template, {} bytes for {}",
        template.as_str(),
        bytes.len(),
        site.request.label()
    );
    Some(PdfDownload {
        filename: data.filename(),
        bytes,
    })
}

// ── Portfolio ──────────────────────────────────────────

#[get("/portfolio?<tag>&<q>&<token>")]
pub async fn portfolio(
    ctx: SiteContext<'_>,
    tag: Option<&str>,
    q: Option<&str>,
    token: Option<String>,
) -> Option<RawHtml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.portfolio {
        return None;
    }
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());
    let query = if site.config.features.search { q.unwrap_or("").trim() } else { "" };

    let mut works: Vec<&Work> = match tag {
        Some(t) => site.view.works_by_tag(t),
        None => site.view.works.iter().collect(),
    };
    if !query.is_empty() {
        let hits = site.view.search_works(query);
        works.retain(|w| hits.iter().any(|h| std::ptr::eq(*h, *w)));
    }

    let body = designs::portfolio::render_grid(&site, &works, tag, query);
    Some(page(&site, "Portfolio", Section::Portfolio, "/portfolio", body))
}

#[get("/portfolio/<id>?<token>")]
pub async fn portfolio_single(ctx: SiteContext<'_>, id: &str, token: Option<String>) -> Option<RawHtml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.portfolio {
        return None;
    }
    let path = format!("/portfolio/{}", id);
    Some(match site.view.work(id) {
        Some(w) => page(&site, &w.title, Section::Portfolio, &path, designs::portfolio::render_single(&site, w)),
        None => not_found(&site, "project", Section::Portfolio),
    })
}

// ── Blog ───────────────────────────────────────────────

#[get("/blog?<page>&<q>&<tag>&<token>")]
pub async fn blog_list(
    ctx: SiteContext<'_>,
    page: Option<usize>,
    q: Option<&str>,
    tag: Option<&str>,
    token: Option<String>,
) -> Option<RawHtml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.blog {
        return None;
    }
    let tag = tag.unwrap_or("").trim();
    let query = if site.config.features.search { q.unwrap_or("").trim() } else { "" };

    let mut posts: Vec<&Post> = if tag.is_empty() {
        site.view.blogs.iter().collect()
    } else {
        site.view.posts_tagged(tag)
    };
    if !query.is_empty() {
        let hits = site.view.search_posts(query);
        posts.retain(|p| hits.iter().any(|h| std::ptr::eq(*h, *p)));
    }

    let (slice, total_pages) = paginate(&posts, page.unwrap_or(1), site.config.layout.posts_per_page);
    let shown: Vec<Post> = slice.into_iter().cloned().collect();
    let state = designs::blog::ListState {
        page: page.unwrap_or(1).clamp(1, total_pages),
        total_pages,
        query,
        tag,
    };
    let body = designs::blog::render_list(&site, &shown, &state);
    Some(self::page(&site, "Blog", Section::Blog, "/blog", body))
}

#[get("/blog/<id>?<token>")]
pub async fn blog_single(ctx: SiteContext<'_>, id: &str, token: Option<String>) -> Option<RawHtml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.blog {
        return None;
    }
    let path = format!("/blog/{}", id);
    Some(match site.view.post(id) {
        Some(p) => page(&site, &p.title, Section::Blog, &path, designs::blog::render_single(&site, p)),
        None => not_found(&site, "post", Section::Blog),
    })
}

// ── Contact ────────────────────────────────────────────

#[derive(Debug, Default, FromForm)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Honeypot; people never see it, bots fill it in.
    #[field(name = "_honey")]
    pub honey: Option<String>,
}

impl ContactForm {
    fn to_message(&self) -> ContactMessage {
        ContactMessage::new(
            self.name.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or(""),
            self.message.as_deref().unwrap_or(""),
        )
    }
}

pub const CONTACT_SENT: &str = "Thanks! Your message has been sent.";

#[get("/contact?<token>")]
pub async fn contact(
    ctx: SiteContext<'_>,
    token: Option<String>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let site = ctx.site(token).await;
    let flash = flash.as_ref().map(|f| (f.kind(), f.message()));
    let body = designs::contact::render_body(&site, &ContactMessage::default(), flash);
    page(&site, "Contact", Section::Contact, "/contact", body)
}

#[post("/contact?<token>", data = "<form>")]
pub async fn contact_submit(
    ctx: SiteContext<'_>,
    token: Option<String>,
    form: Form<ContactForm>,
    client_ip: ClientIp,
    limiter: &State<RateLimiter>,
) -> Option<Result<Flash<Redirect>, RawHtml<String>>> {
    let site = ctx.site(token).await;
    if !site.config.features.contact_form {
        return None;
    }
    let back = site.link("/contact");

    if form.honey.as_deref().is_some_and(|h| !h.trim().is_empty()) {
        log::info!("Dropped contact submission with filled honeypot for {}", site.request.label());
        return Some(Ok(Flash::success(Redirect::to(back), CONTACT_SENT)));
    }

    let msg = form.to_message();
    match deliver_contact(&ctx, limiter.inner(), &client_ip, &site.request, &msg).await {
        Ok(()) => Some(Ok(Flash::success(Redirect::to(back), CONTACT_SENT))),
        Err(e) => {
            let body = designs::contact::render_body(&site, &msg, Some(("error", e.as_str())));
            Some(Err(page(&site, "Contact", Section::Contact, "/contact", body)))
        }
    }
}

// ── Light / dark mode ──────────────────────────────────

/// `next` if it is a path on this site, otherwise the home page.
pub fn local_target(next: Option<&str>) -> String {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.starts_with("/\\") && Origin::parse(n).is_ok() => {
            n.to_string()
        }
        _ => "/".to_string(),
    }
}

#[get("/mode/<mode>?<next>")]
pub fn set_mode(mode: &str, next: Option<&str>, cookies: &CookieJar<'_>) -> Option<Redirect> {
    let mode = Mode::parse(mode)?;
    cookies.add(
        Cookie::build((MODE_COOKIE, mode.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(rocket::time::Duration::days(365)),
    );
    log::debug!("Mode preference set to {}", mode.as_str());
    Some(Redirect::to(local_target(next)))
}

// ── Feed, sitemap, robots, health ──────────────────────

#[get("/feed?<token>")]
pub async fn rss_feed(ctx: SiteContext<'_>, token: Option<String>) -> Option<RawXml<String>> {
    let site = ctx.site(token).await;
    if !site.config.features.blog {
        return None;
    }
    Some(RawXml(crate::rss::generate_feed(&site, &ctx.config.site_url)))
}

#[get("/sitemap.xml")]
pub async fn sitemap(ctx: SiteContext<'_>) -> RawXml<String> {
    let site = ctx.site(None).await;
    RawXml(crate::sitemap::generate_sitemap(&site, &ctx.config.site_url))
}

#[get("/robots.txt")]
pub fn robots(ctx: SiteContext<'_>) -> String {
    crate::sitemap::robots_txt(&ctx.config.site_url)
}

#[get("/health")]
pub fn health_check(ctx: SiteContext<'_>) -> Json<HealthReport> {
    Json(health::gather(ctx.loader))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        about,
        resume,
        resume_pdf,
        portfolio,
        portfolio_single,
        blog_list,
        blog_single,
        contact,
        contact_submit,
        set_mode,
        rss_feed,
        sitemap,
        robots,
        health_check,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_redirect_stays_on_site() {
        assert_eq!(local_target(Some("/blog?page=2")), "/blog?page=2");
        assert_eq!(local_target(Some("//evil.example")), "/");
        assert_eq!(local_target(Some("https://evil.example")), "/");
        assert_eq!(local_target(Some("/\\evil.example")), "/");
        assert_eq!(local_target(None), "/");
    }
}
