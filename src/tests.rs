#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use rocket::tokio;
use serde_json::{json, Value};

use crate::api::{ContactMessage, SiteSource, TenantRequest};
use crate::config::FolioConfig;
use crate::loader::{LoadStatus, Loader};
use crate::routes::public::CONTACT_SENT;

/// Backend stand-in. `None` config/content makes that fetch fail.
struct StubSource {
    config: Option<Value>,
    content: Option<Value>,
    contact_ok: bool,
    delay: Duration,
    fetches: AtomicUsize,
    seen: Mutex<Vec<TenantRequest>>,
    sent: Mutex<Vec<ContactMessage>>,
}

impl StubSource {
    fn new(config: Option<Value>, content: Option<Value>) -> Self {
        StubSource {
            config,
            content,
            contact_ok: true,
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn offline() -> Self {
        Self::new(None, None)
    }

    fn sent(&self) -> Vec<ContactMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl SiteSource for StubSource {
    async fn fetch_config(&self, req: &TenantRequest) -> Result<Value, String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(req.clone());
        tokio::time::sleep(self.delay).await;
        self.config.clone().ok_or_else(|| "config endpoint down".to_string())
    }

    async fn fetch_content(&self, _req: &TenantRequest) -> Result<Value, String> {
        tokio::time::sleep(self.delay).await;
        self.content.clone().ok_or_else(|| "content endpoint down".to_string())
    }

    async fn submit_contact(&self, _req: &TenantRequest, msg: &ContactMessage) -> Result<(), String> {
        if self.contact_ok {
            self.sent.lock().unwrap().push(msg.clone());
            Ok(())
        } else {
            Err("POST /api/contact returned 502 Bad Gateway".into())
        }
    }
}

fn test_config() -> FolioConfig {
    FolioConfig {
        min_loading_ms: 0,
        cache_ttl_secs: 0,
        static_dir: "/nonexistent/folio-static".into(),
        ..FolioConfig::default()
    }
}

fn client_with(config: FolioConfig, stub: Arc<StubSource>) -> Client {
    Client::tracked(crate::build(config, stub)).expect("valid rocket instance")
}

fn client(stub: Arc<StubSource>) -> Client {
    client_with(test_config(), stub)
}

fn get_html(client: &Client, uri: &str) -> String {
    let resp = client.get(uri.to_string()).dispatch();
    assert_eq!(resp.status(), Status::Ok, "GET {}", uri);
    resp.into_string().unwrap_or_default()
}

fn tenant_content() -> Value {
    json!({
        "about": {"name": "Jane Doe", "role": "Engineer", "bio": "Builds things."},
        "blogs": [
            {"id": "hello", "title": "Hello World", "date": "2024-01-02", "content": "Hi **there**", "tags": ["Rust"]},
            {"id": "second", "title": "Second Post", "date": "2024-02-03", "content": "More", "tags": ["Life"]},
        ],
        "works": [{"id": 7, "title": "Compiler", "category": "Tools"}],
    })
}

// ── Pages & fallbacks ──────────────────────────────────

#[test]
fn test_offline_backend_renders_placeholders() {
    let c = client(Arc::new(StubSource::offline()));
    let html = get_html(&c, "/");
    assert!(html.contains("Alex Morgan"));
    assert!(html.contains("data-status=\"error\""));
    // warnings are hidden unless the tenant opts in
    assert!(!html.contains("data-warning"));

    for uri in ["/resume", "/portfolio", "/blog", "/blog/1", "/portfolio/1", "/contact"] {
        get_html(&c, uri);
    }
}

#[test]
fn test_tenant_content_replaces_placeholders() {
    let stub = Arc::new(StubSource::new(Some(json!({})), Some(tenant_content())));
    let c = client(stub);
    let html = get_html(&c, "/");
    assert!(html.contains("Jane Doe"));
    assert!(!html.contains("Alex Morgan"));
    assert!(html.contains("data-status=\"ready\""));

    let post = get_html(&c, "/blog/hello");
    assert!(post.contains("<strong>there</strong>"));
    let work = get_html(&c, "/portfolio/7");
    assert!(work.contains("Compiler"));
}

#[test]
fn test_warning_banner_when_enabled() {
    let stub = Arc::new(StubSource::new(Some(json!({"features": {"show_warnings": true}})), None));
    let html = get_html(&client(stub), "/");
    assert!(html.contains("data-warning"));
    assert!(html.contains("Site content unavailable"));
    assert!(html.contains("data-status=\"ready\""));
}

#[test]
fn test_unknown_ids_render_not_found_body() {
    let c = client(Arc::new(StubSource::offline()));
    assert!(get_html(&c, "/blog/nope").contains("does not exist"));
    assert!(get_html(&c, "/portfolio/nope").contains("does not exist"));
    assert_eq!(c.get("/no/such/page").dispatch().status(), Status::NotFound);
}

#[test]
fn test_blog_tag_and_search_filters() {
    let stub = Arc::new(StubSource::new(Some(json!({})), Some(tenant_content())));
    let c = client(stub);
    let tagged = get_html(&c, "/blog?tag=rust");
    assert!(tagged.contains("Hello World"));
    assert!(!tagged.contains("Second Post"));

    let searched = get_html(&c, "/blog?q=second");
    assert!(searched.contains("Second Post"));
    assert!(!searched.contains("Hello World"));

    assert!(get_html(&c, "/blog?q=zzzz").contains("No posts found."));
}

#[test]
fn test_blog_pagination() {
    let stub = Arc::new(StubSource::new(
        Some(json!({"layout": {"posts_per_page": 1}})),
        Some(tenant_content()),
    ));
    let c = client(stub);
    let first = get_html(&c, "/blog");
    assert!(first.contains("class=\"pagination\""));
    assert!(first.contains("Hello World"));
    let second = get_html(&c, "/blog?page=2");
    assert!(second.contains("Second Post"));
    assert!(!second.contains("Hello World"));
    // out-of-range pages clamp to the last page
    assert!(get_html(&c, "/blog?page=99").contains("Second Post"));
}

#[test]
fn test_portfolio_tag_filter() {
    let c = client(Arc::new(StubSource::offline()));
    let html = get_html(&c, "/portfolio?tag=design");
    assert!(html.contains("Brand Identity"));
    assert!(!html.contains("Weather Dashboard"));
}

#[test]
fn test_disabled_features_return_404() {
    let config = json!({"features": {"blog": false, "portfolio": false, "resume": false, "contact_form": false}});
    let c = client(Arc::new(StubSource::new(Some(config), None)));
    for uri in ["/blog", "/blog/1", "/portfolio", "/portfolio/1", "/resume", "/resume.pdf", "/feed"] {
        assert_eq!(c.get(uri).dispatch().status(), Status::NotFound, "GET {}", uri);
    }
    let resp = c
        .post("/contact")
        .header(ContentType::Form)
        .body("name=Ada&email=ada%40example.com&message=Hi")
        .dispatch();
    assert_eq!(resp.status(), Status::NotFound);

    // nav drops the disabled sections
    let home = get_html(&c, "/");
    assert!(!home.contains("href=\"/blog\""));
    assert!(!home.contains("Download CV"));
}

// ── Token forwarding ───────────────────────────────────

#[test]
fn test_token_is_forwarded_and_kept_in_links() {
    let stub = Arc::new(StubSource::offline());
    let c = client(stub.clone());
    let html = get_html(&c, "/?token=abc");
    assert!(html.contains("/blog?token=abc"));

    let seen = stub.seen.lock().unwrap().clone();
    assert_eq!(seen.last().and_then(|r| r.token.as_deref()), Some("abc"));

    let resp = c.get("/?token=abc").dispatch();
    assert_eq!(resp.headers().get_one("Pragma"), Some("no-cache"));
}

// ── Contact ────────────────────────────────────────────

fn post_contact<'a>(c: &'a Client, body: &str) -> rocket::local::blocking::LocalResponse<'a> {
    c.post("/contact").header(ContentType::Form).body(body.to_string()).dispatch()
}

#[test]
fn test_contact_success_redirects_with_flash() {
    let stub = Arc::new(StubSource::offline());
    let c = client(stub.clone());
    let resp = post_contact(&c, "name=Ada&email=ada%40example.com&message=Hello%20there");
    assert_eq!(resp.status(), Status::SeeOther);
    assert_eq!(resp.headers().get_one("Location"), Some("/contact"));

    assert_eq!(stub.sent(), vec![ContactMessage::new("Ada", "ada@example.com", "Hello there")]);

    // the flash shows once and the form is empty again
    let html = get_html(&c, "/contact");
    assert!(html.contains(CONTACT_SENT));
    assert!(html.contains("flash-success"));
    assert!(!html.contains("value=\"Ada\""));
    assert!(!get_html(&c, "/contact").contains(CONTACT_SENT));
}

#[test]
fn test_contact_failure_keeps_values() {
    let mut stub = StubSource::offline();
    stub.contact_ok = false;
    let c = client(Arc::new(stub));
    let resp = post_contact(&c, "name=Ada&email=ada%40example.com&message=Hello");
    assert_eq!(resp.status(), Status::Ok);
    let html = resp.into_string().unwrap_or_default();
    assert!(html.contains("flash-error"));
    assert!(html.contains("could not be sent"));
    assert!(html.contains("value=\"Ada\""));
    assert!(html.contains("value=\"ada@example.com\""));
    assert!(html.contains(">Hello</textarea>"));
}

#[test]
fn test_contact_validation_and_honeypot() {
    let stub = Arc::new(StubSource::offline());
    let c = client(stub.clone());

    let html = post_contact(&c, "name=Ada&email=not-an-email&message=Hi")
        .into_string()
        .unwrap_or_default();
    assert!(html.contains("valid email"));

    let resp = post_contact(&c, "name=Bot&email=bot%40spam.example&message=Buy&_honey=yes");
    assert_eq!(resp.status(), Status::SeeOther);
    assert!(stub.sent().is_empty());
}

#[test]
fn test_contact_rate_limit() {
    let config = FolioConfig {
        contact_rate_limit: 1,
        ..test_config()
    };
    let stub = Arc::new(StubSource::offline());
    let c = client_with(config, stub.clone());
    let body = "name=Ada&email=ada%40example.com&message=Hi";
    assert_eq!(post_contact(&c, body).status(), Status::SeeOther);
    let html = post_contact(&c, body).into_string().unwrap_or_default();
    assert!(html.contains("Too many messages"));
    assert_eq!(stub.sent().len(), 1);
}

#[test]
fn test_forwarded_headers_ignored_unless_trusted() {
    let body = "name=Ada&email=ada%40example.com&message=Hi";
    let post_from = |c: &Client, ip: &str| {
        c.post("/contact")
            .header(ContentType::Form)
            .header(Header::new("X-Forwarded-For", ip.to_string()))
            .body(body)
            .dispatch()
            .status()
    };

    let limited = FolioConfig {
        contact_rate_limit: 1,
        ..test_config()
    };
    let stub = Arc::new(StubSource::offline());
    let c = client_with(limited.clone(), stub.clone());
    assert_eq!(post_from(&c, "10.0.0.1"), Status::SeeOther);
    // a new forwarded address does not reset the limit
    assert_eq!(post_from(&c, "10.0.0.2"), Status::Ok);
    assert_eq!(stub.sent().len(), 1);

    let trusted = FolioConfig {
        trust_proxy_headers: true,
        ..limited
    };
    let stub = Arc::new(StubSource::offline());
    let c = client_with(trusted, stub.clone());
    assert_eq!(post_from(&c, "10.0.0.1"), Status::SeeOther);
    assert_eq!(post_from(&c, "10.0.0.2"), Status::SeeOther);
    assert_eq!(stub.sent().len(), 2);
}

#[test]
fn test_api_contact_json() {
    let stub = Arc::new(StubSource::offline());
    let c = client(stub.clone());
    let resp = c
        .post("/api/contact")
        .header(ContentType::JSON)
        .body(r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#)
        .dispatch();
    let v: Value = resp.into_json().expect("json body");
    assert_eq!(v["success"], true);
    assert_eq!(stub.sent().len(), 1);

    let resp = c
        .post("/api/contact")
        .header(ContentType::JSON)
        .body(r#"{"name":"","email":"ada@example.com","message":"Hi"}"#)
        .dispatch();
    let v: Value = resp.into_json().expect("json body");
    assert_eq!(v["success"], false);
    assert!(v["error"].as_str().unwrap_or("").contains("name"));
}

// ── Mode ───────────────────────────────────────────────

#[test]
fn test_mode_toggle_sets_cookie() {
    let c = client(Arc::new(StubSource::offline()));
    assert!(get_html(&c, "/").contains("class=\"light\""));

    let resp = c.get("/mode/dark?next=/blog").dispatch();
    assert_eq!(resp.status(), Status::SeeOther);
    assert_eq!(resp.headers().get_one("Location"), Some("/blog"));
    assert_eq!(resp.cookies().get("theme-mode").map(|c| c.value().to_string()), Some("dark".into()));

    assert!(get_html(&c, "/").contains("class=\"dark\""));

    let resp = c.get("/mode/dark?next=https://evil.example").dispatch();
    assert_eq!(resp.headers().get_one("Location"), Some("/"));
    assert_eq!(c.get("/mode/sepia").dispatch().status(), Status::NotFound);
}

#[test]
fn test_remote_mode_is_default_until_visitor_chooses() {
    let stub = Arc::new(StubSource::new(Some(json!({"mode": "dark"})), None));
    let c = client(stub);
    assert!(get_html(&c, "/").contains("class=\"dark\""));
    c.get("/mode/light").dispatch();
    assert!(get_html(&c, "/").contains("class=\"light\""));
}

// ── PDF ────────────────────────────────────────────────

#[test]
fn test_resume_pdf_download() {
    let c = client(Arc::new(StubSource::offline()));
    for uri in ["/resume.pdf", "/resume.pdf?template=dotted", "/resume.pdf?template=unknown"] {
        let resp = c.get(uri).dispatch();
        assert_eq!(resp.status(), Status::Ok, "GET {}", uri);
        assert_eq!(resp.content_type(), Some(ContentType::PDF));
        let disposition = resp.headers().get_one("Content-Disposition").unwrap_or("").to_string();
        assert!(disposition.contains("cv-alex-morgan.pdf"));
        let bytes = resp.into_bytes().unwrap_or_default();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }
}

#[test]
fn test_pdf_flag_hides_download_only() {
    let stub = Arc::new(StubSource::new(Some(json!({"features": {"pdf_download": false}})), None));
    let c = client(stub);
    assert_eq!(c.get("/resume.pdf").dispatch().status(), Status::NotFound);
    let html = get_html(&c, "/resume");
    assert!(!html.contains("/resume.pdf"));
}

// ── JSON, feed, sitemap, health ────────────────────────

#[test]
fn test_api_site_json() {
    let c = client(Arc::new(StubSource::offline()));
    let v: Value = c.get("/api/site").dispatch().into_json().expect("json body");
    assert_eq!(v["status"], "error");
    assert_eq!(v["mode"], "light");
    assert_eq!(v["view"]["about"]["name"], "Alex Morgan");
    assert!(v["palette"]["primary"].is_string());
    assert!(v.get("request").is_none());
}

#[test]
fn test_refresh_requires_configured_key() {
    let c = client(Arc::new(StubSource::offline()));
    assert_eq!(c.post("/api/refresh").dispatch().status(), Status::NotFound);

    let config = FolioConfig {
        refresh_key: "s3cret".into(),
        ..test_config()
    };
    let c = client_with(config, Arc::new(StubSource::offline()));
    assert_eq!(c.post("/api/refresh").dispatch().status(), Status::Unauthorized);
    let wrong = c.post("/api/refresh").header(Header::new("X-Refresh-Key", "nope")).dispatch();
    assert_eq!(wrong.status(), Status::Forbidden);

    let ok = c.post("/api/refresh").header(Header::new("X-Refresh-Key", "s3cret")).dispatch();
    assert_eq!(ok.status(), Status::Ok);
    let v: Value = ok.into_json().expect("json body");
    assert_eq!(v["success"], true);
}

#[test]
fn test_feed_and_sitemap() {
    let stub = Arc::new(StubSource::new(Some(json!({})), Some(tenant_content())));
    let c = client(stub);
    let feed = c.get("/feed").dispatch().into_string().unwrap_or_default();
    assert!(feed.contains("<rss version=\"2.0\""));
    // newest first
    let second = feed.find("Second Post").unwrap_or(usize::MAX);
    let hello = feed.find("Hello World").unwrap_or(0);
    assert!(second < hello);
    assert!(feed.contains("http://localhost:8000/blog/hello"));

    let map = c.get("/sitemap.xml").dispatch().into_string().unwrap_or_default();
    assert!(map.contains("<loc>http://localhost:8000/portfolio/7</loc>"));
    assert!(map.contains("<lastmod>2024-01-02</lastmod>"));

    let robots = c.get("/robots.txt").dispatch().into_string().unwrap_or_default();
    assert!(robots.contains("Sitemap: http://localhost:8000/sitemap.xml"));
}

#[test]
fn test_health_reports_tenant_status() {
    let c = client(Arc::new(StubSource::offline()));
    get_html(&c, "/");
    let v: Value = c.get("/health").dispatch().into_json().expect("json body");
    assert_eq!(v["status"], "degraded");
    assert_eq!(v["tenants"][0]["status"], "error");
}

// ── Loader ─────────────────────────────────────────────

fn req() -> TenantRequest {
    TenantRequest {
        tenant: String::new(),
        token: None,
    }
}

#[rocket::async_test]
async fn test_load_waits_for_minimum_duration() {
    let loader = Loader::new(Arc::new(StubSource::offline()), Duration::from_millis(60), Duration::ZERO);
    let start = Instant::now();
    let site = loader.load(&req(), None).await;
    assert!(start.elapsed() >= Duration::from_millis(60));
    assert_eq!(site.status, LoadStatus::Error);
    assert_eq!(loader.status(&req()), LoadStatus::Error);
}

#[rocket::async_test]
async fn test_load_waits_for_slow_fetches() {
    let mut stub = StubSource::new(Some(json!({})), None);
    stub.delay = Duration::from_millis(80);
    let loader = Loader::new(Arc::new(stub), Duration::from_millis(10), Duration::ZERO);
    let start = Instant::now();
    let site = loader.load(&req(), None).await;
    assert!(start.elapsed() >= Duration::from_millis(80));
    assert_eq!(site.status, LoadStatus::Ready);
    assert_eq!(site.warnings.len(), 1);
}

#[rocket::async_test]
async fn test_snapshot_cache_and_invalidate() {
    let stub = Arc::new(StubSource::offline());
    let loader = Loader::new(stub.clone(), Duration::ZERO, Duration::from_secs(60));
    assert_eq!(loader.status(&req()), LoadStatus::Idle);
    loader.load(&req(), None).await;
    loader.load(&req(), Some(crate::theme::Mode::Dark)).await;
    assert_eq!(stub.fetches.load(Ordering::SeqCst), 1);

    loader.invalidate();
    loader.load(&req(), None).await;
    assert_eq!(stub.fetches.load(Ordering::SeqCst), 2);
}

fn token_req(token: String) -> TenantRequest {
    TenantRequest {
        tenant: String::new(),
        token: Some(token),
    }
}

#[rocket::async_test]
async fn test_expired_token_entries_are_dropped() {
    let loader = Loader::new(Arc::new(StubSource::offline()), Duration::ZERO, Duration::from_millis(1));
    for i in 0..50 {
        loader.load(&token_req(format!("t{}", i)), None).await;
    }
    tokio::time::sleep(Duration::from_millis(5)).await;
    loader.load(&req(), None).await;
    assert_eq!(loader.statuses().len(), 1);
}

#[rocket::async_test]
async fn test_tracked_entries_are_capped() {
    let loader = Loader::new(Arc::new(StubSource::offline()), Duration::ZERO, Duration::from_secs(60));
    for i in 0..crate::loader::MAX_TRACKED + 40 {
        loader.load(&token_req(format!("t{}", i)), None).await;
    }
    assert_eq!(loader.statuses().len(), crate::loader::MAX_TRACKED);
    // the newest request is still cached
    let last = token_req(format!("t{}", crate::loader::MAX_TRACKED + 39));
    assert_eq!(loader.status(&last), LoadStatus::Error);
}
