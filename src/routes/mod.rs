pub mod api;
pub mod public;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use sha2::{Digest, Sha256};

use crate::api::{ContactMessage, TenantRequest};
use crate::config::FolioConfig;
use crate::loader::{Loader, Site};
use crate::rate_limit::RateLimiter;
use crate::theme::{Mode, MODE_COOKIE};

/// Client address. Proxy headers are honoured only when `trust_proxy_headers` is set;
/// otherwise the socket peer is used.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let trust_proxy = match request.guard::<&State<FolioConfig>>().await {
            Outcome::Success(c) => c.trust_proxy_headers,
            _ => false,
        };

        if trust_proxy {
            if let Some(ip) = forwarded_ip(request) {
                return Outcome::Success(ClientIp(ip));
            }
        }

        let ip = request
            .remote()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

fn forwarded_ip(request: &Request<'_>) -> Option<String> {
    let headers = request.headers();
    for name in ["CF-Connecting-IP", "X-Real-IP"] {
        if let Some(ip) = headers.get_one(name).map(str::trim).filter(|ip| !ip.is_empty()) {
            return Some(ip.to_string());
        }
    }
    // X-Forwarded-For: client, proxy1, proxy2; the leftmost is the client
    headers
        .get_one("X-Forwarded-For")
        .and_then(|f| f.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

/// Caller presented the configured `refresh_key` in `X-Refresh-Key`.
pub struct RefreshKey;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RefreshKey {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match request.guard::<&State<FolioConfig>>().await {
            Outcome::Success(c) => c.inner(),
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };
        if config.refresh_key.is_empty() {
            return Outcome::Forward(Status::NotFound);
        }
        match request.headers().get_one("X-Refresh-Key") {
            Some(key) if keys_match(key.trim(), &config.refresh_key) => Outcome::Success(RefreshKey),
            Some(_) => Outcome::Forward(Status::Forbidden),
            None => Outcome::Forward(Status::Unauthorized),
        }
    }
}

/// Compares SHA-256 digests of the two keys.
fn keys_match(given: &str, expected: &str) -> bool {
    Sha256::digest(given.as_bytes()) == Sha256::digest(expected.as_bytes())
}

pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}

/// The visitor's stored light/dark choice, if any.
pub struct ModePreference(pub Option<Mode>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ModePreference {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let mode = request
            .cookies()
            .get(MODE_COOKIE)
            .and_then(|c| Mode::parse(c.value()));
        Outcome::Success(ModePreference(mode))
    }
}

/// Everything a page handler needs to resolve the site for this request.
pub struct SiteContext<'r> {
    pub loader: &'r Loader,
    pub config: &'r FolioConfig,
    pub mode: Option<Mode>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SiteContext<'r> {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let loader = match request.guard::<&State<Loader>>().await {
            Outcome::Success(l) => l.inner(),
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };
        let config = match request.guard::<&State<FolioConfig>>().await {
            Outcome::Success(c) => c.inner(),
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };
        let ModePreference(mode) = match request.guard::<ModePreference>().await {
            Outcome::Success(m) => m,
            _ => ModePreference(None),
        };
        Outcome::Success(SiteContext { loader, config, mode })
    }
}

impl SiteContext<'_> {
    /// Load and resolve the site, forwarding `token` to the backend.
    pub async fn site(&self, token: Option<String>) -> Site {
        let req = self.config.tenant_request(token);
        self.loader.load(&req, self.mode).await
    }
}

/// Validate, rate-limit and forward a contact message. The error is safe to show
/// to the visitor.
pub async fn deliver_contact(
    ctx: &SiteContext<'_>,
    limiter: &RateLimiter,
    client_ip: &ClientIp,
    req: &TenantRequest,
    msg: &ContactMessage,
) -> Result<(), String> {
    msg.validate()?;

    if limiter.tracked_keys() > 1024 {
        limiter.cleanup(ctx.config.contact_window());
    }
    let ip_hash = hash_ip(&client_ip.0);
    let key = format!("contact:{}", ip_hash);
    if !limiter.check_and_record(&key, ctx.config.contact_rate_limit, ctx.config.contact_window()) {
        log::warn!("Contact rate limit hit for {} ({})", &ip_hash[..12], req.label());
        return Err("Too many messages. Please try again later.".into());
    }

    ctx.loader.source().submit_contact(req, msg).await.map_err(|e| {
        log::warn!("Contact submission for {} failed: {}", req.label(), e);
        "Sorry, your message could not be sent. Please try again later.".to_string()
    })?;
    log::info!("Contact message forwarded for {}", req.label());
    Ok(())
}
