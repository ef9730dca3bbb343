use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Which tenant the request is for, plus the optional auth token that is forwarded
/// to the backend as `?token=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TenantRequest {
    pub tenant: String,
    pub token: Option<String>,
}

impl TenantRequest {
    /// Cache/log key that never contains the token itself.
    pub fn label(&self) -> String {
        let tenant = if self.tenant.is_empty() { "(default)" } else { self.tenant.as_str() };
        match self.token {
            Some(_) => format!("{} [token]", tenant),
            None => tenant.to_string(),
        }
    }
}

/// Contact form payload. Serialized as exactly `{name, email, message}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        ContactMessage {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Please enter your name.".into());
        }
        if self.email.is_empty() {
            return Err("Please enter your email address.".into());
        }
        let plausible = self
            .email
            .split_once('@')
            .map(|(user, host)| !user.is_empty() && host.contains('.') && !host.starts_with('.'))
            .unwrap_or(false);
        if !plausible || self.email.contains(char::is_whitespace) {
            return Err("Please enter a valid email address.".into());
        }
        if self.message.is_empty() {
            return Err("Please enter a message.".into());
        }
        if self.message.chars().count() > 5000 {
            return Err("Message is too long (5000 characters max).".into());
        }
        Ok(())
    }
}

/// Where tenant config and content come from.
#[rocket::async_trait]
pub trait SiteSource: Send + Sync {
    async fn fetch_config(&self, req: &TenantRequest) -> Result<Value, String>;
    async fn fetch_content(&self, req: &TenantRequest) -> Result<Value, String>;
    async fn submit_contact(&self, req: &TenantRequest, msg: &ContactMessage) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Config,
    Content,
    Contact,
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::Config => "api/config",
            Endpoint::Content => "api",
            Endpoint::Contact => "api/contact",
        }
    }
}

/// `{base}/api/config[/tenant]`, `{base}/api[/tenant]`, `{base}/api/contact[/tenant]`,
/// with `token` appended as a query parameter when present.
pub fn endpoint_url(base: &str, endpoint: Endpoint, req: &TenantRequest) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| format!("Invalid API base URL '{}': {}", base, e))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("API base URL '{}' cannot carry a path", base))?;
        segments.pop_if_empty();
        for seg in endpoint.path().split('/') {
            segments.push(seg);
        }
        if !req.tenant.is_empty() {
            segments.push(&req.tenant);
        }
    }
    if let Some(token) = req.token.as_deref().filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("token", token);
    }
    Ok(url)
}

/// HTTP implementation of [`SiteSource`] against the tenant backend.
pub struct ApiClient {
    base: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, String> {
        Url::parse(base).map_err(|e| format!("Invalid API base URL '{}': {}", base, e))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(ApiClient {
            base: base.to_string(),
            client,
        })
    }

    async fn get_json(&self, endpoint: Endpoint, req: &TenantRequest) -> Result<Value, String> {
        let url = endpoint_url(&self.base, endpoint, req)?;
        // path only: the query may carry the token
        let path = url.path().to_string();
        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| format!("GET {} failed: {}", path, e.without_url()))?;

        if !resp.status().is_success() {
            return Err(format!("GET {} returned {}", path, resp.status()));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| format!("GET {} returned invalid JSON: {}", path, e.without_url()))
    }
}

#[rocket::async_trait]
impl SiteSource for ApiClient {
    async fn fetch_config(&self, req: &TenantRequest) -> Result<Value, String> {
        self.get_json(Endpoint::Config, req).await
    }

    async fn fetch_content(&self, req: &TenantRequest) -> Result<Value, String> {
        self.get_json(Endpoint::Content, req).await
    }

    async fn submit_contact(&self, req: &TenantRequest, msg: &ContactMessage) -> Result<(), String> {
        let url = endpoint_url(&self.base, Endpoint::Contact, req)?;
        let path = url.path().to_string();
        let resp = self
            .client
            .post(url)
            .json(msg)
            .send()
            .await
            .map_err(|e| format!("POST {} failed: {}", path, e.without_url()))?;

        if !resp.status().is_success() {
            return Err(format!("POST {} returned {}", path, resp.status()));
        }
        Ok(())
    }
}

/// Stand-in used when the backend URL is unusable: every call fails with `reason`,
/// so pages render from defaults and placeholders.
pub struct Offline {
    pub reason: String,
}

#[rocket::async_trait]
impl SiteSource for Offline {
    async fn fetch_config(&self, _: &TenantRequest) -> Result<Value, String> {
        Err(self.reason.clone())
    }

    async fn fetch_content(&self, _: &TenantRequest) -> Result<Value, String> {
        Err(self.reason.clone())
    }

    async fn submit_contact(&self, _: &TenantRequest, _: &ContactMessage) -> Result<(), String> {
        Err(self.reason.clone())
    }
}
