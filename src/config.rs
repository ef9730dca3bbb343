use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::TenantRequest;

/// Server configuration read from `folio.toml`.
///
/// Every key is optional. `FOLIO_API_BASE` and `FOLIO_TENANT` override the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Base URL of the tenant backend (`{api_base}/api/...`).
    pub api_base: String,
    /// Tenant used to scope backend requests. Empty means unscoped endpoints.
    pub tenant: String,
    /// Public URL of this site, used in the feed and sitemap.
    pub site_url: String,
    /// A fresh load never completes faster than this.
    pub min_loading_ms: u64,
    pub request_timeout_secs: u64,
    /// How long a tenant snapshot is reused. 0 fetches on every page load.
    pub cache_ttl_secs: u64,
    /// Contact submissions allowed per client within `contact_window_secs`.
    pub contact_rate_limit: u64,
    pub contact_window_secs: u64,
    pub static_dir: String,
    /// Shared secret for `POST /api/refresh`, sent as `X-Refresh-Key`. Empty disables
    /// the route.
    pub refresh_key: String,
    /// Take the client address from `CF-Connecting-IP`/`X-Real-IP`/`X-Forwarded-For`.
    /// Only enable behind a proxy that sets them.
    pub trust_proxy_headers: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        FolioConfig {
            api_base: "http://localhost:5000".into(),
            tenant: String::new(),
            site_url: "http://localhost:8000".into(),
            min_loading_ms: 300,
            request_timeout_secs: 10,
            cache_ttl_secs: 60,
            contact_rate_limit: 5,
            contact_window_secs: 15 * 60,
            static_dir: "static".into(),
            refresh_key: String::new(),
            trust_proxy_headers: false,
        }
    }
}

impl FolioConfig {
    pub const FILE: &'static str = "folio.toml";

    /// Load `folio.toml` from the working directory, then apply env overrides.
    /// A missing or malformed file yields defaults.
    pub fn load() -> Self {
        let mut config = Self::load_from(Path::new(Self::FILE));
        if let Ok(base) = std::env::var("FOLIO_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base.trim().to_string();
            }
        }
        if let Ok(tenant) = std::env::var("FOLIO_TENANT") {
            config.tenant = tenant.trim().to_string();
        }
        config
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|e| {
                log::warn!("{} is malformed ({}), using defaults", path.display(), e);
                FolioConfig::default()
            }),
            Err(_) => FolioConfig::default(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn tenant_request(&self, token: Option<String>) -> TenantRequest {
        TenantRequest {
            tenant: self.tenant.clone(),
            token: token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        }
    }

    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn contact_window(&self) -> Duration {
        Duration::from_secs(self.contact_window_secs.max(1))
    }
}
