use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rocket::tokio;
use serde::Serialize;
use serde_json::Value;

use crate::api::{SiteSource, TenantRequest};
use crate::content::view::ViewModel;
use crate::content::ContentBundle;
use crate::theme::apply::{apply_theme, AppliedTheme};
use crate::theme::palette::Palette;
use crate::theme::{Mode, SiteConfig};

/// `Idle -> Loading -> Ready | Error`. `Error` means both fetches failed; the site
/// still renders from defaults and placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Raw result of one load: whatever each fetch produced.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub config: Option<Value>,
    pub content: Option<ContentBundle>,
    pub warnings: Vec<String>,
    pub status: LoadStatus,
    pub fetched_at: Instant,
}

/// Upper bound on tracked `(tenant, token)` entries.
pub const MAX_TRACKED: usize = 256;

struct Entry {
    status: LoadStatus,
    snapshot: Option<Arc<Snapshot>>,
}

impl Entry {
    fn fetched_at(&self) -> Option<Instant> {
        self.snapshot.as_ref().map(|s| s.fetched_at)
    }
}

/// Fetches tenant config and content, caches the snapshot, and resolves sites.
pub struct Loader {
    source: Arc<dyn SiteSource>,
    min_loading: Duration,
    ttl: Duration,
    entries: Mutex<HashMap<TenantRequest, Entry>>,
}

impl Loader {
    pub fn new(source: Arc<dyn SiteSource>, min_loading: Duration, ttl: Duration) -> Self {
        Loader {
            source,
            min_loading,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &dyn SiteSource {
        self.source.as_ref()
    }

    pub fn status(&self, req: &TenantRequest) -> LoadStatus {
        let map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(req).map(|e| e.status).unwrap_or(LoadStatus::Idle)
    }

    /// Status per tenant label, for the health report.
    pub fn statuses(&self) -> Vec<(String, LoadStatus)> {
        let map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<(String, LoadStatus)> =
            map.iter().map(|(k, e)| (k.label(), e.status)).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    fn set_status(&self, req: &TenantRequest, status: LoadStatus, snapshot: Option<Arc<Snapshot>>) {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !map.contains_key(req) {
            self.prune(&mut map);
        }
        let entry = map.entry(req.clone()).or_insert(Entry {
            status: LoadStatus::Idle,
            snapshot: None,
        });
        entry.status = status;
        if snapshot.is_some() {
            entry.snapshot = snapshot;
        }
    }

    /// Drop settled entries whose snapshot has expired, then the oldest settled ones
    /// until there is room for one more.
    fn prune(&self, map: &mut HashMap<TenantRequest, Entry>) {
        let ttl = self.ttl;
        map.retain(|_, e| {
            e.status == LoadStatus::Loading || e.fetched_at().is_some_and(|t| t.elapsed() < ttl)
        });
        while map.len() >= MAX_TRACKED {
            let oldest = map
                .iter()
                .filter(|(_, e)| e.status != LoadStatus::Loading)
                .min_by_key(|(_, e)| e.fetched_at())
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    map.remove(&k);
                }
                None => break,
            }
        }
    }

    fn cached(&self, req: &TenantRequest) -> Option<Arc<Snapshot>> {
        if self.ttl.is_zero() {
            return None;
        }
        let map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let snap = map.get(req)?.snapshot.as_ref()?;
        if snap.fetched_at.elapsed() < self.ttl {
            Some(Arc::clone(snap))
        } else {
            None
        }
    }

    /// Drop every cached snapshot.
    pub fn invalidate(&self) {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }

    /// Cached snapshot if still fresh, otherwise a new fetch.
    pub async fn snapshot(&self, req: &TenantRequest) -> Arc<Snapshot> {
        if let Some(snap) = self.cached(req) {
            log::debug!("Snapshot cache hit for {}", req.label());
            return snap;
        }
        self.fetch(req).await
    }

    /// Fetch config and content in parallel. Each may fail on its own. The call takes
    /// at least `min_loading`, and returns once both fetches have settled.
    pub async fn fetch(&self, req: &TenantRequest) -> Arc<Snapshot> {
        self.set_status(req, LoadStatus::Loading, None);
        log::debug!("Loading site data for {}", req.label());

        let (config, content, _) = tokio::join!(
            self.source.fetch_config(req),
            self.source.fetch_content(req),
            tokio::time::sleep(self.min_loading),
        );

        let mut warnings = Vec::new();
        let config = match config {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Config fetch failed for {}: {} (using defaults)", req.label(), e);
                warnings.push(format!("Site configuration unavailable: {}", e));
                None
            }
        };
        let content = match content {
            Ok(v) => Some(ContentBundle::from_value(&v)),
            Err(e) => {
                log::warn!("Content fetch failed for {}: {} (using placeholders)", req.label(), e);
                warnings.push(format!("Site content unavailable: {}", e));
                None
            }
        };

        let status = if config.is_none() && content.is_none() {
            LoadStatus::Error
        } else {
            LoadStatus::Ready
        };
        let snap = Arc::new(Snapshot {
            config,
            content,
            warnings,
            status,
            fetched_at: Instant::now(),
        });
        self.set_status(req, status, Some(Arc::clone(&snap)));
        snap
    }

    /// Load (or reuse) the tenant snapshot and resolve it for `mode`.
    /// `mode` is the visitor's stored preference; `None` uses the config's mode.
    pub async fn load(&self, req: &TenantRequest, mode: Option<Mode>) -> Site {
        let snap = self.snapshot(req).await;
        Site::resolve(&snap, req.clone(), mode)
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub config: SiteConfig,
    pub mode: Mode,
    pub palette: Palette,
    pub gradient: Option<String>,
    pub theme: AppliedTheme,
    pub view: ViewModel,
    pub status: LoadStatus,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub request: TenantRequest,
}

impl Site {
    pub fn resolve(snap: &Snapshot, request: TenantRequest, mode: Option<Mode>) -> Site {
        let config = SiteConfig::resolve(snap.config.as_ref());
        let mode = mode.unwrap_or(config.mode);
        let palette = config.palette(mode);
        let gradient = config.gradient(&palette);
        let theme = apply_theme(&palette, mode, gradient.as_deref(), &config.fonts);
        let view = ViewModel::build(snap.content.as_ref(), &palette);

        Site {
            config,
            mode,
            palette,
            gradient,
            theme,
            view,
            status: snap.status,
            warnings: snap.warnings.clone(),
            request,
        }
    }

    /// `path` with the request's token carried along.
    pub fn link(&self, path: &str) -> String {
        crate::render::link(path, self.request.token.as_deref())
    }
}
