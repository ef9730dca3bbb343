use std::sync::OnceLock;
use std::time::Instant;

use serde::Serialize;

use crate::loader::{LoadStatus, Loader};

/// Boot instant, set once at startup via `init_uptime()`.
static BOOT_INSTANT: OnceLock<Instant> = OnceLock::new();

pub fn init_uptime() {
    let _ = BOOT_INSTANT.set(Instant::now());
}

fn uptime_secs() -> u64 {
    BOOT_INSTANT.get().map(|b| b.elapsed().as_secs()).unwrap_or(0)
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub uptime_human: String,
    pub tenants: Vec<TenantHealth>,
}

#[derive(Debug, Serialize)]
pub struct TenantHealth {
    pub tenant: String,
    pub status: LoadStatus,
}

/// Liveness plus the last load status of every tenant seen so far. The server is
/// "ok" even when a backend is down; the pages fall back to placeholders.
pub fn gather(loader: &Loader) -> HealthReport {
    let secs = uptime_secs();
    let tenants: Vec<TenantHealth> = loader
        .statuses()
        .into_iter()
        .map(|(tenant, status)| TenantHealth { tenant, status })
        .collect();
    let degraded = tenants.iter().any(|t| t.status == LoadStatus::Error);

    HealthReport {
        status: if degraded { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: secs,
        uptime_human: human_uptime(secs),
        tenants,
    }
}

pub fn human_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, mins)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
