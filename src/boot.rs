use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::FolioConfig;

/// Startup checks. Call this before Rocket launches. Only an unusable static
/// directory aborts; a missing backend or config file degrades to placeholders.
pub fn run(config: &FolioConfig) {
    info!("Folio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Static directory ────────────────────────────
    let static_dir = Path::new(&config.static_dir);
    if !static_dir.exists() {
        match fs::create_dir_all(static_dir) {
            Ok(_) => info!("  Created directory: {}", config.static_dir),
            Err(e) => {
                error!("  FAILED to create directory {}: {}", config.static_dir, e);
                errors += 1;
            }
        }
    }

    // ── 2. Config files ────────────────────────────────
    if !Path::new(FolioConfig::FILE).exists() {
        warn!("  {} not found, using defaults", FolioConfig::FILE);
        warnings += 1;
    }
    if !Path::new("Rocket.toml").exists() {
        warn!("  Rocket.toml not found, using default config");
        warnings += 1;
    }

    // ── 3. Backend settings ────────────────────────────
    if url::Url::parse(&config.api_base).is_err() {
        warn!("  api_base '{}' is not a valid URL; every page will use placeholders", config.api_base);
        warnings += 1;
    }
    info!(
        "  Backend: {} (tenant: {})",
        config.api_base,
        if config.tenant.is_empty() { "(default)" } else { config.tenant.as_str() }
    );

    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!("Boot check passed with {} warning(s).", warnings);
    } else {
        info!("Boot check passed. All systems go.");
    }
}
