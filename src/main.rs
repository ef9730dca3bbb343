#[macro_use]
extern crate rocket;

use std::path::Path;
use std::sync::Arc;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod api;
mod boot;
mod config;
mod content;
mod designs;
mod health;
mod loader;
mod pdf;
mod rate_limit;
mod render;
mod routes;
mod rss;
mod sitemap;
mod theme;
mod typography;

#[cfg(test)]
mod tests;

use api::{ApiClient, Offline, SiteSource};
use config::FolioConfig;
use loader::Loader;
use rate_limit::RateLimiter;

/// Pages rendered for a `?token=` preview must not be cached by proxies.
pub struct NoCacheToken;

#[rocket::async_trait]
impl Fairing for NoCacheToken {
    fn info(&self) -> Info {
        Info { name: "No-Cache Token Pages", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        if req.query_value::<&str>("token").is_some() {
            res.set_header(Header::new("Cache-Control", "no-store, no-cache, must-revalidate, max-age=0"));
            res.set_header(Header::new("Pragma", "no-cache"));
        }
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml(render::render_error_page(404, "Page not found."))
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml(render::render_error_page(500, "Internal server error."))
}

/// Assemble the server around `source`. Split from `rocket()` so tests can pass a stub.
pub fn build(config: FolioConfig, source: Arc<dyn SiteSource>) -> Rocket<Build> {
    let loader = Loader::new(source, config.min_loading(), config.cache_ttl());
    let static_dir = config.static_dir.clone();

    let mut rocket = rocket::build()
        .manage(loader)
        .manage(RateLimiter::new())
        .manage(config)
        .attach(NoCacheToken);
    if Path::new(&static_dir).is_dir() {
        rocket = rocket.mount("/static", FileServer::from(static_dir));
    }
    rocket
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();
    health::init_uptime();

    let config = FolioConfig::load();

    // Boot check: create the static dir, warn about missing files
    boot::run(&config);

    let source: Arc<dyn SiteSource> = match ApiClient::new(&config.api_base, config.request_timeout()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("{}; serving placeholders only", e);
            Arc::new(Offline { reason: e })
        }
    };

    build(config, source)
}
