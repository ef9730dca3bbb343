use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use crate::api::ContactMessage;
use crate::loader::Site;
use crate::rate_limit::RateLimiter;
use crate::routes::{deliver_contact, ClientIp, RefreshKey, SiteContext};

// ── Resolved site ──────────────────────────────────────

/// The resolved site as JSON: config, palette, applied theme, view model, status.
#[get("/site?<token>")]
pub async fn site(ctx: SiteContext<'_>, token: Option<String>) -> Json<Site> {
    Json(ctx.site(token).await)
}

// ── Contact ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[post("/contact?<token>", format = "json", data = "<msg>")]
pub async fn contact(
    ctx: SiteContext<'_>,
    token: Option<String>,
    msg: Json<ContactMessage>,
    client_ip: ClientIp,
    limiter: &State<RateLimiter>,
) -> Json<ActionResponse> {
    let site = ctx.site(token).await;
    if !site.config.features.contact_form {
        return Json(ActionResponse {
            success: false,
            error: Some("The contact form is disabled.".into()),
        });
    }

    let msg = ContactMessage::new(&msg.name, &msg.email, &msg.message);
    match deliver_contact(&ctx, limiter.inner(), &client_ip, &site.request, &msg).await {
        Ok(()) => Json(ActionResponse {
            success: true,
            error: None,
        }),
        Err(e) => Json(ActionResponse {
            success: false,
            error: Some(e),
        }),
    }
}

// ── Cache ──────────────────────────────────────────────

/// Drop cached snapshots so the next page load refetches.
#[post("/refresh")]
pub fn refresh(ctx: SiteContext<'_>, _key: RefreshKey) -> Json<ActionResponse> {
    ctx.loader.invalidate();
    log::info!("Site cache invalidated");
    Json(ActionResponse {
        success: true,
        error: None,
    })
}

pub fn routes() -> Vec<rocket::Route> {
    routes![site, contact, refresh]
}
