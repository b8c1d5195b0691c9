use log::{error, info, warn};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::email;
use crate::forms::{ApplicationSubmission, ContactSubmission, Submission};
use crate::rate_limit::RateLimiter;

/// Client IP address extracted from proxy headers, falling back to the
/// socket peer.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = request.headers();

        // Cloudflare, then Akamai / Cloudflare Enterprise, then nginx
        for name in ["CF-Connecting-IP", "True-Client-IP", "X-Real-IP"] {
            if let Some(ip) = headers.get_one(name) {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Outcome::Success(ClientIp(ip.to_string()));
                }
            }
        }

        // X-Forwarded-For: client, proxy1, proxy2. Take the leftmost
        if let Some(forwarded) = headers.get_one("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Outcome::Success(ClientIp(ip.to_string()));
                }
            }
        }

        let ip = request
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

type FormResult = (Status, Json<Value>);

fn failure(status: Status, error: &str) -> FormResult {
    (status, Json(json!({ "success": false, "error": error })))
}

/// Shared submission pipeline: honeypot, validation, rate limit, relay.
async fn submit<S: Submission>(
    config: &SiteConfig,
    limiter: &RateLimiter,
    client_ip: &ClientIp,
    form: S,
) -> FormResult {
    let ok = (
        Status::Ok,
        Json(json!({ "success": true, "message": "Thanks, we'll be in touch shortly." })),
    );

    // Bots get a success response and nothing is sent
    if form.is_spam() {
        warn!("[{}] Honeypot filled by {}, dropping submission", S::KIND, client_ip.0);
        return ok;
    }

    if let Err(e) = form.validate() {
        return failure(Status::BadRequest, &e);
    }

    limiter.cleanup();
    let rate_key = format!("{}:{}", S::KIND, client_ip.0);
    if !limiter.check_and_record(&rate_key) {
        warn!("[{}] Rate limit hit for {}", S::KIND, client_ip.0);
        return failure(
            Status::TooManyRequests,
            "Too many submissions. Please wait before trying again.",
        );
    }

    let notification = form.notification(config);
    let mail = config.mail.clone();
    let sent = rocket::tokio::task::spawn_blocking(move || {
        email::send_notification(&mail, &notification)
    })
    .await
    .map_err(|e| format!("Mail task failed: {}", e))
    .and_then(|r| r);

    match sent {
        Ok(()) => {
            info!("[{}] Submission from {} relayed", S::KIND, client_ip.0);
            ok
        }
        Err(e) => {
            error!("[{}] Failed to relay submission: {}", S::KIND, e);
            failure(
                Status::InternalServerError,
                "We couldn't send your message. Please try again later.",
            )
        }
    }
}

#[post("/contact", format = "json", data = "<form>")]
pub async fn contact(
    config: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    client_ip: ClientIp,
    form: Json<ContactSubmission>,
) -> FormResult {
    submit(config, limiter, &client_ip, form.into_inner()).await
}

#[post("/apply", format = "json", data = "<form>")]
pub async fn apply(
    config: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    client_ip: ClientIp,
    form: Json<ApplicationSubmission>,
) -> FormResult {
    submit(config, limiter, &client_ip, form.into_inner()).await
}

pub fn routes() -> Vec<rocket::Route> {
    routes![contact, apply]
}
