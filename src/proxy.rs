use log::debug;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::uri::Origin;
use rocket::{Data, Request};

use crate::config::{RoutingConfig, SiteConfig};

/// Path prefixes every host serves as-is.
const SHARED_PREFIXES: &[&str] = &["/api/"];

/// Path a request should be routed to, given its host. `None` means leave
/// the request alone.
pub fn rewrite_target(routing: &RoutingConfig, host: &str, path: &str) -> Option<String> {
    let root = routing.root_domain.as_deref()?.to_ascii_lowercase();
    let hostname = host.split(':').next().unwrap_or(host).to_ascii_lowercase();
    let label = hostname.strip_suffix(root.as_str())?.strip_suffix('.')?;
    if label.is_empty() || label == "www" {
        return None;
    }
    let prefix = routing.subdomains.get(label)?.trim_end_matches('/');

    if SHARED_PREFIXES.iter().any(|p| path.starts_with(p)) || is_file_path(path) {
        return None;
    }
    if path == prefix || path.starts_with(&format!("{}/", prefix)) {
        return None;
    }

    if path == "/" {
        Some(prefix.to_string())
    } else {
        Some(format!("{}{}", prefix, path))
    }
}

/// Static assets and crawler files (`/site.css`, `/robots.txt`) carry an
/// extension in their last segment.
fn is_file_path(path: &str) -> bool {
    path.rsplit('/').next().map(|seg| seg.contains('.')).unwrap_or(false)
}

/// Rewrites `careers.example.com/foo` to `/careers/foo` before routing.
pub struct SubdomainRewrite;

#[rocket::async_trait]
impl Fairing for SubdomainRewrite {
    fn info(&self) -> Info {
        Info {
            name: "Subdomain Rewrite",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut Data<'_>) {
        let config = match request.rocket().state::<SiteConfig>() {
            Some(c) => c,
            None => return,
        };
        let host = match request.headers().get_one("Host") {
            Some(h) => h.to_string(),
            None => return,
        };
        let path = request.uri().path().to_string();

        let target = match rewrite_target(&config.routing, &host, &path) {
            Some(t) => t,
            None => return,
        };
        let target = match request.uri().query() {
            Some(q) => format!("{}?{}", target, q.as_str()),
            None => target,
        };

        match Origin::parse_owned(target) {
            Ok(uri) => {
                debug!("Rewriting {}{} to {}", host, path, uri);
                request.set_uri(uri);
            }
            Err(e) => debug!("Not rewriting {}{}: {}", host, path, e),
        }
    }
}
