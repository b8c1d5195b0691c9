#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};
use std::path::Path;
use std::sync::Arc;

mod boot;
mod config;
mod content;
mod email;
mod forms;
mod pages;
mod proxy;
mod rate_limit;
mod render;
mod routes;
mod rss;
mod seo;


use config::SiteConfig;
use content::{ContentSource, FileContentStore};
use rate_limit::RateLimiter;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the application around an already-loaded config and content source.
pub fn build_rocket(config: SiteConfig, content: Arc<dyn ContentSource>) -> Rocket<Build> {
    let limiter = RateLimiter::from_config(&config.forms);
    let static_dir = config.static_dir.clone();

    rocket::build()
        .manage(config)
        .manage(content)
        .manage(limiter)
        .attach(proxy::SubdomainRewrite)
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .mount("/", FileServer::from(static_dir))
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = match SiteConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Boot check: create directories, report missing assets
    if boot::run(&config) > 0 {
        log::error!("Boot check failed, refusing to start");
        std::process::exit(1);
    }

    let content = match FileContentStore::load(Path::new(&config.content_dir)) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load content: {}", e);
            std::process::exit(1);
        }
    };

    build_rocket(config, Arc::new(content))
}
