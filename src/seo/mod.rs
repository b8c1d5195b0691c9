pub mod jsonld;
pub mod llms;
pub mod meta;
pub mod sitemap;

// Re-export commonly used functions
pub use meta::{build_dynamic_metadata, build_metadata, render_head, MetadataRecord, PageSeoIntent};

use crate::config::SiteConfig;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Resolve a site path or URL to an absolute URL. Anything that already parses
/// as a URL (i.e. carries a scheme) is returned untouched.
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    if url::Url::parse(path).is_ok() {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", config.base_url, path)
    } else {
        format!("{}/{}", config.base_url, path)
    }
}
