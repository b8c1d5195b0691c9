use chrono::{DateTime, NaiveDate};

use crate::config::SiteConfig;
use crate::content::{ContentKind, ContentSource};
use crate::pages;

/// Generate sitemap.xml content: indexable static pages, services and every
/// published content entry.
pub fn generate_sitemap(config: &SiteConfig, content: &dyn ContentSource) -> String {
    let site_url = &config.base_url;

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    // Static pages
    for page in pages::ALL.iter().filter(|p| !p.no_index) {
        xml.push_str(&format!(
            "  <url><loc>{}{}</loc><priority>{}</priority></url>\n",
            xml_escape(site_url),
            page.path,
            page.priority
        ));
    }

    // Services
    for service in &config.services {
        xml.push_str(&format!(
            "  <url><loc>{}/services/{}</loc><priority>0.8</priority></url>\n",
            xml_escape(site_url),
            xml_escape(&service.slug)
        ));
    }

    // Case studies and insights
    for kind in ContentKind::ALL {
        for entry in content.list(kind) {
            xml.push_str(&format!(
                "  <url><loc>{}{}</loc><lastmod>{}</lastmod><priority>0.6</priority></url>\n",
                xml_escape(site_url),
                xml_escape(&entry.path()),
                lastmod(entry.last_modified())
            ));
        }
    }

    xml.push_str("</urlset>");
    xml
}

/// Generate robots.txt content with the sitemap URL.
pub fn generate_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        config.base_url
    )
}

/// `YYYY-MM-DD` form of an ISO 8601 date or timestamp.
fn lastmod(iso: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format("%Y-%m-%d").to_string();
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
