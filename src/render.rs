use chrono::{DateTime, NaiveDate};

use crate::config::{FaqEntry, ServiceConfig, SiteConfig};
use crate::content::{ContentEntry, ContentKind};
use crate::pages::{self, StaticPage};
use crate::seo::jsonld::{render_scripts, StructuredData};
use crate::seo::{absolute_url, render_head, MetadataRecord};

/// Everything a route hands over to be turned into a document.
pub struct Page {
    pub meta: MetadataRecord,
    pub structured_data: Vec<StructuredData>,
    pub body: String,
}

/// Wrap a page body in the site shell, with head metadata and JSON-LD.
pub fn render_page(config: &SiteConfig, page: &Page) -> String {
    let lang = config.locale.split('_').next().unwrap_or("en");
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head}
<link rel="alternate" type="application/rss+xml" title="{site} Insights" href="/feed.xml">
<link rel="stylesheet" href="/site.css">
{ld}
</head>
<body>
{nav}
<main>
{body}
</main>
{footer}
</body>
</html>"#,
        lang = html_escape(lang),
        head = render_head(config, &page.meta),
        site = html_escape(&config.site_name),
        ld = render_scripts(&page.structured_data),
        nav = build_nav(config),
        body = page.body,
        footer = build_footer(config),
    )
}

fn build_nav(config: &SiteConfig) -> String {
    let links = [
        pages::SERVICES,
        pages::CASE_STUDIES,
        pages::INSIGHTS,
        pages::COMPANY,
        pages::CAREERS,
    ]
    .iter()
    .map(|p| format!(r#"<a href="{}">{}</a>"#, p.path, html_escape(p.title)))
    .collect::<Vec<_>>()
    .join("");
    format!(
        r#"<header class="site-header"><a class="brand" href="/">{}</a><nav>{}</nav><a class="cta" href="{}">Start a project</a></header>"#,
        html_escape(&config.site_name),
        links,
        pages::CONTACT.path,
    )
}

fn build_footer(config: &SiteConfig) -> String {
    format!(
        r#"<footer class="site-footer"><p>&copy; {} {}</p><nav><a href="{}">{}</a><a href="{}">{}</a></nav></footer>"#,
        chrono::Utc::now().format("%Y"),
        html_escape(&config.site_name),
        pages::PRIVACY.path,
        pages::PRIVACY.title,
        pages::TERMS.path,
        pages::TERMS.title,
    )
}

pub fn render_static(config: &SiteConfig, page: &StaticPage) -> String {
    format!(
        "<section class=\"page-hero\"><h1>{}</h1><p>{}</p></section>",
        html_escape(page.heading),
        html_escape(&page.meta_description(config))
    )
}

pub fn render_home(
    config: &SiteConfig,
    case_studies: &[ContentEntry],
    insights: &[ContentEntry],
) -> String {
    let mut html = render_static(config, &pages::HOME);
    html.push_str(&render_service_grid(&config.services));
    if !case_studies.is_empty() {
        html.push_str("<section><h2>Selected work</h2>");
        html.push_str(&render_content_cards(case_studies));
        html.push_str("</section>");
    }
    if !insights.is_empty() {
        html.push_str("<section><h2>Latest insights</h2>");
        html.push_str(&render_content_cards(insights));
        html.push_str("</section>");
    }
    html.push_str(&render_faqs(&config.faqs));
    html
}

pub fn render_service_grid(services: &[ServiceConfig]) -> String {
    if services.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section class=\"services\"><ul>");
    for s in services {
        html.push_str(&format!(
            r#"<li><a href="/services/{}"><h3>{}</h3><p>{}</p></a></li>"#,
            html_escape(&s.slug),
            html_escape(&s.name),
            html_escape(&s.description)
        ));
    }
    html.push_str("</ul></section>");
    html
}

pub fn render_service(service: &ServiceConfig) -> String {
    let mut html = format!(
        "<article class=\"service\"><h1>{}</h1><p>{}</p>",
        html_escape(&service.name),
        html_escape(&service.description)
    );
    if !service.offerings.is_empty() {
        html.push_str("<h2>What we deliver</h2><ul>");
        for offering in &service.offerings {
            html.push_str(&format!("<li>{}</li>", html_escape(offering)));
        }
        html.push_str("</ul>");
    }
    html.push_str(&render_faqs(&service.faqs));
    html.push_str(&format!(
        r#"<p><a class="cta" href="{}">Talk to us about {}</a></p></article>"#,
        pages::CONTACT.path,
        html_escape(&service.name)
    ));
    html
}

pub fn render_content_list(kind: ContentKind, heading: &str, entries: &[ContentEntry]) -> String {
    let mut html = format!("<section><h1>{}</h1>", html_escape(heading));
    if entries.is_empty() {
        html.push_str(&format!("<p>No {} yet.</p>", kind.label().to_lowercase()));
    } else {
        html.push_str(&render_content_cards(entries));
    }
    html.push_str("</section>");
    html
}

fn render_content_cards(entries: &[ContentEntry]) -> String {
    let mut html = String::from("<ul class=\"cards\">");
    for e in entries {
        html.push_str(&format!(
            r#"<li><a href="{}"><h3>{}</h3><p>{}</p><time datetime="{}">{}</time></a></li>"#,
            html_escape(&e.path()),
            html_escape(&e.title),
            html_escape(&e.description),
            html_escape(&e.published_at),
            format_date(&e.published_at),
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn render_content_single(config: &SiteConfig, entry: &ContentEntry) -> String {
    let mut html = format!(
        "<article class=\"{}\"><header><h1>{}</h1><p class=\"lede\">{}</p><time datetime=\"{}\">{}</time>",
        match entry.kind {
            ContentKind::Insight => "insight",
            ContentKind::CaseStudy => "case-study",
        },
        html_escape(&entry.title),
        html_escape(&entry.description),
        html_escape(&entry.published_at),
        format_date(&entry.published_at),
    );
    if let Some(ref author) = entry.author {
        html.push_str(&format!(" <span class=\"author\">by {}</span>", html_escape(author)));
    }
    html.push_str("</header>");
    if let Some(ref image) = entry.image {
        html.push_str(&format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(&absolute_url(config, image)),
            html_escape(&entry.title)
        ));
    }
    html.push_str(&entry.body_html);
    html.push_str("</article>");
    html
}

pub fn render_faqs(faqs: &[FaqEntry]) -> String {
    if faqs.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section class=\"faq\"><h2>Frequently asked questions</h2>");
    for faq in faqs {
        html.push_str(&format!(
            "<details><summary>{}</summary><p>{}</p></details>",
            html_escape(&faq.question),
            html_escape(&faq.answer)
        ));
    }
    html.push_str("</section>");
    html
}

/// "March 1, 2025" from an ISO 8601 date or timestamp.
fn format_date(iso: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format("%B %-d, %Y").to_string();
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| html_escape(iso))
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
