use chrono::{DateTime, NaiveDate, Utc};

use crate::config::SiteConfig;
use crate::content::{ContentKind, ContentSource};
use crate::seo::sitemap::xml_escape;

/// Maximum number of insights in the feed.
const FEED_COUNT: usize = 25;

/// Generate an RSS 2.0 feed of the latest insights.
pub fn generate_feed(config: &SiteConfig, content: &dyn ContentSource) -> String {
    let insights = content.list(ContentKind::Insight);
    let base = ContentKind::Insight.base_path();

    let last_build = insights
        .first()
        .and_then(|e| rfc2822(&e.published_at))
        .map(|d| format!("    <lastBuildDate>{}</lastBuildDate>\n", d))
        .unwrap_or_default();

    let language = config.locale.split('_').next().unwrap_or("en");

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{title}</title>
    <link>{url}{base}</link>
    <description>{desc}</description>
    <atom:link href="{url}/feed.xml" rel="self" type="application/rss+xml"/>
    <language>{language}</language>
{last_build}"#,
        title = xml_escape(&format!("{} {}", config.site_name, ContentKind::Insight.label())),
        url = xml_escape(&config.base_url),
        base = base,
        desc = xml_escape(&config.description),
        language = xml_escape(language),
        last_build = last_build,
    );

    for entry in insights.iter().take(FEED_COUNT) {
        let pub_date = rfc2822(&entry.published_at).unwrap_or_default();
        xml.push_str(&format!(
            r#"    <item>
        <title>{title}</title>
        <link>{url}{path}</link>
        <guid isPermaLink="true">{url}{path}</guid>
        <pubDate>{date}</pubDate>
        <description>{desc}</description>
    </item>
"#,
            title = xml_escape(&entry.title),
            url = xml_escape(&config.base_url),
            path = xml_escape(&entry.path()),
            date = pub_date,
            desc = xml_escape(&entry.description),
        ));
    }

    xml.push_str("</channel>\n</rss>");
    xml
}

/// RFC 2822 date (required by RSS) from an ISO 8601 date or timestamp, with a
/// zero-padded day.
fn rfc2822(iso: &str) -> Option<String> {
    const RFC2822: &str = "%a, %d %b %Y %H:%M:%S %z";
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.format(RFC2822).to_string());
    }
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    let utc: DateTime<Utc> = DateTime::from_naive_utc_and_offset(date.and_hms_opt(0, 0, 0)?, Utc);
    Some(utc.format(RFC2822).to_string())
}
