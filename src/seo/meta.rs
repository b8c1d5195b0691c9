use serde::Serialize;

use crate::config::SiteConfig;

use super::{absolute_url, html_escape};

/// Open Graph image dimensions advertised for every page image.
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// What a page wants said about itself in `<head>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSeoIntent {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Site-relative, starting with `/`.
    pub pathname: String,
    pub og_image: Option<String>,
    pub no_index: bool,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub authors: Vec<String>,
    pub section: Option<String>,
}

impl PageSeoIntent {
    pub fn new(title: &str, description: &str, pathname: &str) -> Self {
        PageSeoIntent {
            title: title.to_string(),
            description: description.to_string(),
            pathname: pathname.to_string(),
            ..Default::default()
        }
    }

    pub fn keywords(mut self, keywords: &[String]) -> Self {
        self.keywords = keywords.to_vec();
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    pub fn section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }
}

/// A content record addressable by slug under some base path
/// (an insight, a case study).
pub trait DynamicEntity {
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn image(&self) -> Option<&str> {
        None
    }
    fn published_at(&self) -> Option<&str> {
        None
    }
    fn updated_at(&self) -> Option<&str> {
        None
    }
    fn author(&self) -> Option<&str> {
        None
    }
}

/// Head metadata in the shape the document-head renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub robots: Robots,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "googleBot", skip_serializing_if = "Option::is_none")]
    pub google_bot: Option<GoogleBot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "max-video-preview")]
    pub max_video_preview: i32,
    #[serde(rename = "max-image-preview")]
    pub max_image_preview: String,
    #[serde(rename = "max-snippet")]
    pub max_snippet: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub locale: String,
    pub images: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// Build the full metadata record for a page. Pure; never fails.
pub fn build_metadata(config: &SiteConfig, intent: &PageSeoIntent) -> MetadataRecord {
    let canonical = format!("{}{}", config.base_url, intent.pathname);
    let image_url = absolute_url(
        config,
        intent.og_image.as_deref().unwrap_or(&config.default_og_image),
    );
    let title = format!("{} | {}", intent.title, config.site_name);

    let robots = if intent.no_index {
        Robots {
            index: false,
            follow: false,
            google_bot: None,
        }
    } else {
        Robots {
            index: true,
            follow: true,
            google_bot: Some(GoogleBot {
                index: true,
                follow: true,
                max_video_preview: -1,
                max_image_preview: "large".to_string(),
                max_snippet: -1,
            }),
        }
    };

    let og_type = if intent.section.as_deref() == Some("article") {
        "article"
    } else {
        "website"
    };

    let mut keywords = config.keywords.clone();
    keywords.extend(intent.keywords.iter().cloned());

    let handle = config.twitter_at();

    MetadataRecord {
        title: title.clone(),
        description: intent.description.clone(),
        keywords,
        robots,
        alternates: Alternates {
            canonical: canonical.clone(),
        },
        open_graph: OpenGraph {
            og_type: og_type.to_string(),
            url: canonical,
            title: title.clone(),
            description: intent.description.clone(),
            site_name: config.site_name.clone(),
            locale: config.locale.clone(),
            images: vec![OgImage {
                url: image_url.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: title.clone(),
            }],
            published_time: intent.published_time.clone(),
            modified_time: intent.modified_time.clone(),
            authors: intent.authors.clone(),
        },
        twitter: TwitterCard {
            card: "summary_large_image".to_string(),
            title,
            description: intent.description.clone(),
            images: vec![image_url],
            creator: handle.clone(),
            site: handle,
        },
    }
}

/// Metadata for a content-driven page living at `<base.pathname>/<slug>`.
/// Title, description, image and dates come from the entity; keywords,
/// robots and section from the base intent.
pub fn build_dynamic_metadata(
    config: &SiteConfig,
    base: &PageSeoIntent,
    entity: &dyn DynamicEntity,
) -> MetadataRecord {
    let mut authors = base.authors.clone();
    if authors.is_empty() {
        if let Some(author) = entity.author() {
            authors.push(author.to_string());
        }
    }

    let intent = PageSeoIntent {
        title: entity.title().to_string(),
        description: entity.description().to_string(),
        pathname: format!("{}/{}", base.pathname, entity.slug()),
        og_image: entity.image().map(str::to_string).or_else(|| base.og_image.clone()),
        published_time: entity.published_at().map(str::to_string),
        modified_time: entity.updated_at().map(str::to_string),
        authors,
        ..base.clone()
    };
    build_metadata(config, &intent)
}

/// Render a metadata record as `<head>` tags.
pub fn render_head(config: &SiteConfig, record: &MetadataRecord) -> String {
    let mut head = String::new();

    // Basic meta
    head.push_str(&format!(
        r#"<title>{}</title>
<meta name="description" content="{}">
<link rel="canonical" href="{}">
<meta name="theme-color" content="{}">"#,
        html_escape(&record.title),
        html_escape(&record.description),
        html_escape(&record.alternates.canonical),
        html_escape(&config.theme_color),
    ));

    if !record.keywords.is_empty() {
        head.push_str(&format!(
            "\n<meta name=\"keywords\" content=\"{}\">",
            html_escape(&record.keywords.join(", "))
        ));
    }

    // Robots
    head.push_str(&format!(
        "\n<meta name=\"robots\" content=\"{}\">",
        robots_directive(record.robots.index, record.robots.follow)
    ));
    if let Some(ref gb) = record.robots.google_bot {
        head.push_str(&format!(
            "\n<meta name=\"googlebot\" content=\"{}, max-video-preview:{}, max-image-preview:{}, max-snippet:{}\">",
            robots_directive(gb.index, gb.follow),
            gb.max_video_preview,
            html_escape(&gb.max_image_preview),
            gb.max_snippet,
        ));
    }

    // Open Graph
    let og = &record.open_graph;
    head.push_str(&format!(
        r#"
<meta property="og:type" content="{}">
<meta property="og:url" content="{}">
<meta property="og:title" content="{}">
<meta property="og:description" content="{}">
<meta property="og:site_name" content="{}">
<meta property="og:locale" content="{}">"#,
        html_escape(&og.og_type),
        html_escape(&og.url),
        html_escape(&og.title),
        html_escape(&og.description),
        html_escape(&og.site_name),
        html_escape(&og.locale),
    ));
    for image in &og.images {
        head.push_str(&format!(
            r#"
<meta property="og:image" content="{}">
<meta property="og:image:width" content="{}">
<meta property="og:image:height" content="{}">
<meta property="og:image:alt" content="{}">"#,
            html_escape(&image.url),
            image.width,
            image.height,
            html_escape(&image.alt),
        ));
    }
    if let Some(ref t) = og.published_time {
        head.push_str(&format!(
            "\n<meta property=\"article:published_time\" content=\"{}\">",
            html_escape(t)
        ));
    }
    if let Some(ref t) = og.modified_time {
        head.push_str(&format!(
            "\n<meta property=\"article:modified_time\" content=\"{}\">",
            html_escape(t)
        ));
    }
    for author in &og.authors {
        head.push_str(&format!(
            "\n<meta property=\"article:author\" content=\"{}\">",
            html_escape(author)
        ));
    }

    // Twitter Cards
    let tw = &record.twitter;
    head.push_str(&format!(
        r#"
<meta name="twitter:card" content="{}">
<meta name="twitter:title" content="{}">
<meta name="twitter:description" content="{}">"#,
        html_escape(&tw.card),
        html_escape(&tw.title),
        html_escape(&tw.description),
    ));
    for image in &tw.images {
        head.push_str(&format!(
            "\n<meta name=\"twitter:image\" content=\"{}\">",
            html_escape(image)
        ));
    }
    if let Some(ref creator) = tw.creator {
        head.push_str(&format!(
            "\n<meta name=\"twitter:creator\" content=\"{}\">",
            html_escape(creator)
        ));
    }
    if let Some(ref site) = tw.site {
        head.push_str(&format!(
            "\n<meta name=\"twitter:site\" content=\"{}\">",
            html_escape(site)
        ));
    }

    head
}

fn robots_directive(index: bool, follow: bool) -> String {
    format!(
        "{}, {}",
        if index { "index" } else { "noindex" },
        if follow { "follow" } else { "nofollow" }
    )
}
