use serde::Serialize;

use crate::seo::meta::DynamicEntity;

pub mod file;

pub use file::FileContentStore;

/// The two kinds of long-form content the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Insight,
    CaseStudy,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Insight, ContentKind::CaseStudy];

    /// Site path the kind is listed under; entries live at `<base>/<slug>`.
    pub fn base_path(self) -> &'static str {
        match self {
            ContentKind::Insight => "/insights",
            ContentKind::CaseStudy => "/case-studies",
        }
    }

    /// Directory under the content root holding this kind's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Insight => "insights",
            ContentKind::CaseStudy => "case-studies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Insight => "Insights",
            ContentKind::CaseStudy => "Case Studies",
        }
    }

    /// schema.org `@type` used for the Article entity.
    pub fn schema_type(self) -> &'static str {
        match self {
            ContentKind::Insight => "BlogPosting",
            ContentKind::CaseStudy => "Article",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// ISO 8601, as written in the front matter.
    pub published_at: String,
    pub updated_at: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub body_markdown: String,
    pub body_html: String,
}

impl ContentEntry {
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind.base_path(), self.slug)
    }

    /// Most recent of the update and publish dates.
    pub fn last_modified(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.published_at)
    }
}

impl DynamicEntity for ContentEntry {
    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn published_at(&self) -> Option<&str> {
        Some(&self.published_at)
    }
    fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

/// Read access to published content. Lists are newest first.
pub trait ContentSource: Send + Sync {
    fn list(&self, kind: ContentKind) -> Vec<ContentEntry>;
    fn find(&self, kind: ContentKind, slug: &str) -> Option<ContentEntry>;
}
