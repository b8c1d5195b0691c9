use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::{ContentEntry, ContentKind, ContentSource};

const FRONT_MATTER_DELIMITER: &str = "+++";

/// TOML header at the top of every content file.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    description: String,
    slug: Option<String>,
    image: Option<String>,
    published_at: String,
    updated_at: Option<String>,
    author: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    draft: bool,
}

/// Content loaded once from `<root>/insights/*.md` and `<root>/case-studies/*.md`.
pub struct FileContentStore {
    entries: Vec<ContentEntry>,
}

impl FileContentStore {
    pub fn from_entries(mut entries: Vec<ContentEntry>) -> Self {
        // Newest first by instant, so mixed offsets still order correctly
        entries.sort_by_key(|e| std::cmp::Reverse(parse_iso_date(&e.published_at)));
        FileContentStore { entries }
    }

    /// Load every kind's directory under `root`. Missing directories are
    /// treated as empty; files that fail to parse are logged and skipped.
    /// Files are read in name order and a slug already taken within a kind
    /// is skipped.
    pub fn load(root: &Path) -> Result<Self, String> {
        let mut entries = Vec::new();
        let mut seen: HashSet<(ContentKind, String)> = HashSet::new();

        for kind in ContentKind::ALL {
            let dir = root.join(kind.dir_name());
            if !dir.is_dir() {
                warn!("Content directory {} missing, no {} loaded", dir.display(), kind.label());
                continue;
            }

            let mut paths: Vec<_> = fs::read_dir(&dir)
                .map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?
                .flatten()
                .map(|item| item.path())
                .collect();
            paths.sort();
            let mut loaded = 0usize;
            for path in paths {
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                let parsed = fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|src| parse_entry(kind, &stem, &src));
                match parsed {
                    Ok(Some(entry)) => {
                        if !seen.insert((kind, entry.slug.clone())) {
                            warn!(
                                "  Skipping {}: slug \"{}\" already used by another {} entry",
                                path.display(),
                                entry.slug,
                                kind.label()
                            );
                            continue;
                        }
                        entries.push(entry);
                        loaded += 1;
                    }
                    Ok(None) => info!("  Skipping draft {}", path.display()),
                    Err(e) => warn!("  Skipping {}: {}", path.display(), e),
                }
            }
            info!("Loaded {} {} from {}", loaded, kind.label(), dir.display());
        }

        Ok(Self::from_entries(entries))
    }
}

impl ContentSource for FileContentStore {
    fn list(&self, kind: ContentKind) -> Vec<ContentEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    fn find(&self, kind: ContentKind, slug: &str) -> Option<ContentEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.slug == slug)
            .cloned()
    }
}

/// Parse one content file. Returns `Ok(None)` for drafts.
pub fn parse_entry(kind: ContentKind, stem: &str, src: &str) -> Result<Option<ContentEntry>, String> {
    let (header, body) = split_front_matter(src)?;
    let fm: FrontMatter =
        toml::from_str(header).map_err(|e| format!("Invalid front matter: {}", e))?;

    if fm.draft {
        return Ok(None);
    }

    if !is_iso_date(&fm.published_at) {
        return Err(format!("published_at is not an ISO 8601 date: {}", fm.published_at));
    }
    let mut updated_at = fm.updated_at;
    if let Some(ref updated) = updated_at {
        if !is_iso_date(updated) {
            return Err(format!("updated_at is not an ISO 8601 date: {}", updated));
        }
    }
    // An update can't predate publication; drop it and fall back to published_at
    let updated_instant = updated_at.as_deref().and_then(parse_iso_date);
    if let (Some(updated), Some(published)) = (updated_instant, parse_iso_date(&fm.published_at)) {
        if updated < published {
            warn!(
                "  {}: updated_at {} is before published_at {}, ignoring it",
                stem, updated, fm.published_at
            );
            updated_at = None;
        }
    }

    // Explicit slugs are normalised the same way as file stems
    let slug = slug::slugify(
        fm.slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(stem),
    );
    if slug.is_empty() {
        return Err(format!("No usable slug for {}", stem));
    }

    Ok(Some(ContentEntry {
        kind,
        slug,
        title: fm.title,
        description: fm.description,
        image: fm.image,
        published_at: fm.published_at,
        updated_at,
        author: fm.author,
        tags: fm.tags,
        body_html: render_markdown(body),
        body_markdown: body.to_string(),
    }))
}

fn split_front_matter(src: &str) -> Result<(&str, &str), String> {
    let rest = src
        .trim_start()
        .strip_prefix(FRONT_MATTER_DELIMITER)
        .ok_or_else(|| "Missing +++ front matter".to_string())?;
    let end = rest
        .find(&format!("\n{}", FRONT_MATTER_DELIMITER))
        .ok_or_else(|| "Unterminated front matter".to_string())?;
    let header = &rest[..end];
    let body = &rest[end + 1 + FRONT_MATTER_DELIMITER.len()..];
    Ok((header, body.trim_start_matches(['\r', '\n'])))
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn is_iso_date(s: &str) -> bool {
    parse_iso_date(s).is_some()
}

/// Instant of an ISO 8601 date or timestamp. Bare dates are midnight UTC.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(DateTime::from_naive_utc_and_offset(date.and_hms_opt(0, 0, 0)?, Utc))
}

pub fn render_markdown(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    let parser = Parser::new_ext(md, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
