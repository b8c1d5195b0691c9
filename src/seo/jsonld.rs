use log::error;
use serde::Serialize;

use crate::config::{FaqEntry, ServiceConfig, SiteConfig};
use crate::content::ContentKind;

use super::absolute_url;
use super::meta::DynamicEntity;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// One schema.org entity ready to be embedded as JSON-LD. Every variant
/// carries its own `@context` and `@type`, so serialisation is untagged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredData {
    Organization(Organization),
    Service(Service),
    Article(Article),
    BreadcrumbList(BreadcrumbList),
    FaqPage(FaqPage),
    WebSite(WebSite),
}

impl StructuredData {
    /// `<script type="application/ld+json">` block. Characters that could end
    /// the script element early are written as JSON unicode escapes.
    /// A value that fails to serialise is logged and yields no block.
    pub fn to_script_tag(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(format!(
                r#"<script type="application/ld+json">{}</script>"#,
                escape_script_json(&json)
            )),
            Err(e) => {
                error!("Failed to serialise JSON-LD: {}", e);
                None
            }
        }
    }
}

pub fn render_scripts(entities: &[StructuredData]) -> String {
    entities
        .iter()
        .filter_map(StructuredData::to_script_tag)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

// ── Shared nodes ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Organization as referenced from another entity (provider, publisher).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationRef {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
}

impl Person {
    fn named(name: &str) -> Self {
        Person {
            schema_type: "Person",
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Author {
    Person(Person),
    Organization(OrganizationRef),
}

fn logo(config: &SiteConfig) -> ImageObject {
    let logo = &config.organization.logo;
    ImageObject {
        schema_type: "ImageObject",
        url: absolute_url(config, &logo.path),
        width: logo.width,
        height: logo.height,
    }
}

fn organization_ref(config: &SiteConfig, with_logo: bool) -> OrganizationRef {
    OrganizationRef {
        schema_type: "Organization",
        name: config.site_name.clone(),
        url: config.base_url.clone(),
        logo: if with_logo { Some(logo(config)) } else { None },
    }
}

// ── Organization ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    pub url: String,
    pub logo: ImageObject,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub founders: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_served: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_language: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

pub fn build_organization_schema(config: &SiteConfig) -> StructuredData {
    let org = &config.organization;
    StructuredData::Organization(Organization {
        context: SCHEMA_CONTEXT,
        schema_type: "Organization",
        name: config.site_name.clone(),
        legal_name: org.legal_name.clone(),
        url: config.base_url.clone(),
        logo: logo(config),
        description: config.description.clone(),
        same_as: org.same_as.clone(),
        contact_point: org.contact_point.as_ref().map(|cp| ContactPoint {
            schema_type: "ContactPoint",
            contact_type: cp.contact_type.clone(),
            email: cp.email.clone(),
            telephone: cp.telephone.clone(),
            area_served: cp.area_served.clone(),
            available_language: cp.available_language.clone(),
        }),
        founding_date: org.founding_date.clone(),
        founders: org.founders.iter().map(|f| Person::named(f)).collect(),
        address: org.address.as_ref().map(|a| PostalAddress {
            schema_type: "PostalAddress",
            street_address: a.street_address.clone(),
            address_locality: a.address_locality.clone(),
            address_region: a.address_region.clone(),
            postal_code: a.postal_code.clone(),
            address_country: a.address_country.clone(),
        }),
    })
}

// ── Service ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub description: String,
    pub url: String,
    pub provider: OrganizationRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_served: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_offer_catalog: Option<OfferCatalog>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCatalog {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub item_list_element: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub item_offered: OfferedService,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferedService {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
}

/// Service entity for `/services/<slug>`. An empty offerings list emits no
/// catalog at all.
pub fn build_service_schema(config: &SiteConfig, service: &ServiceConfig) -> StructuredData {
    let has_offer_catalog = if service.offerings.is_empty() {
        None
    } else {
        Some(OfferCatalog {
            schema_type: "OfferCatalog",
            name: service.name.clone(),
            item_list_element: service
                .offerings
                .iter()
                .map(|name| Offer {
                    schema_type: "Offer",
                    item_offered: OfferedService {
                        schema_type: "Service",
                        name: name.clone(),
                    },
                })
                .collect(),
        })
    };

    StructuredData::Service(Service {
        context: SCHEMA_CONTEXT,
        schema_type: "Service",
        name: service.name.clone(),
        description: service.description.clone(),
        url: format!("{}/services/{}", config.base_url, service.slug),
        provider: organization_ref(config, false),
        area_served: service.area_served.clone(),
        has_offer_catalog,
    })
}

// ── Article ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub headline: String,
    pub description: String,
    pub url: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    pub author: Author,
    pub publisher: OrganizationRef,
    pub main_entity_of_page: WebPageRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebPageRef {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
}

/// Article entity for an insight or case study. `dateModified` falls back to
/// `datePublished` when the content has never been updated.
pub fn build_article_schema(
    config: &SiteConfig,
    kind: ContentKind,
    entry: &dyn DynamicEntity,
) -> StructuredData {
    let url = format!("{}{}/{}", config.base_url, kind.base_path(), entry.slug());
    let image = absolute_url(config, entry.image().unwrap_or(&config.default_og_image));
    let published = entry.published_at().map(str::to_string);
    let modified = entry.updated_at().map(str::to_string).or_else(|| published.clone());
    let author = match entry.author() {
        Some(name) => Author::Person(Person::named(name)),
        None => Author::Organization(organization_ref(config, false)),
    };

    StructuredData::Article(Article {
        context: SCHEMA_CONTEXT,
        schema_type: kind.schema_type(),
        headline: entry.title().to_string(),
        description: entry.description().to_string(),
        url: url.clone(),
        image,
        date_published: published,
        date_modified: modified,
        author,
        publisher: organization_ref(config, true),
        main_entity_of_page: WebPageRef {
            schema_type: "WebPage",
            id: url,
        },
    })
}

// ── BreadcrumbList ─────────────────────────────────────

/// One step of a breadcrumb trail. `path` is site-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub name: String,
    pub path: Option<String>,
}

impl Crumb {
    pub fn link(name: &str, path: &str) -> Self {
        Crumb {
            name: name.to_string(),
            path: Some(path.to_string()),
        }
    }

    pub fn current(name: &str) -> Self {
        Crumb {
            name: name.to_string(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub position: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// Positions are 1-based. The last crumb is the current page and never links;
/// earlier crumbs always do (to the site root when they carry no path).
pub fn build_breadcrumb_schema(config: &SiteConfig, trail: &[Crumb]) -> StructuredData {
    let last = trail.len().saturating_sub(1);
    let item_list_element = trail
        .iter()
        .enumerate()
        .map(|(i, crumb)| ListItem {
            schema_type: "ListItem",
            position: i + 1,
            name: crumb.name.clone(),
            item: if i == last {
                None
            } else {
                Some(absolute_url(config, crumb.path.as_deref().unwrap_or("/")))
            },
        })
        .collect();

    StructuredData::BreadcrumbList(BreadcrumbList {
        context: SCHEMA_CONTEXT,
        schema_type: "BreadcrumbList",
        item_list_element,
    })
}

// ── FAQPage ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub text: String,
}

pub fn build_faq_schema(faqs: &[FaqEntry]) -> StructuredData {
    StructuredData::FaqPage(FaqPage {
        context: SCHEMA_CONTEXT,
        schema_type: "FAQPage",
        main_entity: faqs
            .iter()
            .map(|faq| Question {
                schema_type: "Question",
                name: faq.question.clone(),
                accepted_answer: Answer {
                    schema_type: "Answer",
                    text: faq.answer.clone(),
                },
            })
            .collect(),
    })
}

// ── WebSite ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_action: Option<SearchAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAction {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub target: EntryPoint,
    #[serde(rename = "query-input")]
    pub query_input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url_template: String,
}

/// WebSite entity. The site has no search yet, so callers pass `None`;
/// a template such as `/search?q={search_term_string}` attaches a SearchAction.
pub fn build_website_schema(config: &SiteConfig, search_template: Option<&str>) -> StructuredData {
    StructuredData::WebSite(WebSite {
        context: SCHEMA_CONTEXT,
        schema_type: "WebSite",
        name: config.site_name.clone(),
        url: config.base_url.clone(),
        description: config.description.clone(),
        potential_action: search_template.map(|template| SearchAction {
            schema_type: "SearchAction",
            target: EntryPoint {
                schema_type: "EntryPoint",
                url_template: absolute_url(config, template),
            },
            query_input: "required name=search_term_string".to_string(),
        }),
    })
}
