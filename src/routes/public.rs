use rocket::response::content::{RawHtml, RawText, RawXml};
use rocket::State;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{ContentKind, ContentSource};
use crate::pages::{self, StaticPage};
use crate::render::{self, Page};
use crate::rss;
use crate::seo::jsonld::{
    build_article_schema, build_breadcrumb_schema, build_faq_schema, build_organization_schema,
    build_service_schema, build_website_schema, Crumb,
};
use crate::seo::llms::{generate_llms_full_txt, generate_llms_txt};
use crate::seo::sitemap::{generate_robots, generate_sitemap};
use crate::seo::{build_dynamic_metadata, build_metadata, PageSeoIntent};

type Content = State<Arc<dyn ContentSource>>;

fn source(content: &Content) -> &dyn ContentSource {
    content.inner().as_ref()
}

/// Number of entries of each kind featured on the homepage.
const HOME_FEATURED: usize = 3;

fn static_page(config: &SiteConfig, page: &StaticPage) -> RawHtml<String> {
    let doc = Page {
        meta: build_metadata(config, &page.intent(config)),
        structured_data: vec![build_breadcrumb_schema(config, &page.breadcrumbs())],
        body: render::render_static(config, page),
    };
    RawHtml(render::render_page(config, &doc))
}

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub fn home(config: &State<SiteConfig>, content: &Content) -> RawHtml<String> {
    let mut case_studies = content.list(ContentKind::CaseStudy);
    case_studies.truncate(HOME_FEATURED);
    let mut insights = content.list(ContentKind::Insight);
    insights.truncate(HOME_FEATURED);

    let mut structured_data = vec![
        build_organization_schema(config),
        build_website_schema(config, None),
    ];
    if !config.faqs.is_empty() {
        structured_data.push(build_faq_schema(&config.faqs));
    }

    let doc = Page {
        meta: build_metadata(config, &pages::HOME.intent(config)),
        structured_data,
        body: render::render_home(config, &case_studies, &insights),
    };
    RawHtml(render::render_page(config, &doc))
}

// ── Services ───────────────────────────────────────────

#[get("/services")]
pub fn services(config: &State<SiteConfig>) -> RawHtml<String> {
    let page = pages::SERVICES;
    let mut body = render::render_static(config, &page);
    body.push_str(&render::render_service_grid(&config.services));

    let doc = Page {
        meta: build_metadata(config, &page.intent(config)),
        structured_data: vec![build_breadcrumb_schema(config, &page.breadcrumbs())],
        body,
    };
    RawHtml(render::render_page(config, &doc))
}

#[get("/services/<slug>")]
pub fn service_single(config: &State<SiteConfig>, slug: &str) -> Option<RawHtml<String>> {
    let service = config.service(slug)?;

    let intent = PageSeoIntent::new(
        &service.name,
        &service.description,
        &format!("{}/{}", pages::SERVICES.path, service.slug),
    )
    .keywords(&service.keywords);

    let trail = [
        Crumb::link("Home", "/"),
        Crumb::link(pages::SERVICES.title, pages::SERVICES.path),
        Crumb::current(&service.name),
    ];

    let mut structured_data = vec![
        build_service_schema(config, service),
        build_breadcrumb_schema(config, &trail),
    ];
    if !service.faqs.is_empty() {
        structured_data.push(build_faq_schema(&service.faqs));
    }

    let doc = Page {
        meta: build_metadata(config, &intent),
        structured_data,
        body: render::render_service(service),
    };
    Some(RawHtml(render::render_page(config, &doc)))
}

// ── Case studies and insights ──────────────────────────

fn content_list(
    config: &SiteConfig,
    content: &dyn ContentSource,
    page: &StaticPage,
    kind: ContentKind,
) -> RawHtml<String> {
    let entries = content.list(kind);
    let doc = Page {
        meta: build_metadata(config, &page.intent(config)),
        structured_data: vec![build_breadcrumb_schema(config, &page.breadcrumbs())],
        body: render::render_content_list(kind, page.heading, &entries),
    };
    RawHtml(render::render_page(config, &doc))
}

fn content_single(
    config: &SiteConfig,
    content: &dyn ContentSource,
    page: &StaticPage,
    kind: ContentKind,
    slug: &str,
) -> Option<RawHtml<String>> {
    let entry = content.find(kind, slug)?;

    let base = PageSeoIntent::new(page.title, &page.meta_description(config), kind.base_path())
        .keywords(&entry.tags)
        .section("article");

    let trail = [
        Crumb::link("Home", "/"),
        Crumb::link(page.title, page.path),
        Crumb::current(&entry.title),
    ];

    let doc = Page {
        meta: build_dynamic_metadata(config, &base, &entry),
        structured_data: vec![
            build_article_schema(config, kind, &entry),
            build_breadcrumb_schema(config, &trail),
        ],
        body: render::render_content_single(config, &entry),
    };
    Some(RawHtml(render::render_page(config, &doc)))
}

#[get("/case-studies")]
pub fn case_studies(config: &State<SiteConfig>, content: &Content) -> RawHtml<String> {
    content_list(config, source(content), &pages::CASE_STUDIES, ContentKind::CaseStudy)
}

#[get("/case-studies/<slug>")]
pub fn case_study_single(
    config: &State<SiteConfig>,
    content: &Content,
    slug: &str,
) -> Option<RawHtml<String>> {
    content_single(config, source(content), &pages::CASE_STUDIES, ContentKind::CaseStudy, slug)
}

#[get("/insights")]
pub fn insights(config: &State<SiteConfig>, content: &Content) -> RawHtml<String> {
    content_list(config, source(content), &pages::INSIGHTS, ContentKind::Insight)
}

#[get("/insights/<slug>")]
pub fn insight_single(
    config: &State<SiteConfig>,
    content: &Content,
    slug: &str,
) -> Option<RawHtml<String>> {
    content_single(config, source(content), &pages::INSIGHTS, ContentKind::Insight, slug)
}

// ── Company, careers, contact, legal ───────────────────

#[get("/company")]
pub fn company(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::COMPANY)
}

#[get("/careers")]
pub fn careers(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::CAREERS)
}

#[get("/contact")]
pub fn contact(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::CONTACT)
}

#[get("/thank-you")]
pub fn thank_you(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::THANK_YOU)
}

#[get("/privacy")]
pub fn privacy(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::PRIVACY)
}

#[get("/terms")]
pub fn terms(config: &State<SiteConfig>) -> RawHtml<String> {
    static_page(config, &pages::TERMS)
}

// ── Crawler endpoints ──────────────────────────────────

#[get("/sitemap.xml")]
pub fn sitemap_xml(config: &State<SiteConfig>, content: &Content) -> RawXml<String> {
    RawXml(generate_sitemap(config, source(content)))
}

#[get("/robots.txt")]
pub fn robots_txt(config: &State<SiteConfig>) -> RawText<String> {
    RawText(generate_robots(config))
}

#[get("/feed.xml")]
pub fn feed_xml(config: &State<SiteConfig>, content: &Content) -> RawXml<String> {
    RawXml(rss::generate_feed(config, source(content)))
}

#[get("/llms.txt")]
pub fn llms_txt(config: &State<SiteConfig>, content: &Content) -> RawText<String> {
    RawText(generate_llms_txt(config, source(content)))
}

#[get("/llms-full.txt")]
pub fn llms_full_txt(config: &State<SiteConfig>, content: &Content) -> RawText<String> {
    RawText(generate_llms_full_txt(config, source(content)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        home,
        services,
        service_single,
        case_studies,
        case_study_single,
        insights,
        insight_single,
        company,
        careers,
        contact,
        thank_you,
        privacy,
        terms,
        sitemap_xml,
        robots_txt,
        feed_xml,
        llms_txt,
        llms_full_txt,
    ]
}
