use crate::config::SiteConfig;
use crate::content::{ContentKind, ContentSource};
use crate::pages;

/// `/llms.txt`: a Markdown index of the site for AI crawlers.
pub fn generate_llms_txt(config: &SiteConfig, content: &dyn ContentSource) -> String {
    let mut out = header(config);

    out.push_str("\n## Pages\n\n");
    for page in pages::ALL.iter().filter(|p| !p.no_index && p.path != "/") {
        out.push_str(&format!(
            "- [{}]({}{}): {}\n",
            page.title,
            config.base_url,
            page.path,
            page.meta_description(config)
        ));
    }

    if !config.services.is_empty() {
        out.push_str("\n## Services\n\n");
        for service in &config.services {
            out.push_str(&format!(
                "- [{}]({}/services/{}): {}\n",
                service.name, config.base_url, service.slug, service.description
            ));
        }
    }

    for kind in ContentKind::ALL {
        let entries = content.list(kind);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n", kind.label()));
        for entry in &entries {
            out.push_str(&format!(
                "- [{}]({}{}): {}\n",
                entry.title,
                config.base_url,
                entry.path(),
                entry.description
            ));
        }
    }

    out
}

/// `/llms-full.txt`: the index plus every service and content body inline.
pub fn generate_llms_full_txt(config: &SiteConfig, content: &dyn ContentSource) -> String {
    let mut out = header(config);

    for service in &config.services {
        out.push_str(&format!(
            "\n---\n\n## Service: {}\n\nURL: {}/services/{}\n\n{}\n",
            service.name, config.base_url, service.slug, service.description
        ));
        for offering in &service.offerings {
            out.push_str(&format!("- {}\n", offering));
        }
        for faq in &service.faqs {
            out.push_str(&format!("\n**{}**\n{}\n", faq.question, faq.answer));
        }
    }

    for kind in ContentKind::ALL {
        for entry in content.list(kind) {
            out.push_str(&format!(
                "\n---\n\n## {}\n\nURL: {}{}\nPublished: {}\n",
                entry.title,
                config.base_url,
                entry.path(),
                entry.published_at
            ));
            if let Some(ref updated) = entry.updated_at {
                out.push_str(&format!("Updated: {}\n", updated));
            }
            out.push_str(&format!("\n> {}\n\n{}\n", entry.description, entry.body_markdown.trim_end()));
        }
    }

    out
}

fn header(config: &SiteConfig) -> String {
    format!(
        "# {}\n\n> {}\n\nWebsite: {}\nContact: {}{}\n",
        config.site_name,
        config.description,
        config.base_url,
        config.base_url,
        pages::CONTACT.path
    )
}
