use crate::config::SiteConfig;
use crate::seo::jsonld::Crumb;
use crate::seo::PageSeoIntent;

/// A fixed marketing page. Titles are bare; the builder adds the site suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPage {
    pub path: &'static str,
    pub title: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub no_index: bool,
    /// Sitemap priority; ignored for `no_index` pages.
    pub priority: &'static str,
}

pub const HOME: StaticPage = StaticPage {
    path: "/",
    title: "Software Development Agency",
    heading: "We design and build software that ships",
    description: "",
    no_index: false,
    priority: "1.0",
};

pub const SERVICES: StaticPage = StaticPage {
    path: "/services",
    title: "Services",
    heading: "Services",
    description: "Product strategy, design and engineering for web, mobile and cloud.",
    no_index: false,
    priority: "0.8",
};

pub const CASE_STUDIES: StaticPage = StaticPage {
    path: "/case-studies",
    title: "Case Studies",
    heading: "Case Studies",
    description: "Selected client work and the results it delivered.",
    no_index: false,
    priority: "0.8",
};

pub const INSIGHTS: StaticPage = StaticPage {
    path: "/insights",
    title: "Insights",
    heading: "Insights",
    description: "Articles on engineering, product and delivery from our team.",
    no_index: false,
    priority: "0.8",
};

pub const COMPANY: StaticPage = StaticPage {
    path: "/company",
    title: "Company",
    heading: "About us",
    description: "Who we are, how we work and what we believe in.",
    no_index: false,
    priority: "0.7",
};

pub const CAREERS: StaticPage = StaticPage {
    path: "/careers",
    title: "Careers",
    heading: "Join the team",
    description: "Open roles and what it is like to work with us.",
    no_index: false,
    priority: "0.6",
};

pub const CONTACT: StaticPage = StaticPage {
    path: "/contact",
    title: "Contact",
    heading: "Start a project",
    description: "Tell us about your project and we will get back to you within one business day.",
    no_index: false,
    priority: "0.7",
};

pub const THANK_YOU: StaticPage = StaticPage {
    path: "/thank-you",
    title: "Thank You",
    heading: "Thanks, we got your message",
    description: "Your message has been received.",
    no_index: true,
    priority: "0.0",
};

pub const PRIVACY: StaticPage = StaticPage {
    path: "/privacy",
    title: "Privacy Policy",
    heading: "Privacy Policy",
    description: "How we collect, use and protect personal data.",
    no_index: false,
    priority: "0.3",
};

pub const TERMS: StaticPage = StaticPage {
    path: "/terms",
    title: "Terms of Service",
    heading: "Terms of Service",
    description: "The terms that govern use of this website.",
    no_index: false,
    priority: "0.3",
};

pub const ALL: [StaticPage; 10] = [
    HOME,
    SERVICES,
    CASE_STUDIES,
    INSIGHTS,
    COMPANY,
    CAREERS,
    CONTACT,
    THANK_YOU,
    PRIVACY,
    TERMS,
];

impl StaticPage {
    /// Page description, falling back to the site default.
    pub fn meta_description(&self, config: &SiteConfig) -> String {
        if self.description.is_empty() {
            config.description.clone()
        } else {
            self.description.to_string()
        }
    }

    pub fn intent(&self, config: &SiteConfig) -> PageSeoIntent {
        let intent = PageSeoIntent::new(self.title, &self.meta_description(config), self.path);
        if self.no_index {
            intent.no_index()
        } else {
            intent
        }
    }

    /// Home → this page.
    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        vec![Crumb::link("Home", "/"), Crumb::current(self.title)]
    }
}
