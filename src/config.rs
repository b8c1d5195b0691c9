use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SITE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "site.toml";

/// Process-wide site settings. Loaded once at startup and handed to Rocket as
/// managed state; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub site_name: String,
    pub locale: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub twitter_handle: String,
    pub theme_color: String,
    pub default_og_image: String,
    pub content_dir: String,
    pub static_dir: String,
    pub organization: OrganizationConfig,
    pub services: Vec<ServiceConfig>,
    pub faqs: Vec<FaqEntry>,
    pub routing: RoutingConfig,
    pub mail: MailConfig,
    pub forms: FormsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: "http://localhost:8000".to_string(),
            site_name: "Agency".to_string(),
            locale: "en_US".to_string(),
            description: "Custom software, web and mobile development.".to_string(),
            keywords: vec![
                "software development".to_string(),
                "web development".to_string(),
            ],
            twitter_handle: String::new(),
            theme_color: "#0b0b0f".to_string(),
            default_og_image: "/og-image.png".to_string(),
            content_dir: "content".to_string(),
            static_dir: "site/static".to_string(),
            organization: OrganizationConfig::default(),
            services: Vec::new(),
            faqs: Vec::new(),
            routing: RoutingConfig::default(),
            mail: MailConfig::default(),
            forms: FormsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub legal_name: Option<String>,
    pub logo: LogoConfig,
    pub same_as: Vec<String>,
    pub founding_date: Option<String>,
    pub founders: Vec<String>,
    pub contact_point: Option<ContactPointConfig>,
    pub address: Option<AddressConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        LogoConfig {
            path: "/logo.png".to_string(),
            width: 512,
            height: 512,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPointConfig {
    pub contact_type: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub area_served: Option<String>,
    pub available_language: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
    pub address_country: Option<String>,
}

/// One entry of the services catalog (`[[services]]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub offerings: Vec<String>,
    pub area_served: Option<String>,
    pub keywords: Vec<String>,
    pub faqs: Vec<FaqEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Hostname routing. `subdomains` maps a host label to the path prefix it
/// serves, e.g. `careers = "/careers"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub root_domain: Option<String>,
    pub subdomains: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            enabled: false,
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    pub max_submissions: u64,
    pub window_secs: u64,
}

impl Default for FormsConfig {
    fn default() -> Self {
        FormsConfig {
            max_submissions: 5,
            window_secs: 3600,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML document into a config, normalising `base_url`.
    pub fn from_toml(src: &str) -> Result<Self, String> {
        let mut config: SiteConfig =
            toml::from_str(src).map_err(|e| format!("Invalid site config: {}", e))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Load the config named by `SITE_CONFIG` (or `site.toml`).
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load() -> Result<Self, String> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(SiteConfig::default());
        }
        let src = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::from_toml(&src)?;
        info!(
            "Loaded site config from {} ({} services, base URL {})",
            path.display(),
            config.services.len(),
            config.base_url
        );
        Ok(config)
    }

    pub fn service(&self, slug: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// `@handle` form of the social handle, or None when unset.
    pub fn twitter_at(&self) -> Option<String> {
        let handle = self.twitter_handle.trim().trim_start_matches('@');
        if handle.is_empty() {
            None
        } else {
            Some(format!("@{}", handle))
        }
    }
}
