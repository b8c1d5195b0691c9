use lettre::Address;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::email::Notification;

const MAX_NAME_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 5000;

/// A public form whose submissions are relayed to the team by email.
pub trait Submission: Send + 'static {
    /// Rate-limit bucket and log label.
    const KIND: &'static str;

    /// Hidden field that only bots fill in.
    fn honeypot(&self) -> Option<&str>;
    fn validate(&self) -> Result<(), String>;
    fn notification(&self, config: &SiteConfig) -> Notification;

    fn is_spam(&self) -> bool {
        self.honeypot().map(|v| !v.trim().is_empty()).unwrap_or(false)
    }
}

/// Project enquiry from `/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    pub message: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// Job application from `/careers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Submission for ContactSubmission {
    const KIND: &'static str = "contact";

    fn honeypot(&self) -> Option<&str> {
        self.website.as_deref()
    }

    fn validate(&self) -> Result<(), String> {
        require("Name", &self.name, MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        require("Message", &self.message, MAX_MESSAGE_LEN)?;
        Ok(())
    }

    fn notification(&self, config: &SiteConfig) -> Notification {
        let mut body = format!(
            "New project enquiry from {}\n\n\
             Name: {}\n\
             Email: {}\n",
            config.base_url,
            self.name.trim(),
            self.email.trim(),
        );
        push_optional(&mut body, "Company", self.company.as_deref());
        push_optional(&mut body, "Budget", self.budget.as_deref());
        body.push_str(&format!("\nMessage:\n{}\n", self.message.trim()));

        Notification {
            subject: format!("New enquiry from {} — {}", self.name.trim(), config.site_name),
            reply_to: Some(self.email.trim().to_string()),
            body,
        }
    }
}

impl Submission for ApplicationSubmission {
    const KIND: &'static str = "apply";

    fn honeypot(&self) -> Option<&str> {
        self.website.as_deref()
    }

    fn validate(&self) -> Result<(), String> {
        require("Name", &self.name, MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        require("Role", &self.role, MAX_NAME_LEN)?;
        if let Some(ref url) = self.portfolio_url {
            validate_link("Portfolio URL", url)?;
        }
        if let Some(ref url) = self.linkedin {
            validate_link("LinkedIn URL", url)?;
        }
        if let Some(ref message) = self.message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                return Err(format!("Message must be at most {} characters", MAX_MESSAGE_LEN));
            }
        }
        Ok(())
    }

    fn notification(&self, config: &SiteConfig) -> Notification {
        let mut body = format!(
            "New application for {}\n\n\
             Name: {}\n\
             Email: {}\n",
            self.role.trim(),
            self.name.trim(),
            self.email.trim(),
        );
        push_optional(&mut body, "Portfolio", self.portfolio_url.as_deref());
        push_optional(&mut body, "LinkedIn", self.linkedin.as_deref());
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            body.push_str(&format!("\nMessage:\n{}\n", message.trim()));
        }

        Notification {
            subject: format!(
                "Application: {} — {} ({})",
                self.role.trim(),
                self.name.trim(),
                config.site_name
            ),
            reply_to: Some(self.email.trim().to_string()),
            body,
        }
    }
}

fn require(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    email
        .trim()
        .parse::<Address>()
        .map(|_| ())
        .map_err(|_| "A valid email address is required".to_string())
}

fn validate_link(field: &str, value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => Ok(()),
        _ => Err(format!("{} must be an http(s) link", field)),
    }
}

fn push_optional(body: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        body.push_str(&format!("{}: {}\n", label, v));
    }
}
