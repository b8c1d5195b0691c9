use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use crate::config::MailConfig;

/// A plain-text email to the team about a form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub reply_to: Option<String>,
    pub body: String,
}

/// Relay a notification to the configured inbox. With mail disabled the
/// notification is only logged. Blocking; run off the async executor.
pub fn send_notification(mail: &MailConfig, notification: &Notification) -> Result<(), String> {
    if !mail.enabled {
        info!(
            "[email] Mail disabled, not sending \"{}\":\n{}",
            notification.subject, notification.body
        );
        return Ok(());
    }

    if mail.host.is_empty() || mail.from.is_empty() || mail.to.is_empty() {
        return Err("SMTP host, from or to address not configured".to_string());
    }

    let email = build_message(mail, notification)?;
    let mut transport = SmtpTransport::starttls_relay(&mail.host)
        .map_err(|e| format!("SMTP relay error: {}", e))?
        .port(mail.port);
    if !mail.username.is_empty() {
        transport = transport.credentials(Credentials::new(
            mail.username.clone(),
            mail.password.clone(),
        ));
    }

    transport
        .build()
        .send(&email)
        .map_err(|e| format!("SMTP send error: {}", e))?;
    info!("[email] Sent \"{}\" to {}", notification.subject, mail.to);
    Ok(())
}

pub fn build_message(mail: &MailConfig, notification: &Notification) -> Result<Message, String> {
    let mut builder = Message::builder()
        .from(mail.from.parse().map_err(|e| format!("Invalid from address: {}", e))?)
        .to(mail.to.parse().map_err(|e| format!("Invalid to address: {}", e))?)
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN);
    if let Some(ref reply_to) = notification.reply_to {
        builder = builder.reply_to(
            reply_to
                .parse()
                .map_err(|e| format!("Invalid reply-to address: {}", e))?,
        );
    }
    builder
        .body(notification.body.clone())
        .map_err(|e| format!("Failed to build email: {}", e))
}
