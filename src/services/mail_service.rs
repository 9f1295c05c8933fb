//! Transactional mail over SMTP. The welcome email is fire-and-forget: it is
//! spawned after the signup response is already decided, and a failure is
//! only logged.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config;

static WELCOME_TEMPLATE: &str = include_str!("../../templates/welcome_email.html");

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport not configured")]
    NotConfigured,

    #[error(transparent)]
    Address(#[from] lettre::address::AddressError),

    #[error(transparent)]
    Message(#[from] lettre::error::Error),

    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),
}

pub async fn send_welcome_email(to: &str, username: &str) -> Result<(), MailError> {
    let mail = &config::config().mail;
    let host = mail.smtp_host.as_ref().ok_or(MailError::NotConfigured)?;
    let from = mail.from_address.as_ref().ok_or(MailError::NotConfigured)?;

    let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?;
    if let (Some(user), Some(pass)) = (&mail.smtp_username, &mail.smtp_password) {
        builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
    }
    let mailer = builder.build();

    let html = WELCOME_TEMPLATE.replace("{{username}}", username);
    let message = Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject("Welcome to Taskpad")
        .header(ContentType::TEXT_HTML)
        .body(html)?;

    mailer.send(message).await?;
    Ok(())
}

/// Detach the send onto the runtime. There is no caller-visible completion
/// signal and no cancellation.
pub fn spawn_welcome_email(to: String, username: String) {
    tokio::spawn(async move {
        if let Err(e) = send_welcome_email(&to, &username).await {
            tracing::warn!("welcome email to {} failed: {}", to, e);
        }
    });
}
