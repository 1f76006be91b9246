use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;
use tracing::debug;

use crate::core::profile::LocationProfile;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] AddressError),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Outbound channel that delivers one message from the profile owner to themself.
#[allow(async_fn_in_trait)]
pub trait MailChannel {
    async fn send_to_self(
        &self,
        profile: &LocationProfile,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError>;
}

/// STARTTLS submission, authenticated with the profile's email and password.
#[derive(Debug, Clone)]
pub struct SmtpChannel {
    host: String,
    port: u16,
}

impl SmtpChannel {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl MailChannel for SmtpChannel {
    async fn send_to_self(
        &self,
        profile: &LocationProfile,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let mailbox = Mailbox::new(Some(profile.name().to_string()), profile.email().parse()?);
        let message = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(Credentials::new(
                profile.email().to_string(),
                profile.password().to_string(),
            ))
            .build();

        debug!(host = %self.host, port = self.port, "Submitting message");
        transport.send(message).await?;
        Ok(())
    }
}
