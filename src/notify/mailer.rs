//! Mail delivery over SMTP.
use std::fmt;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

/// SMTP relay the notification account lives behind.
const SMTP_RELAY: &str = "smtp.gmail.com";
/// Display name on outgoing notifications.
const FROM_NAME: &str = "VC++";

/// Everything that can go wrong delivering one email.
#[derive(Debug, Error)]
pub enum MailError {
    /// `EMAIL_USER`/`EMAIL_PASS` were not configured at startup.
    #[error("mail credentials are not configured")]
    MissingCredentials,
    /// An address on the card does not parse as a mailbox.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    /// The message itself could not be assembled.
    #[error("could not assemble message: {0}")]
    Build(#[from] lettre::error::Error),
    /// The relay refused or the connection failed.
    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery seam for notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one HTML email to `to`.
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), MailError>;
}

/// Gmail-relayed mailer used in production.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Option<Mailbox>,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self.from.as_ref() {
            Some(from) => write!(formatter, "Mailer for {from} via {SMTP_RELAY}"),
            None => write!(formatter, "Mailer without credentials"),
        }
    }
}

impl SmtpMailer {
    /// Build the mailer from the configured credentials.
    ///
    /// Missing or unparseable credentials do not fail construction; the app
    /// keeps storing cards and every attempted send reports
    /// [`MailError::MissingCredentials`] instead.
    ///
    /// # Errors
    /// Errors only if the relay transport itself cannot be built.
    pub fn new(email_user: Option<&str>, email_pass: Option<&str>) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY)?;
        let mut from = None;
        match (email_user, email_pass) {
            (Some(user), Some(pass)) => match format!("{FROM_NAME} <{user}>").parse::<Mailbox>() {
                Ok(mailbox) => {
                    from = Some(mailbox);
                    builder =
                        builder.credentials(Credentials::new(user.to_owned(), pass.to_owned()));
                }
                Err(err) => {
                    tracing::warn!(
                        "EMAIL_USER '{user}' does not parse as a mail address ({err}); notifications disabled"
                    );
                }
            },
            _ => {
                tracing::warn!(
                    "EMAIL_USER/EMAIL_PASS not set; notifications will fail until they are"
                );
            }
        }
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), MailError> {
        let Some(from) = self.from.clone() else {
            return Err(MailError::MissingCredentials);
        };
        let message = Message::builder()
            .from(from)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)?;
        self.transport.send(message).await?;
        Ok(())
    }
}
