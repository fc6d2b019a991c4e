//! Outbound notifications.
//!
//! Storing a card queues two emails: one telling the receiver a card is
//! waiting for them, one confirming to the sender that it went out. Both are
//! fire-and-forget; the HTTP response never waits on them and a failed or
//! skipped send only ever shows up in the log.
pub mod mailer;
pub mod templates;

use std::sync::Arc;

use derive_more::Display;
use serde_json::json;

use crate::cards::GreetingCard;
use crate::notify::mailer::Mailer;
use crate::notify::templates::Templates;

/// Which half of the couple a notification addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotificationKind {
    /// The person the card was made for.
    #[display(fmt = "receiver")]
    Receiver,
    /// The person who made the card.
    #[display(fmt = "sender")]
    Sender,
}

impl NotificationKind {
    /// Subject line for this kind of notification.
    #[must_use]
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Receiver => "[Valentine's++] A Heartfelt Surprise Awaits You! 🌟💌",
            Self::Sender => "[Valentine's++] Your Valentine's++ Surprise is On Its Way! 🌹💌",
        }
    }

    /// Address on the card this kind of notification goes to.
    #[must_use]
    pub fn destination(self, card: &GreetingCard) -> &str {
        match self {
            Self::Receiver => &card.receiver_email,
            Self::Sender => &card.sender_email,
        }
    }
}

/// Queue both notifications for a freshly stored card and return immediately.
///
/// Each send runs as its own task, so one failing or hanging never holds up
/// the other, and neither holds up the caller.
pub fn queue_notifications(
    mailer: &Arc<dyn Mailer>,
    templates: &Templates,
    website_url: &str,
    card: &GreetingCard,
) {
    for kind in [NotificationKind::Receiver, NotificationKind::Sender] {
        let mailer = Arc::clone(mailer);
        let templates = templates.clone();
        let website_url = website_url.to_owned();
        let card = card.clone();
        actix_web::rt::spawn(async move {
            if let Err(err) =
                send_notification(mailer.as_ref(), &templates, &website_url, &card, kind).await
            {
                tracing::error!("Error sending {kind} notification for card {}: {err:?}", card.id);
            }
        });
    }
}

/// Render and deliver a single notification.
///
/// A missing template is not an error: the send is skipped with a log line,
/// since the app is expected to keep storing cards without its templates.
///
/// # Errors
/// Errors if the template does not render or the mailer refuses the message.
pub async fn send_notification(
    mailer: &dyn Mailer,
    templates: &Templates,
    website_url: &str,
    card: &GreetingCard,
    kind: NotificationKind,
) -> anyhow::Result<()> {
    let template = match kind {
        NotificationKind::Receiver => templates.receiver(),
        NotificationKind::Sender => templates.sender(),
    };
    let Some(template) = template else {
        tracing::info!(
            "Skipping {kind} notification for card {}: template not loaded",
            card.id
        );
        return Ok(());
    };
    let html = templates::render(template, &template_values(card, website_url, kind))?;
    mailer.send(kind.destination(card), kind.subject(), html).await?;
    tracing::info!("Email sent for card {} ({kind} notification)", card.id);
    Ok(())
}

/// Values a notification template renders with. The card id doubles as the
/// path the frontend opens the card under, so it is exposed as the redirect
/// link.
fn template_values(
    card: &GreetingCard,
    website_url: &str,
    kind: NotificationKind,
) -> serde_json::Value {
    match kind {
        NotificationKind::Receiver => json!({
            "receiverName": card.receiver_name,
            "redirectLink": card.id,
            "packageBoolean": card.gift_package,
            "websiteUrl": website_url,
        }),
        NotificationKind::Sender => json!({
            "senderName": card.sender_name,
            "redirectLink": card.id,
            "packageBoolean": card.gift_package,
            "websiteUrl": website_url,
        }),
    }
}
