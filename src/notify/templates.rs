//! Email templates, read once at startup.
use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

/// File name of the template behind receiver notifications.
pub const RECEIVER_TEMPLATE_FILE: &str = "receiverTemplate.hbs";
/// File name of the template behind sender notifications.
pub const SENDER_TEMPLATE_FILE: &str = "senderTemplate.hbs";

/// The pair of notification templates.
///
/// Loading is all-or-nothing: if either file cannot be read, the app starts
/// with no templates at all. It still stores cards, it just stops emailing
/// about them, and every skipped send says so in the log.
#[derive(Debug, Clone)]
pub struct Templates {
    receiver: Option<String>,
    sender: Option<String>,
}

impl Templates {
    /// Read both templates from `dir`.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(templates) => templates,
            Err(err) => {
                tracing::error!("Error loading email templates: {err}");
                Self::none()
            }
        }
    }

    fn try_load(dir: &Path) -> std::io::Result<Self> {
        Ok(Self {
            receiver: Some(fs::read_to_string(dir.join(RECEIVER_TEMPLATE_FILE))?),
            sender: Some(fs::read_to_string(dir.join(SENDER_TEMPLATE_FILE))?),
        })
    }

    /// No templates at all; every send is skipped.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            receiver: None,
            sender: None,
        }
    }

    /// Template for receiver-facing notifications, if loaded.
    #[must_use]
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Template for sender-facing notifications, if loaded.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }
}

/// Render a template with the given values. Interpolated values are
/// HTML-escaped.
///
/// # Errors
/// Errors if the template text does not parse or rendering fails.
pub fn render<T: Serialize>(template: &str, values: &T) -> Result<String, handlebars::RenderError> {
    Handlebars::new().render_template(template, values)
}
