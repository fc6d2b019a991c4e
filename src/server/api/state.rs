//! Centralized state management for the Actix web server
use std::fmt;
use std::sync::Arc;

use crate::notify::mailer::Mailer;
use crate::notify::templates::Templates;
use crate::store::DocumentStore;

/// Global, read-only state
pub trait Global {
    /// Where submitted documents live
    fn store(&self) -> &Arc<dyn DocumentStore>;
    /// How notifications leave the building
    fn mailer(&self) -> &Arc<dyn Mailer>;
    /// Templates the notifications render from
    fn templates(&self) -> &Templates;
    /// Public base URL woven into notification emails
    fn website_url(&self) -> &str;
}

/// Application state
#[derive(Clone)]
pub struct App {
    /// Where submitted documents live
    pub store: Arc<dyn DocumentStore>,
    /// How notifications leave the building
    pub mailer: Arc<dyn Mailer>,
    /// Templates the notifications render from
    pub templates: Templates,
    /// Public base URL woven into notification emails
    pub website_url: String,
}

impl Global for App {
    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.mailer
    }

    fn templates(&self) -> &Templates {
        &self.templates
    }

    fn website_url(&self) -> &str {
        &self.website_url
    }
}

impl fmt::Debug for App {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "Greeting-card app state for site {}",
            self.website_url
        )
    }
}
