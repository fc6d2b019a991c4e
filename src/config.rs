//! Environment-backed configuration, read once at process start.

use std::env;
use url::Url;

/// Origin of the Vite dev frontend, used as the default for both the CORS
/// origin and the public site URL.
const DEFAULT_SITE_URL: &str = "http://localhost:5173";

/// Process-wide configuration.
///
/// Constructed once at startup and handed to the pieces that need it; request
/// handlers never read the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (`MONGO_URL`). Required.
    pub mongo_url: String,
    /// Origin allowed through CORS (`FRONTEND_URL`).
    pub frontend_url: String,
    /// Public base URL substituted into notification emails (`WEBSITE_URL`).
    pub website_url: String,
    /// Mail account used as the authenticated sender (`EMAIL_USER`).
    pub email_user: Option<String>,
    /// App password for the sender account (`EMAIL_PASS`).
    pub email_pass: Option<String>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// # Errors
    /// Errors if `MONGO_URL` is absent. Every other value either has a
    /// default or is allowed to be missing: absent mail credentials mean
    /// notification sends fail at send time and are logged there.
    pub fn from_env() -> anyhow::Result<Self> {
        let Ok(mongo_url) = env::var("MONGO_URL") else {
            anyhow::bail!(
                "Missing MONGO_URL. Create a .env file with MONGO_URL=mongodb://... or set the environment variable."
            );
        };
        Ok(Self {
            mongo_url,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_SITE_URL.to_owned()),
            website_url: website_url_from_env(),
            email_user: env::var("EMAIL_USER").ok(),
            email_pass: env::var("EMAIL_PASS").ok(),
        })
    }
}

/// `WEBSITE_URL`, kept as the exact configured text so templates compose it
/// unchanged. The value is checked with [`Url::parse`] and replaced by the
/// default when it does not parse, since a garbled base URL would otherwise
/// end up inside every outgoing email.
fn website_url_from_env() -> String {
    let raw = env::var("WEBSITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_owned());
    match Url::parse(&raw) {
        Ok(_) => raw,
        Err(err) => {
            tracing::warn!(
                "Ignoring unparseable WEBSITE_URL '{raw}' ({err}), using {DEFAULT_SITE_URL}"
            );
            DEFAULT_SITE_URL.to_owned()
        }
    }
}
