use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_http::Request;
use actix_service::Service;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use actix_web::Error;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use cupid::notify::mailer::{MailError, Mailer};
use cupid::notify::templates::Templates;
use cupid::server::api::state::App as AppState;
use cupid::server::app::init_app;
use cupid::store::DocumentStore;

pub const TEST_WEBSITE_URL: &str = "http://localhost:5173";

/// In-memory document store standing in for MongoDB. Assigns fresh object
/// ids on insert the way the real store does, and counts queries so tests
/// can prove a request never reached it.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<Document>>,
    find_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_documents(documents: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            documents: Mutex::new(documents),
            find_calls: AtomicUsize::new(0),
        })
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn find_call_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, filter: Document) -> anyhow::Result<Vec<Document>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut document: Document) -> anyhow::Result<Bson> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document.get("_id").cloned().unwrap();
        self.documents.lock().unwrap().push(document);
        Ok(inserted_id)
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

/// Store whose every operation fails, for exercising the error responses.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(&self, _filter: Document) -> anyhow::Result<Vec<Document>> {
        anyhow::bail!("store offline")
    }

    async fn insert(&self, _document: Document) -> anyhow::Result<Bson> {
        anyhow::bail!("store offline")
    }
}

/// One delivered email, as the fake mailer saw it.
#[derive(Clone, Debug)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mailer that records every send instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sends: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sends(&self) -> Vec<SentMail> {
        self.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), MailError> {
        self.sends.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            html_body,
        });
        Ok(())
    }
}

/// Mailer that refuses every send.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _html_body: String) -> Result<(), MailError> {
        Err(MailError::MissingCredentials)
    }
}

/// Mailer that refuses one address and records every other send.
pub struct RejectingMailer {
    refused: String,
    delivered: RecordingMailer,
}

impl RejectingMailer {
    pub fn new(refused: &str) -> Arc<Self> {
        Arc::new(Self {
            refused: refused.to_owned(),
            delivered: RecordingMailer::default(),
        })
    }

    pub fn delivered(&self) -> &RecordingMailer {
        &self.delivered
    }
}

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), MailError> {
        if to == self.refused {
            return Err(MailError::MissingCredentials);
        }
        self.delivered.send(to, subject, html_body).await
    }
}

/// The templates shipped with the crate, exactly as production loads them.
pub fn load_templates() -> Templates {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("templates");
    let templates = Templates::load(&path);
    assert!(
        templates.receiver().is_some() && templates.sender().is_some(),
        "shipped templates should load"
    );
    templates
}

pub fn state(
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    templates: Templates,
) -> AppState {
    AppState {
        store,
        mailer,
        templates,
        website_url: TEST_WEBSITE_URL.to_owned(),
    }
}

pub async fn initialize_app(
    state: &AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(init_app(state)).await
}

/// Let the fire-and-forget notification tasks run until `count` sends have
/// been recorded. Panics if they never arrive.
pub async fn wait_for_sends(mailer: &RecordingMailer, count: usize) -> Vec<SentMail> {
    for _ in 0_u8..100 {
        let sends = mailer.sends();
        if sends.len() >= count {
            return sends;
        }
        actix_web::rt::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "expected {count} notification sends, got {}",
        mailer.sends().len()
    );
}

/// Give the notification tasks a moment to run, for asserting that nothing
/// was sent.
pub async fn settle_notifications() {
    actix_web::rt::time::sleep(Duration::from_millis(50)).await;
}
