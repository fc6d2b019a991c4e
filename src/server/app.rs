//! Serve the greeting-card API.
#![allow(clippy::exit, clippy::module_name_repetitions)]
use crate::config::Config;
use crate::notify::mailer::SmtpMailer;
use crate::notify::templates::Templates;
use crate::server::tracing::CupidRootSpanBuilder;
use crate::store::{init, MongoStore};
use actix_cors::Cors;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};

use std::{io, path::PathBuf, process, sync::Arc};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;
use tracing_actix_web::TracingLogger;

use super::api::routes;
use super::api::state::{App as AppState, Global};

/// Serve the greeting-card API.
#[actix_web::main]
pub async fn serve(config: Config, templates_path: PathBuf, port: u16) -> io::Result<()> {
    let bind = "127.0.0.1";
    tracing::info!("Running greeting-card server on http://{bind}:{port}.");

    let client = match init::connect(&config.mongo_url).await {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(
                "error: could not set up the document store. Confirm that MONGO_URL is a valid connection string."
            );
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };

    let mailer = match SmtpMailer::new(config.email_user.as_deref(), config.email_pass.as_deref()) {
        Ok(mailer) => mailer,
        Err(err) => {
            tracing::error!("error: could not set up the notification mailer.");
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };

    let templates = Templates::load(&templates_path);
    let state = AppState {
        store: Arc::new(MongoStore::new(&client)),
        mailer: Arc::new(mailer),
        templates,
        website_url: config.website_url,
    };

    let frontend_url = config.frontend_url;
    HttpServer::new(move || {
        // Only the configured frontend origin may call the API from a
        // browser; methods and headers are unrestricted within it.
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allow_any_method()
            .allow_any_header();
        init_app(&state).wrap(cors)
    })
    .bind((bind, port))?
    .run()
    .await
}

/// Initialize the application and all possible routing at start-up time.
///
/// # Arguments
/// * `state` - The application state
pub fn init_app<T: Global + Clone + 'static>(
    state: &T,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    let app = App::new().wrap(TracingLogger::<CupidRootSpanBuilder>::new());
    routes::register_api(app, state)
}
