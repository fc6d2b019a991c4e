//! A central place to register App routes.
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use super::documents;
use super::state::Global;

/// Central place to register all the App routing.
///
/// The whole API is two operations on one resource: listing stored documents
/// and creating a new one.
#[tracing::instrument(skip(app, state))]
pub fn register_api<
    T: Global + Clone + 'static,
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    mut app: App<V>,
    state: &T,
) -> App<V> {
    app = app
        .service(
            web::scope("/api").service(
                web::resource("/documents")
                    .route(web::get().to(documents::list))
                    .route(web::post().to(documents::create)),
            ),
        )
        .app_data(web::Data::new(state.clone()));
    app
}
