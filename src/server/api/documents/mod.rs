//! API endpoints for listing and creating greeting-card documents.
use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use mongodb::bson;
use serde_json::{Map, Value};

use crate::cards::{GreetingCard, ID_FIELD};
use crate::notify;
use crate::server::errors::HTTPError;

use super::state::{App as AppState, Global as _};

/// Module that maps the HTTP web request to store filters.
pub mod request;

/// Module that maps store results to HTTP web responses.
pub mod response;

/// Handler for listing stored documents.
///
/// Every query parameter narrows the result to documents whose field equals
/// it exactly, compared as text; no parameters returns everything.
#[tracing::instrument(skip(data))]
pub async fn list(
    data: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let filter = match request::filter_from_query(&query) {
        Ok(filter) => filter,
        Err(err) => {
            tracing::debug!("Rejecting document filter: {err}");
            return HttpResponse::BadRequest().json(response::Error::from(HTTPError::InvalidId));
        }
    };
    match data.store().find(filter).await {
        Ok(documents) => HttpResponse::Ok().json(response::documents_json(&documents)),
        Err(err) => {
            tracing::error!("Error fetching documents: {err:?}");
            HttpResponse::InternalServerError()
                .json(response::Error::from(HTTPError::InternalServerError))
        }
    }
}

/// Handler for storing a submitted card.
///
/// The body is stored exactly as received. On success the response already
/// carries the assigned identifier while the two notification emails are
/// still in flight; their fate only ever shows up in the log.
#[tracing::instrument(skip(data, body))]
pub async fn create(
    data: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    let mut document = match bson::to_document(&body.into_inner()) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!("Error converting submission to a document: {err}");
            return HttpResponse::InternalServerError()
                .json(response::Error::from(HTTPError::InternalServerError));
        }
    };
    let inserted_id = match data.store().insert(document.clone()).await {
        Ok(inserted_id) => inserted_id,
        Err(err) => {
            tracing::error!("Error inserting document: {err:?}");
            return HttpResponse::InternalServerError()
                .json(response::Error::from(HTTPError::InternalServerError));
        }
    };
    document.insert(ID_FIELD, inserted_id.clone());
    let card = GreetingCard::from_document(&document);
    notify::queue_notifications(data.mailer(), data.templates(), data.website_url(), &card);
    HttpResponse::Created().json(response::Created::new(&inserted_id))
}
