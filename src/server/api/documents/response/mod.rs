//! Maps store results to the JSON bodies clients see.
use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::server::errors::HTTPError;

/// Confirmation wording for a successful create.
pub const CREATED_MESSAGE: &str = "Document inserted successfully!";

/// Response for a successfully created document.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier the document was filed under.
    pub inserted_id: Value,
}

impl Created {
    /// Confirmation body for a document filed under `inserted_id`.
    #[must_use]
    pub fn new(inserted_id: &Bson) -> Self {
        Self {
            message: CREATED_MESSAGE.to_owned(),
            inserted_id: bson_to_json(inserted_id),
        }
    }
}

/// Response for a failed request.
#[derive(Serialize, Debug)]
pub struct Error {
    /// What went wrong.
    pub error: String,
}

impl From<HTTPError> for Error {
    fn from(err: HTTPError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Render stored documents in the list-endpoint body shape.
#[must_use]
pub fn documents_json(documents: &[Document]) -> Vec<Value> {
    documents.iter().map(document_to_json).collect()
}

/// A stored document as plain JSON, field order preserved.
///
/// Identifiers flatten to their hex text instead of the extended-JSON
/// `{"$oid": ...}` wrapper, so a document round-trips to the same JSON the
/// client submitted plus a textual `_id`.
#[must_use]
pub fn document_to_json(document: &Document) -> Value {
    let mut map = Map::new();
    for (key, value) in document {
        map.insert(key.clone(), bson_to_json(value));
    }
    Value::Object(map)
}

/// One stored value as plain JSON.
fn bson_to_json(value: &Bson) -> Value {
    match *value {
        Bson::Document(ref document) => document_to_json(document),
        Bson::Array(ref items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::String(ref text) => Value::String(text.clone()),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Int32(num) => Value::from(num),
        Bson::Int64(num) => Value::from(num),
        // Non-finite doubles have no JSON form and become null.
        Bson::Double(num) => Value::from(num),
        Bson::Null => Value::Null,
        // Types a JSON submission can never contain; only reachable when
        // something else wrote to the collection.
        ref other => other.clone().into_relaxed_extjson(),
    }
}
