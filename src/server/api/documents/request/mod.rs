//! Maps the list endpoint's query string to a store filter.
use std::collections::HashMap;

use mongodb::bson::{oid::ObjectId, Document};

use crate::cards::ID_FIELD;

/// Build an exact-match filter from the request's query parameters.
///
/// Every parameter must equal its stored field, compared as text. `_id` is
/// the exception: its value has to parse as a document identifier and the
/// filter then matches the identifier itself.
///
/// # Errors
/// Errors if `_id` is present but does not parse as an identifier.
pub fn filter_from_query(query: &HashMap<String, String>) -> anyhow::Result<Document> {
    let mut filter = Document::new();
    for (key, value) in query {
        if key == ID_FIELD {
            filter.insert(ID_FIELD, ObjectId::parse_str(value)?);
        } else {
            filter.insert(key.as_str(), value.as_str());
        }
    }
    Ok(filter)
}
