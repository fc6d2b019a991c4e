//! Semantic view of a stored greeting document.
//!
//! Cards are stored exactly as submitted, as schemaless documents. This
//! module names the handful of fields the notification side of the app cares
//! about and extracts them, defaulting anything absent to an empty string so
//! a sparse submission still renders.

use mongodb::bson::Document;

/// Key under which the store-assigned identifier lives.
pub const ID_FIELD: &str = "_id";
/// Key holding the receiver's email address.
pub const RECEIVER_EMAIL_FIELD: &str = "receiverEmail";
/// Key holding the receiver's display name.
pub const RECEIVER_NAME_FIELD: &str = "receiverName";
/// Key holding the sender's display name.
pub const SENDER_NAME_FIELD: &str = "senderName";
/// Key holding the sender's email address. The public submission form labels
/// the input rather than naming it, so the key arrives with a space in it.
pub const SENDER_EMAIL_FIELD: &str = "Email Address";
/// Key holding the gift-package marker.
pub const GIFT_PACKAGE_FIELD: &str = "giftPackage";

/// The only stored value that counts as "gift package included". The check is
/// deliberately exact: `"yes"`, `"Yes "` and a real boolean all count as no.
pub const GIFT_PACKAGE_YES: &str = "Yes";

/// The fields of a greeting card that notifications are rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingCard {
    /// Hex form of the store-assigned identifier; doubles as the redirect
    /// token embedded in outgoing emails.
    pub id: String,
    /// Who the card is for.
    pub receiver_name: String,
    /// Where the receiver-facing notification goes.
    pub receiver_email: String,
    /// Who sent the card.
    pub sender_name: String,
    /// Where the sender-facing notification goes.
    pub sender_email: String,
    /// Whether the sender paid for the physical gift package.
    pub gift_package: bool,
}

impl GreetingCard {
    /// Extract the semantic fields from a stored document.
    ///
    /// Absent or non-string fields become empty strings; an absent or
    /// non-`ObjectId` identifier becomes an empty token.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document
                .get_object_id(ID_FIELD)
                .map(|oid| oid.to_hex())
                .unwrap_or_default(),
            receiver_name: string_field(document, RECEIVER_NAME_FIELD),
            receiver_email: string_field(document, RECEIVER_EMAIL_FIELD),
            sender_name: string_field(document, SENDER_NAME_FIELD),
            sender_email: string_field(document, SENDER_EMAIL_FIELD),
            gift_package: document.get_str(GIFT_PACKAGE_FIELD) == Ok(GIFT_PACKAGE_YES),
        }
    }
}

/// Read a string field, treating anything else (absent, wrong type) as empty.
fn string_field(document: &Document, key: &str) -> String {
    document.get_str(key).unwrap_or_default().to_owned()
}
