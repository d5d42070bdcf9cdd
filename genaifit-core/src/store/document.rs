//! Schema-free documents and their typed views.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Collection;

/// Field the store adds to every inserted document.
pub const ID_FIELD: &str = "_id";

/// A schema-free document: a JSON object.
pub type Document = Map<String, Value>;

/// Store-assigned document identifier.
///
/// Generated as a random UUID and kept as a string, so documents written
/// by other tools still compare by their literal `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the identifier of a stored document, if it has one.
    pub fn of(document: &Document) -> Option<DocumentId> {
        document
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(DocumentId::from)
    }

    /// Returns true if `document` carries this identifier.
    pub fn matches(&self, document: &Document) -> bool {
        document.get(ID_FIELD).and_then(Value::as_str) == Some(self.as_str())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A domain record kept in a fixed collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
}

/// A typed record together with its store identifier.
///
/// Serializes flat: `{ "_id": "...", <record fields> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: T,
}

impl<T> std::ops::Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

/// Serializes a value that must be a JSON object into a [`Document`].
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Decodes a stored document into its typed view.
pub fn from_document<T: Record>(document: Document) -> Result<Stored<T>, serde_json::Error> {
    serde_json::from_value(Value::Object(document))
}
