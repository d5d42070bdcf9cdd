//! Simulated document database.
//!
//! A minimal MongoDB-like document store: named collections of schema-free
//! JSON documents, each tagged with a store-generated `_id`, persisted
//! through a synchronous key-value substrate.

mod collection;
mod document;
mod document_store;
mod kv;

use thiserror::Error;

pub use collection::Collection;
pub use document::{from_document, to_document, Document, DocumentId, Record, Stored, ID_FIELD};
pub use document_store::DocumentStore;
pub use kv::{FileStore, KeyValueStore, KvError, MemoryStore};

/// Underlying cause of a failed store operation.
#[derive(Error, Debug)]
pub enum StoreFailure {
    #[error(transparent)]
    Substrate(#[from] KvError),

    #[error("Invalid collection data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by [`DocumentStore`] operations.
///
/// The display strings are the user-facing failure messages.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to fetch {collection}")]
    Fetch {
        collection: Collection,
        #[source]
        source: StoreFailure,
    },

    #[error("Failed to insert into {collection}")]
    Insert {
        collection: Collection,
        #[source]
        source: StoreFailure,
    },

    #[error("Failed to update in {collection}")]
    Update {
        collection: Collection,
        #[source]
        source: StoreFailure,
    },

    #[error("Failed to delete from {collection}")]
    Delete {
        collection: Collection,
        #[source]
        source: StoreFailure,
    },
}
