//! Collection-scoped CRUD over a key-value substrate.
//!
//! Each collection is persisted as one JSON array under its name. Every
//! operation waits out the simulated round trip first, then performs its
//! read-modify-write in a single synchronous segment under a mutex, so two
//! operations on the same collection never interleave their rewrites.

use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use super::document::{Document, DocumentId, ID_FIELD};
use super::kv::KeyValueStore;
use super::{Collection, StoreError, StoreFailure};
use crate::latency::{self, Delay};

/// Simulated document database.
pub struct DocumentStore {
    kv: Arc<dyn KeyValueStore>,
    delay: Arc<dyn Delay>,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, delay: Arc<dyn Delay>) -> Self {
        Self {
            kv,
            delay,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the substrate this store persists into.
    pub fn substrate(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    /// Reads every document in a collection, newest first.
    ///
    /// An absent collection reads as empty.
    pub async fn get_collection(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        self.read(collection).map_err(|source| {
            tracing::error!("Error getting collection {}: {}", collection, source);
            StoreError::Fetch { collection, source }
        })
    }

    /// Inserts a document with a freshly generated `_id` at the head of the
    /// collection and returns it.
    ///
    /// Any `_id` supplied by the caller is replaced.
    pub async fn insert_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StoreError> {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        self.insert_locked(collection, document)
            .map_err(|source| insert_failed(collection, source))
    }

    /// Inserts the document `build` derives from the current collection.
    ///
    /// `build` runs under the same lock as the write. Returning `Ok(None)`
    /// from it inserts nothing.
    pub async fn insert_document_if<F, E>(
        &self,
        collection: Collection,
        build: F,
    ) -> Result<Option<Document>, E>
    where
        F: FnOnce(&[Document]) -> Result<Option<Document>, E>,
        E: From<StoreError>,
    {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        let mut documents = self
            .read(collection)
            .map_err(|source| insert_failed(collection, source))?;

        let Some(document) = build(&documents)? else {
            tracing::debug!("Conditional insert into {} declined", collection);
            return Ok(None);
        };

        let inserted = self
            .prepend(collection, &mut documents, document)
            .map_err(|source| insert_failed(collection, source))?;
        Ok(Some(inserted))
    }

    /// Shallow-merges `update` into the document with the given id.
    ///
    /// Returns `Ok(None)` when no document matches; the collection is still
    /// rewritten unchanged in that case. The `_id` field cannot be changed.
    pub async fn update_document(
        &self,
        collection: Collection,
        id: &DocumentId,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        self.update_locked(collection, id, update)
            .map_err(|source| update_failed(collection, source))
    }

    /// Shallow-merges `update` into the document with the given id once
    /// `check` accepts the current collection.
    ///
    /// Unlike [`update_document`](Self::update_document), a missing id
    /// returns `Ok(None)` before `check` runs and nothing is written. An
    /// error from `check` also leaves the collection untouched.
    pub async fn update_document_if<F, E>(
        &self,
        collection: Collection,
        id: &DocumentId,
        update: Document,
        check: F,
    ) -> Result<Option<Document>, E>
    where
        F: FnOnce(&[Document]) -> Result<(), E>,
        E: From<StoreError>,
    {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        let mut documents = self
            .read(collection)
            .map_err(|source| update_failed(collection, source))?;

        if !documents.iter().any(|d| id.matches(d)) {
            tracing::debug!("Update in {} matched no document with id {}", collection, id);
            return Ok(None);
        }
        check(&documents)?;

        let updated = merge(&mut documents, id, &update);
        self.write(collection, &documents)
            .map_err(|source| update_failed(collection, source))?;
        Ok(updated)
    }

    /// Removes the document with the given id and returns what remains.
    ///
    /// Deleting an id that is not present succeeds and changes nothing.
    pub async fn delete_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> Result<Vec<Document>, StoreError> {
        self.delay.sleep(latency::STORE).await;

        let _guard = self.lock();
        self.delete_locked(collection, id).map_err(|source| {
            tracing::error!("Error deleting from {}: {}", collection, source);
            StoreError::Delete { collection, source }
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self, collection: Collection) -> Result<Vec<Document>, StoreFailure> {
        match self.kv.get(collection.name())? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, collection: Collection, documents: &[Document]) -> Result<(), StoreFailure> {
        let raw = serde_json::to_string(documents)?;
        self.kv.set(collection.name(), raw)?;
        Ok(())
    }

    fn insert_locked(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StoreFailure> {
        let mut documents = self.read(collection)?;
        self.prepend(collection, &mut documents, document)
    }

    /// Tags `document` with a fresh `_id`, puts it at the head of
    /// `documents` and writes the collection back.
    fn prepend(
        &self,
        collection: Collection,
        documents: &mut Vec<Document>,
        mut document: Document,
    ) -> Result<Document, StoreFailure> {
        let mut id = DocumentId::generate();
        while documents.iter().any(|d| id.matches(d)) {
            id = DocumentId::generate();
        }
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        documents.insert(0, document.clone());
        self.write(collection, documents)?;

        tracing::debug!("Inserted {} into {}", id, collection);
        Ok(document)
    }

    fn update_locked(
        &self,
        collection: Collection,
        id: &DocumentId,
        update: Document,
    ) -> Result<Option<Document>, StoreFailure> {
        let mut documents = self.read(collection)?;
        let updated = merge(&mut documents, id, &update);
        self.write(collection, &documents)?;

        if updated.is_none() {
            tracing::debug!("Update in {} matched no document with id {}", collection, id);
        }
        Ok(updated)
    }

    fn delete_locked(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> Result<Vec<Document>, StoreFailure> {
        let mut documents = self.read(collection)?;
        documents.retain(|d| !id.matches(d));
        self.write(collection, &documents)?;

        tracing::debug!("Deleted {} from {}", id, collection);
        Ok(documents)
    }
}

/// Copies every field of `update` except `_id` onto the matching document.
fn merge(documents: &mut [Document], id: &DocumentId, update: &Document) -> Option<Document> {
    let mut updated = None;
    for document in documents.iter_mut().filter(|d| id.matches(d)) {
        for (field, value) in update {
            if field != ID_FIELD {
                document.insert(field.clone(), value.clone());
            }
        }
        updated = Some(document.clone());
    }
    updated
}

fn insert_failed(collection: Collection, source: StoreFailure) -> StoreError {
    tracing::error!("Error inserting into {}: {}", collection, source);
    StoreError::Insert { collection, source }
}

fn update_failed(collection: Collection, source: StoreFailure) -> StoreError {
    tracing::error!("Error updating in {}: {}", collection, source);
    StoreError::Update { collection, source }
}
