//! Domain access layer.
//!
//! [`Backend`] owns the document store, the session and the delay source,
//! and hands out one façade per domain:
//!
//! - [`Auth`]: login, signup, logout, session queries
//! - [`Workouts`]: workout routines addressed by numeric id
//! - [`Nutrition`]: the food log
//! - [`Schedule`]: the weekly workout schedule
//! - [`MealPlans`]: day-by-day meal plans
//!
//! Every operation outside [`Auth`] waits out its own latency, then checks
//! the session before touching the store.

mod auth;
mod meal_plans;
mod nutrition;
mod schedule;
mod workouts;

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub use auth::Auth;
pub use meal_plans::MealPlans;
pub use nutrition::Nutrition;
pub use schedule::Schedule;
pub use workouts::Workouts;

use crate::error::{ApiError, ApiResult};
use crate::latency::{Delay, NoDelay};
use crate::session::Session;
use crate::store::{
    from_document, to_document, Document, DocumentId, DocumentStore, KeyValueStore, MemoryStore,
    Record, Stored,
};

/// Shared context for all façades.
pub struct Backend {
    store: DocumentStore,
    session: Session,
    delay: Arc<dyn Delay>,
}

impl Backend {
    pub fn new(kv: Arc<dyn KeyValueStore>, delay: Arc<dyn Delay>) -> Self {
        Self {
            store: DocumentStore::new(Arc::clone(&kv), Arc::clone(&delay)),
            session: Session::new(kv),
            delay,
        }
    }

    /// Backend over a fresh in-memory substrate with no simulated latency.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(NoDelay))
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn workouts(&self) -> Workouts<'_> {
        Workouts::new(self)
    }

    pub fn nutrition(&self) -> Nutrition<'_> {
        Nutrition::new(self)
    }

    pub fn schedule(&self) -> Schedule<'_> {
        Schedule::new(self)
    }

    pub fn meal_plans(&self) -> MealPlans<'_> {
        MealPlans::new(self)
    }

    async fn pause(&self, duration: Duration) {
        self.delay.sleep(duration).await;
    }

    /// Waits out `latency`, then fails unless a session is active.
    async fn gate(&self, latency: Duration) -> ApiResult<()> {
        self.pause(latency).await;

        if !self.session.is_authenticated() {
            tracing::debug!("Rejected request without a session");
            return Err(ApiError::AuthenticationRequired);
        }
        Ok(())
    }

    async fn load<T: Record>(&self) -> ApiResult<Vec<Stored<T>>> {
        load_records(&self.store).await
    }

    async fn insert<T: Record>(&self, record: &T) -> ApiResult<Stored<T>> {
        insert_record(&self.store, record).await
    }

    async fn insert_if<T, F>(&self, build: F) -> ApiResult<Option<Stored<T>>>
    where
        T: Record,
        F: FnOnce(&[Stored<T>]) -> Option<T>,
    {
        insert_record_if(&self.store, build).await
    }

    async fn update<T: Record, P: Serialize>(
        &self,
        id: &DocumentId,
        patch: &P,
    ) -> ApiResult<Option<Stored<T>>> {
        let patch = to_document(patch).map_err(ApiError::invalid::<T>)?;
        let updated = self.store.update_document(T::COLLECTION, id, patch).await?;
        decode_one(updated)
    }

    /// Applies `patch` to `id` once `check` accepts the collection as it
    /// stands under the store lock. A missing id is `Ok(None)`.
    async fn update_if<T, P, F>(
        &self,
        id: &DocumentId,
        patch: &P,
        check: F,
    ) -> ApiResult<Option<Stored<T>>>
    where
        T: Record,
        P: Serialize,
        F: FnOnce(&[Stored<T>]) -> ApiResult<()>,
    {
        let patch = to_document(patch).map_err(ApiError::invalid::<T>)?;
        let updated = self
            .store
            .update_document_if::<_, ApiError>(T::COLLECTION, id, patch, |documents| {
                check(&decode_all::<T>(documents.to_vec())?)
            })
            .await?;
        decode_one(updated)
    }

    async fn delete<T: Record>(&self, id: &DocumentId) -> ApiResult<Vec<Stored<T>>> {
        let remaining = self.store.delete_document(T::COLLECTION, id).await?;
        decode_all(remaining)
    }
}

/// Reads and decodes a whole collection.
pub(crate) async fn load_records<T: Record>(store: &DocumentStore) -> ApiResult<Vec<Stored<T>>> {
    let documents = store.get_collection(T::COLLECTION).await?;
    decode_all(documents)
}

pub(crate) async fn insert_record<T: Record>(
    store: &DocumentStore,
    record: &T,
) -> ApiResult<Stored<T>> {
    let document = to_document(record).map_err(ApiError::invalid::<T>)?;
    let inserted = store.insert_document(T::COLLECTION, document).await?;
    from_document(inserted).map_err(ApiError::invalid::<T>)
}

/// Inserts the record `build` derives from the decoded collection, all
/// under one store lock. `None` from `build` inserts nothing.
pub(crate) async fn insert_record_if<T, F>(
    store: &DocumentStore,
    build: F,
) -> ApiResult<Option<Stored<T>>>
where
    T: Record,
    F: FnOnce(&[Stored<T>]) -> Option<T>,
{
    let inserted = store
        .insert_document_if::<_, ApiError>(T::COLLECTION, |documents| {
            let existing = decode_all::<T>(documents.to_vec())?;
            build(&existing)
                .map(|record| to_document(&record).map_err(ApiError::invalid::<T>))
                .transpose()
        })
        .await?;
    decode_one(inserted)
}

fn decode_all<T: Record>(documents: Vec<Document>) -> ApiResult<Vec<Stored<T>>> {
    documents
        .into_iter()
        .map(from_document::<T>)
        .collect::<Result<_, _>>()
        .map_err(ApiError::invalid::<T>)
}

fn decode_one<T: Record>(document: Option<Document>) -> ApiResult<Option<Stored<T>>> {
    document
        .map(from_document::<T>)
        .transpose()
        .map_err(ApiError::invalid::<T>)
}
