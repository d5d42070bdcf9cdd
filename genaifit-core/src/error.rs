//! Domain access layer errors.

use thiserror::Error;

use crate::models::Weekday;
use crate::session::SessionError;
use crate::store::{Collection, StoreError};

/// Errors returned by façade operations.
///
/// The display strings are the failure messages callers show to users.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailInUse,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Workout already scheduled for {0}")]
    DayAlreadyScheduled(Weekday),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to update session")]
    Session(#[source] SessionError),

    #[error("Invalid {collection} document: {source}")]
    InvalidRecord {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub(crate) fn invalid<T: crate::store::Record>(source: serde_json::Error) -> Self {
        ApiError::InvalidRecord {
            collection: T::COLLECTION,
            source,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
