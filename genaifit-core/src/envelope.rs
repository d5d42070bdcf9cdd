//! Uniform success/failure wrapper handed to UI collaborators.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::models::UserProfile;

/// `{ success, data?, user?, message? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            user: None,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            user: None,
            message: Some(message.into()),
        }
    }
}

impl Envelope<()> {
    /// Success with no payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            user: None,
            message: None,
        }
    }

    /// Wraps an auth result, placing the profile under `user`.
    pub fn auth<E: Display>(result: Result<UserProfile, E>) -> Self {
        match result {
            Ok(profile) => Self {
                success: true,
                data: None,
                user: Some(profile),
                message: None,
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
