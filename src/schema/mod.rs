//! Request body shapes and their validation.
//!
//! A body passes only when it is a JSON object whose fields match the shape.
//! Unknown keys are ignored. Validation never panics, and the reason for a
//! failure is for logs only: clients always get the same 411 response.

pub mod extract;
pub mod post;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use extract::Validated;
pub use post::{CreatePostInput, UpdatePostInput};

/// A named body shape
pub trait Shape: DeserializeOwned {
    const NAME: &'static str;
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("body does not match {shape} shape: {reason}")]
pub struct ValidationFailure {
    pub shape: &'static str,
    pub reason: String,
}

impl ValidationFailure {
    fn new<T: Shape, E: std::fmt::Display>(reason: E) -> Self {
        Self {
            shape: T::NAME,
            reason: reason.to_string(),
        }
    }
}

/// Validate raw body bytes against shape `T`
pub fn safe_parse<T: Shape>(body: &[u8]) -> Result<T, ValidationFailure> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ValidationFailure::new::<T, _>(e))?;
    safe_parse_value(value)
}

/// Validate an already-decoded JSON value against shape `T`
pub fn safe_parse_value<T: Shape>(value: Value) -> Result<T, ValidationFailure> {
    if !value.is_object() {
        return Err(ValidationFailure::new::<T, _>("expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| ValidationFailure::new::<T, _>(e))
}
