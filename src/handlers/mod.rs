pub mod chat;
pub mod forms;
pub mod health;
pub mod history;
pub mod objectives;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Parses a JSON body whatever the `Content-Type` header says.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
}
