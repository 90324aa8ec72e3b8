//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Read models borrow
//! from the locked wardrobe, so handlers serialize them with [`snapshot`]
//! while the lock is held and return the resulting JSON value.

use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Serialize a borrowed read model into an owned `{ "data": ... }` body.
pub fn snapshot<T: Serialize>(view: &T) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let data = serde_json::to_value(view)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize response: {e}")))?;
    Ok(Json(DataResponse { data }))
}
