//! Temperature Routes

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::validation::{parse_temperature, validate_location};
use crate::AppState;
use storage::NewReading;

/// Query parameters for recording a reading
#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    /// Temperature as a numeric string
    pub temp: Option<String>,
}

/// Response for a recorded reading
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    pub location: String,
    pub temperature: f64,
}

/// Response for a delete request
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Record a reading for a location
pub async fn record_reading(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Path(location) = path?;
    let Query(params) = query?;
    validate_location(&location)?;
    let temperature = parse_temperature(params.temp.as_deref())?;

    let reading = NewReading {
        location,
        temperature,
    };
    let id = state.repository.insert(&reading).await?;
    info!("Recorded reading {} for {}: {}", id, reading.location, temperature);

    Ok(Json(RecordResponse {
        success: true,
        location: reading.location,
        temperature,
    }))
}

/// Delete a reading by id
///
/// Succeeds whether or not a row was removed.
pub async fn delete_reading(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = path?;
    let affected = state.repository.delete(&id).await?;
    info!("Delete request for reading {} removed {} row(s)", id, affected);

    Ok(Json(DeleteResponse {
        success: true,
        message: "Temperature record deleted".to_string(),
    }))
}
