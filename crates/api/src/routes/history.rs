//! History Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;
use storage::RankedReading;

/// All readings ranked by recency within each location
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RankedReading>>, ApiError> {
    let rows = state.repository.list_ranked().await?;
    Ok(Json(rows))
}
