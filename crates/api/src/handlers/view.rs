//! Handlers for top-level navigation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use khizana_core::app::{Action, View};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

/// GET /api/v1/view
pub async fn get_view(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = state.wardrobe.read().await.view();
    Ok(Json(DataResponse {
        data: ViewBody { view },
    }))
}

/// PUT /api/v1/view
///
/// Switch the active view. Setting the current view again is a no-op.
pub async fn set_view(
    State(state): State<AppState>,
    Json(input): Json<ViewBody>,
) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::Navigate(input.view)).await?;

    Ok(Json(DataResponse { data: input }))
}
