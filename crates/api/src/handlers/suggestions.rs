//! Handlers for occasion-based outfit suggestions.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use khizana_core::app::{Action, Wardrobe};
use khizana_core::suggestion::ResolvedSuggestion;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::snapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub occasion: String,
}

/// Suggestions with their descriptors resolved to current wardrobe items.
#[derive(Debug, Serialize)]
pub struct SuggestionsView<'a> {
    pub occasion: &'a str,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub suggestions: Vec<ResolvedSuggestion<'a>>,
}

impl<'a> SuggestionsView<'a> {
    pub fn new(wardrobe: &'a Wardrobe) -> Self {
        let board = wardrobe.suggestions();
        Self {
            occasion: board.occasion(),
            is_loading: board.is_loading(),
            error: board.error(),
            suggestions: board.resolved(wardrobe.store().list()),
        }
    }
}

/// GET /api/v1/suggestions
pub async fn get_suggestions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    snapshot(&SuggestionsView::new(&wardrobe))
}

/// POST /api/v1/suggestions
///
/// Ask for outfits for the occasion. Replaces the previous suggestions; on
/// gateway failure none are kept and 502 is returned.
pub async fn request_suggestions(
    State(state): State<AppState>,
    Json(input): Json<SuggestionRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .run(Action::RequestSuggestions {
            occasion: input.occasion,
        })
        .await?;

    let wardrobe = state.wardrobe.read().await;
    snapshot(&SuggestionsView::new(&wardrobe))
}
