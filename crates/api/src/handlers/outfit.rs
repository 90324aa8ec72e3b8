//! Handlers for the outfit composer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use khizana_core::app::{Action, Wardrobe};
use khizana_core::composer::ComposedOutfit;
use khizana_core::media::ImageData;
use khizana_core::types::ItemId;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::snapshot;
use crate::state::AppState;

/// Composer state as shown by the outfit creator.
#[derive(Debug, Serialize)]
pub struct OutfitView<'a> {
    pub slots: ComposedOutfit<'a>,
    pub can_generate: bool,
    pub is_generating: bool,
    /// Profile fields still needed before generation is allowed.
    pub missing_profile_fields: Vec<&'static str>,
    pub composite: Option<&'a ImageData>,
    pub error: Option<&'a str>,
}

impl<'a> OutfitView<'a> {
    pub fn new(wardrobe: &'a Wardrobe) -> Self {
        let composer = wardrobe.composer();
        Self {
            slots: composer.composed_outfit(wardrobe.store()),
            can_generate: composer.can_generate(wardrobe.store(), wardrobe.profile()),
            is_generating: composer.is_generating(),
            missing_profile_fields: wardrobe.profile().missing_fields(),
            composite: composer.composite(),
            error: composer.error(),
        }
    }
}

/// GET /api/v1/outfit
pub async fn get_outfit(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    snapshot(&OutfitView::new(&wardrobe))
}

/// POST /api/v1/outfit/items/{id}/toggle
///
/// Select the item in its category slot, replacing the current occupant, or
/// deselect it if it already occupies the slot.
pub async fn toggle_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::ToggleSelection(id)).await?;

    let wardrobe = state.wardrobe.read().await;
    snapshot(&OutfitView::new(&wardrobe))
}

/// POST /api/v1/outfit/generate
///
/// Render the selected garments on the user's profile photo. Requires a top,
/// a bottom and a complete profile (400 otherwise). On gateway failure the
/// selection is kept and 502 is returned.
pub async fn generate_outfit(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.run(Action::GenerateOutfit).await?;

    let wardrobe = state.wardrobe.read().await;
    snapshot(&OutfitView::new(&wardrobe))
}

/// DELETE /api/v1/outfit
pub async fn clear_outfit(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::ClearOutfit).await?;
    Ok(StatusCode::NO_CONTENT)
}
