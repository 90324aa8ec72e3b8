//! Handlers for the body profile used in outfit rendering.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use khizana_core::app::Action;
use khizana_core::profile::{ProfileUpdate, UserProfile};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::snapshot;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView<'a> {
    #[serde(flatten)]
    pub profile: &'a UserProfile,
    pub is_complete: bool,
    pub missing_fields: Vec<&'static str>,
}

impl<'a> ProfileView<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            is_complete: profile.is_complete(),
            missing_fields: profile.missing_fields(),
        }
    }
}

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    snapshot(&ProfileView::new(wardrobe.profile()))
}

/// PATCH /api/v1/profile
///
/// Incremental update: absent fields are kept. `clear_photo` removes the
/// photo.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<impl IntoResponse> {
    if update.is_empty() {
        return Err(AppError::BadRequest("No profile fields to update".into()));
    }
    state.dispatch(Action::UpdateProfile(update)).await?;

    let wardrobe = state.wardrobe.read().await;
    snapshot(&ProfileView::new(wardrobe.profile()))
}
