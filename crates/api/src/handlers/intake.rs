//! Handlers for the add-item flow: upload, processing, review and save.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khizana_core::app::{Action, Wardrobe};
use khizana_core::error::CoreError;
use khizana_core::intake::IntakeSession;
use khizana_core::item::DraftEdit;
use khizana_core::media::ImageData;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::items::{find_item, ItemView};
use crate::response::{snapshot, DataResponse};
use crate::state::AppState;

/// Body of `POST /api/v1/intake/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessUploadRequest {
    /// `data:<mime>;base64,<payload>`
    pub image: ImageData,
}

/// Snapshot of the flow, `null` when it is closed.
fn intake_view(
    wardrobe: &Wardrobe,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    snapshot(&wardrobe.intake().map(IntakeSession::snapshot))
}

/// POST /api/v1/intake
///
/// Open a fresh add-item flow, replacing any open one.
pub async fn open_intake(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::OpenIntake).await?;

    let wardrobe = state.wardrobe.read().await;
    Ok((StatusCode::CREATED, intake_view(&wardrobe)?))
}

/// GET /api/v1/intake
pub async fn get_intake(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    intake_view(&wardrobe)
}

/// DELETE /api/v1/intake
///
/// Close the flow. A processing result still in flight is discarded when
/// it arrives.
pub async fn close_intake(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::CloseIntake).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/intake/process
///
/// Validate the upload, then analyze and professionalize it concurrently.
/// Responds with the draft under review, or 502 if either half failed.
pub async fn process_upload(
    State(state): State<AppState>,
    Json(input): Json<ProcessUploadRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(
        mime_type = input.image.mime_type(),
        bytes = input.image.len(),
        "Processing upload"
    );
    state.run(Action::UploadImage(input.image)).await?;

    let wardrobe = state.wardrobe.read().await;
    intake_view(&wardrobe)
}

/// PATCH /api/v1/intake/draft
///
/// Edit the text fields of the draft under review.
pub async fn edit_draft(
    State(state): State<AppState>,
    Json(edit): Json<DraftEdit>,
) -> AppResult<impl IntoResponse> {
    if edit.is_empty() {
        return Err(AppError::BadRequest("No draft fields to update".into()));
    }
    state.dispatch(Action::EditDraft(edit)).await?;

    let wardrobe = state.wardrobe.read().await;
    intake_view(&wardrobe)
}

/// POST /api/v1/intake/draft/discard
pub async fn discard_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.dispatch(Action::DiscardDraft).await?;

    let wardrobe = state.wardrobe.read().await;
    intake_view(&wardrobe)
}

/// POST /api/v1/intake/save
///
/// Store the reviewed draft and close the flow.
pub async fn save_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dispatched = state.dispatch(Action::SaveDraft).await?;
    let id = dispatched
        .added_item()
        .ok_or_else(|| CoreError::Internal("Saving the draft produced no item".into()))?;

    tracing::info!(item_id = id, "Item saved to wardrobe");

    let wardrobe = state.wardrobe.read().await;
    let item = find_item(&wardrobe, id)?;
    Ok((StatusCode::CREATED, snapshot(&ItemView::new(&wardrobe, item))?))
}
