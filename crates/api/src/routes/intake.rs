use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::intake;
use crate::state::AppState;

/// Add-item flow routes mounted at `/intake`.
///
/// ```text
/// POST   /                 -> open_intake
/// GET    /                 -> get_intake
/// DELETE /                 -> close_intake
/// POST   /process          -> process_upload
/// PATCH  /draft            -> edit_draft
/// POST   /draft/discard    -> discard_draft
/// POST   /save             -> save_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(intake::open_intake)
                .get(intake::get_intake)
                .delete(intake::close_intake),
        )
        .route("/process", post(intake::process_upload))
        .route("/draft", patch(intake::edit_draft))
        .route("/draft/discard", post(intake::discard_draft))
        .route("/save", post(intake::save_draft))
}
