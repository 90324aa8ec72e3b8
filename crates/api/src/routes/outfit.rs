use axum::routing::{get, post};
use axum::Router;

use crate::handlers::outfit;
use crate::state::AppState;

/// Outfit composer routes mounted at `/outfit`.
///
/// ```text
/// GET    /                     -> get_outfit
/// DELETE /                     -> clear_outfit
/// POST   /items/{id}/toggle    -> toggle_item
/// POST   /generate             -> generate_outfit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(outfit::get_outfit).delete(outfit::clear_outfit))
        .route("/items/{id}/toggle", post(outfit::toggle_item))
        .route("/generate", post(outfit::generate_outfit))
}
