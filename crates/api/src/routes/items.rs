use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Wardrobe routes mounted at `/items`.
///
/// ```text
/// GET    /              -> list_items
/// GET    /categories    -> list_categories
/// GET    /{id}          -> get_item
/// DELETE /{id}          -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/categories", get(items::list_categories))
        .route("/{id}", get(items::get_item).delete(items::remove_item))
}
