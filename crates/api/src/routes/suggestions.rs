use axum::routing::get;
use axum::Router;

use crate::handlers::suggestions;
use crate::state::AppState;

/// Suggestion routes mounted at `/suggestions`.
///
/// ```text
/// GET    /    -> get_suggestions
/// POST   /    -> request_suggestions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(suggestions::get_suggestions).post(suggestions::request_suggestions),
    )
}
