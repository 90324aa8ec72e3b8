use axum::routing::get;
use axum::Router;

use crate::handlers::view;
use crate::state::AppState;

/// Navigation routes mounted at `/view`.
///
/// ```text
/// GET    /        -> get_view
/// PUT    /        -> set_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(view::get_view).put(view::set_view))
}
