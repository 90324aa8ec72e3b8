use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Server-sent event stream mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(events::stream_events))
}
