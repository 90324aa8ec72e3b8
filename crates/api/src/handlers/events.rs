//! Server-sent stream of wardrobe events.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

use crate::state::AppState;

/// GET /api/v1/events
///
/// Each wardrobe event is sent with its `event_type` as the SSE event name
/// and the full event as JSON data. Events missed by a lagging client are
/// skipped. The stream ends when the server starts shutting down.
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.event_bus.subscribe())
        .filter_map(|received| async move {
            match received {
                Ok(event) => Event::default()
                    .event(event.event_type.clone())
                    .json_data(&event)
                    .ok()
                    .map(Ok),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream client lagged");
                    None
                }
            }
        })
        .take_until(state.shutdown.cancelled_owned());

    Sse::new(stream).keep_alive(KeepAlive::default())
}
