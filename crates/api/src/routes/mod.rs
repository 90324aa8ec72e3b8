pub mod events;
pub mod health;
pub mod intake;
pub mod items;
pub mod outfit;
pub mod profile;
pub mod suggestions;
pub mod view;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /view                                  current view (GET, PUT)
///
/// /items                                 wardrobe in store order (GET)
/// /items/categories                      category buckets (GET)
/// /items/{id}                            get, remove (GET, DELETE)
///
/// /intake                                open, state, close (POST, GET, DELETE)
/// /intake/process                        upload + analyze + professionalize (POST)
/// /intake/draft                          edit draft fields (PATCH)
/// /intake/draft/discard                  back to image selection (POST)
/// /intake/save                           save draft to the wardrobe (POST)
///
/// /outfit                                composer state, clear (GET, DELETE)
/// /outfit/items/{id}/toggle              toggle selection (POST)
/// /outfit/generate                       render outfit on the profile (POST)
///
/// /profile                               get, update (GET, PATCH)
///
/// /suggestions                           resolved suggestions, request (GET, POST)
///
/// /events                                server-sent wardrobe events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/view", view::router())
        .nest("/items", items::router())
        .nest("/intake", intake::router())
        .nest("/outfit", outfit::router())
        .nest("/profile", profile::router())
        .nest("/suggestions", suggestions::router())
        .nest("/events", events::router())
}
