//! Handlers for browsing and removing wardrobe items.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use khizana_core::app::{Action, Wardrobe};
use khizana_core::category::Category;
use khizana_core::error::CoreError;
use khizana_core::item::ClothingItem;
use khizana_core::types::ItemId;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::snapshot;
use crate::state::AppState;

/// An item together with the outfit slot it maps to (`null` when the type
/// matches no category).
#[derive(Debug, Serialize)]
pub struct ItemView<'a> {
    #[serde(flatten)]
    pub item: &'a ClothingItem,
    pub category: Option<Category>,
}

impl<'a> ItemView<'a> {
    pub fn new(wardrobe: &'a Wardrobe, item: &'a ClothingItem) -> Self {
        Self {
            item,
            category: wardrobe.categorizer().categorize_item(item),
        }
    }
}

/// Look up `id` in the store.
pub fn find_item(wardrobe: &Wardrobe, id: ItemId) -> Result<&ClothingItem, CoreError> {
    wardrobe.store().get(id).ok_or(CoreError::NotFound {
        entity: "ClothingItem",
        id,
    })
}

/// GET /api/v1/items
///
/// Every saved item in insertion order.
pub async fn list_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    let items: Vec<ItemView<'_>> = wardrobe
        .store()
        .list()
        .iter()
        .map(|item| ItemView::new(&wardrobe, item))
        .collect();

    snapshot(&items)
}

/// GET /api/v1/items/categories
///
/// Items grouped by outfit slot. Uncategorized items are omitted.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    let buckets = wardrobe.categorizer().bucket(wardrobe.store().list());

    snapshot(&buckets)
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<impl IntoResponse> {
    let wardrobe = state.wardrobe.read().await;
    let item = find_item(&wardrobe, id)?;

    snapshot(&ItemView::new(&wardrobe, item))
}

/// DELETE /api/v1/items/{id}
///
/// Removing an unknown id succeeds without effect. Any outfit selection
/// referencing the item is dropped.
pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<impl IntoResponse> {
    let dispatched = state.dispatch(Action::RemoveItem(id)).await?;

    if dispatched.changes.is_empty() {
        tracing::debug!(item_id = id, "Remove requested for unknown item");
    } else {
        tracing::info!(item_id = id, "Item removed");
    }

    Ok(StatusCode::NO_CONTENT)
}
