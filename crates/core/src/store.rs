//! In-memory wardrobe item store.
//!
//! Owns every [`ClothingItem`]; insertion order is display order. Nothing
//! is persisted; the store lives for the lifetime of the process.

use chrono::Utc;

use crate::item::{ClothingItem, NewClothingItem};
use crate::types::{ItemId, Timestamp};

/// Ordered collection of saved wardrobe items.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<ClothingItem>,
    ids: IdGenerator,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a fresh id to `candidate` and append it. Returns the saved item.
    pub fn add(&mut self, candidate: NewClothingItem) -> &ClothingItem {
        self.add_at(candidate, Utc::now())
    }

    fn add_at(&mut self, candidate: NewClothingItem, now: Timestamp) -> &ClothingItem {
        let id = self.ids.next(now.timestamp_millis());
        self.items.push(ClothingItem {
            id,
            info: candidate.info,
            original_image: candidate.original_image,
            processed_image: candidate.processed_image,
            created_at: now,
        });
        &self.items[self.items.len() - 1]
    }

    /// Remove the item with `id`. Absent ids are a no-op; returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Read-only ordered snapshot.
    pub fn list(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Millisecond-clock id source that never repeats.
///
/// Ids follow the wall clock but are bumped past the last issued id when
/// the clock has not advanced (or went backwards).
#[derive(Debug, Default)]
struct IdGenerator {
    last: ItemId,
}

impl IdGenerator {
    fn next(&mut self, now_millis: i64) -> ItemId {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id
    }
}
