//! Outfit composer: one selected item per category plus outfit rendering.
//!
//! The selection holds item ids only and is re-resolved against the
//! [`ItemStore`] on every read, so removed items never leak into a
//! composed outfit.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::{Categorizer, Category};
use crate::error::CoreError;
use crate::gateway::GatewayError;
use crate::item::ClothingItem;
use crate::media::ImageData;
use crate::profile::UserProfile;
use crate::store::ItemStore;
use crate::types::{ItemId, Ticket};

/// Shown when outfit rendering fails. The selection is kept for a retry.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Sorry, we could not generate the outfit image. Please try again.";

/// Result of [`OutfitComposer::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The item now occupies `category`; `evicted` is the previous occupant.
    Selected {
        category: Category,
        evicted: Option<ItemId>,
    },
    /// The item was the occupant and has been deselected.
    Deselected { category: Category },
}

/// Result of applying a generation completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated,
    Failed { message: String },
}

/// The four named outfit slots, resolved against the store.
#[derive(Debug, Default, Serialize)]
pub struct ComposedOutfit<'a> {
    pub top: Option<&'a ClothingItem>,
    pub bottom: Option<&'a ClothingItem>,
    pub outerwear: Option<&'a ClothingItem>,
    pub shoes: Option<&'a ClothingItem>,
}

impl<'a> ComposedOutfit<'a> {
    /// Occupied slots in rendering order: top, bottom, outerwear, shoes.
    pub fn garments(&self) -> impl Iterator<Item = &'a ClothingItem> {
        [self.top, self.bottom, self.outerwear, self.shoes]
            .into_iter()
            .flatten()
    }
}

/// Selection set and outfit-rendering state.
#[derive(Debug, Default)]
pub struct OutfitComposer {
    selection: BTreeMap<Category, ItemId>,
    composite: Option<ImageData>,
    pending: Option<Ticket>,
    error: Option<String>,
}

impl OutfitComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `item` in its category, or deselect it if it already is the
    /// occupant. A different occupant of the same category is replaced.
    pub fn toggle(
        &mut self,
        item: &ClothingItem,
        categorizer: &Categorizer,
    ) -> Result<Toggle, CoreError> {
        let category = categorizer.categorize_item(item).ok_or_else(|| {
            CoreError::Validation(format!(
                "'{}' does not belong to any outfit slot",
                item.info.kind
            ))
        })?;

        if self.selection.get(&category) == Some(&item.id) {
            self.selection.remove(&category);
            return Ok(Toggle::Deselected { category });
        }

        let evicted = self.selection.insert(category, item.id);
        Ok(Toggle::Selected { category, evicted })
    }

    pub fn selected(&self, category: Category) -> Option<ItemId> {
        self.selection.get(&category).copied()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.values().any(|selected| *selected == id)
    }

    pub fn selection(&self) -> &BTreeMap<Category, ItemId> {
        &self.selection
    }

    pub fn composed_outfit<'a>(&self, store: &'a ItemStore) -> ComposedOutfit<'a> {
        let resolve = |category| self.selected(category).and_then(|id| store.get(id));
        ComposedOutfit {
            top: resolve(Category::Tops),
            bottom: resolve(Category::Bottoms),
            outerwear: resolve(Category::Outerwear),
            shoes: resolve(Category::Shoes),
        }
    }

    /// Top and bottom present in the store and the profile complete.
    pub fn can_generate(&self, store: &ItemStore, profile: &UserProfile) -> bool {
        let outfit = self.composed_outfit(store);
        outfit.top.is_some() && outfit.bottom.is_some() && profile.is_complete()
    }

    /// Empty the selection and forget any rendered or pending outfit image.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.composite = None;
        self.pending = None;
        self.error = None;
    }

    /// Drop selections whose item is gone from the store. Returns the
    /// dropped ids.
    pub fn retain_existing(&mut self, store: &ItemStore) -> Vec<ItemId> {
        let mut dropped = Vec::new();
        self.selection.retain(|_, id| {
            let keep = store.contains(*id);
            if !keep {
                dropped.push(*id);
            }
            keep
        });
        dropped
    }

    /// Start rendering the current outfit under `ticket`.
    ///
    /// Returns the processed garment images in slot order. A newer request
    /// supersedes an unfinished one; its completion will be stale.
    pub fn begin_generation(
        &mut self,
        ticket: Ticket,
        store: &ItemStore,
        profile: &UserProfile,
    ) -> Result<Vec<ImageData>, CoreError> {
        if !self.can_generate(store, profile) {
            let outfit = self.composed_outfit(store);
            let mut missing: Vec<&str> = Vec::new();
            if outfit.top.is_none() {
                missing.push("top");
            }
            if outfit.bottom.is_none() {
                missing.push("bottom");
            }
            missing.extend(profile.missing_fields());
            return Err(CoreError::Validation(format!(
                "Cannot generate outfit yet, missing: {}",
                missing.join(", ")
            )));
        }

        let garments = self
            .composed_outfit(store)
            .garments()
            .map(|item| item.processed_image.clone())
            .collect();
        self.pending = Some(ticket);
        self.error = None;
        Ok(garments)
    }

    /// Apply a rendering completion. Stale tickets are rejected untouched.
    pub fn finish_generation(
        &mut self,
        ticket: Ticket,
        result: Result<ImageData, GatewayError>,
    ) -> Result<GenerationOutcome, CoreError> {
        if self.pending != Some(ticket) {
            return Err(CoreError::Conflict(
                "Outfit generation result is stale and was discarded".into(),
            ));
        }
        self.pending = None;

        match result {
            Ok(image) => {
                self.composite = Some(image);
                self.error = None;
                Ok(GenerationOutcome::Generated)
            }
            Err(_) => {
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                Ok(GenerationOutcome::Failed {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    pub fn composite(&self) -> Option<&ImageData> {
        self.composite.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }
}
