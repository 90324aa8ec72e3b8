//! Occasion-based outfit suggestions.
//!
//! Items are sent to the gateway as descriptor strings
//! (`"{type} ({color}, {style})"`); suggested descriptors are matched back
//! to store items by exact string equality. Descriptors without a match are
//! dropped silently while the outfit name is kept.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::gateway::GatewayError;
use crate::item::ClothingItem;
use crate::types::Ticket;

/// Shown when the gateway fails to produce suggestions.
pub const SUGGESTIONS_FAILED_MESSAGE: &str =
    "Sorry, we could not generate suggestions. Please try again.";

/// One outfit proposed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitSuggestion {
    pub outfit_name: String,
    /// Descriptor strings, in the order the gateway listed them.
    pub items: Vec<String>,
}

/// A suggestion whose descriptors have been resolved against the store.
#[derive(Debug, Serialize)]
pub struct ResolvedSuggestion<'a> {
    pub outfit_name: &'a str,
    pub items: Vec<&'a ClothingItem>,
}

/// Payload handed to the gateway for one suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub descriptors: Vec<String>,
    pub occasion: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Replaced { count: usize },
    Failed { message: String },
}

/// Descriptor strings for every item, in store order.
pub fn descriptors(items: &[ClothingItem]) -> Vec<String> {
    items.iter().map(ClothingItem::descriptor).collect()
}

/// First item whose descriptor equals `descriptor` exactly.
pub fn resolve_descriptor<'a>(
    descriptor: &str,
    items: &'a [ClothingItem],
) -> Option<&'a ClothingItem> {
    items.iter().find(|item| item.descriptor() == descriptor)
}

/// Suggestion request state: the occasion asked for, the latest result set
/// and the last failure message.
#[derive(Debug, Default)]
pub struct SuggestionBoard {
    occasion: String,
    suggestions: Vec<OutfitSuggestion>,
    pending: Option<Ticket>,
    error: Option<String>,
}

impl SuggestionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and start a request under `ticket`.
    ///
    /// Validation failures leave the board untouched. On success the
    /// previous suggestions and error are cleared and any older pending
    /// request becomes stale.
    pub fn begin_request(
        &mut self,
        ticket: Ticket,
        items: &[ClothingItem],
        occasion: &str,
    ) -> Result<SuggestionQuery, CoreError> {
        if occasion.trim().is_empty() {
            return Err(CoreError::Validation(
                "Please describe the occasion first".into(),
            ));
        }
        if items.is_empty() {
            return Err(CoreError::Validation(
                "Your wardrobe is empty. Add some clothes first".into(),
            ));
        }

        self.occasion = occasion.to_string();
        self.suggestions.clear();
        self.error = None;
        self.pending = Some(ticket);

        Ok(SuggestionQuery {
            descriptors: descriptors(items),
            occasion: occasion.to_string(),
        })
    }

    /// Apply a completion. All-or-nothing: a failure shows no suggestions.
    pub fn finish_request(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<OutfitSuggestion>, GatewayError>,
    ) -> Result<SuggestionOutcome, CoreError> {
        if self.pending != Some(ticket) {
            return Err(CoreError::Conflict(
                "Suggestion result is stale and was discarded".into(),
            ));
        }
        self.pending = None;

        match result {
            Ok(suggestions) => {
                let count = suggestions.len();
                self.suggestions = suggestions;
                Ok(SuggestionOutcome::Replaced { count })
            }
            Err(_) => {
                self.suggestions.clear();
                self.error = Some(SUGGESTIONS_FAILED_MESSAGE.to_string());
                Ok(SuggestionOutcome::Failed {
                    message: SUGGESTIONS_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Current suggestions resolved against `items`.
    pub fn resolved<'a>(&'a self, items: &'a [ClothingItem]) -> Vec<ResolvedSuggestion<'a>> {
        self.suggestions
            .iter()
            .map(|suggestion| ResolvedSuggestion {
                outfit_name: &suggestion.outfit_name,
                items: suggestion
                    .items
                    .iter()
                    .filter_map(|descriptor| resolve_descriptor(descriptor, items))
                    .collect(),
            })
            .collect()
    }

    pub fn suggestions(&self) -> &[OutfitSuggestion] {
        &self.suggestions
    }

    pub fn occasion(&self) -> &str {
        &self.occasion
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
