//! Wardrobe item types.
//!
//! [`ClothingInfo`] is the attribute set produced by the gateway's analysis
//! and editable by the user while the item is still a draft.
//! [`NewClothingItem`] is a fully processed candidate that only lacks its id;
//! [`ClothingItem`] is the saved, immutable store entry.

use serde::{Deserialize, Serialize};

use crate::media::ImageData;
use crate::types::{ItemId, Timestamp};

/// Free-text attributes describing one clothing item.
///
/// Serialized keys match the structured output requested from the gateway:
/// `type`, `color`, `style`, `season`, `description`, all required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub style: String,
    pub season: String,
    pub description: String,
}

/// A saved wardrobe entry. Immutable once in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothingItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub info: ClothingInfo,
    /// The unmodified upload, kept for reference.
    pub original_image: ImageData,
    /// The professionalized image shown everywhere else.
    pub processed_image: ImageData,
    pub created_at: Timestamp,
}

impl ClothingItem {
    /// Canonical `"{type} ({color}, {style})"` rendering used to match
    /// gateway suggestions back to store items.
    pub fn descriptor(&self) -> String {
        self.info.descriptor()
    }
}

impl ClothingInfo {
    pub fn descriptor(&self) -> String {
        format!("{} ({}, {})", self.kind, self.color, self.style)
    }
}

/// A processed candidate waiting for the store to assign its id.
#[derive(Debug, Clone)]
pub struct NewClothingItem {
    pub info: ClothingInfo,
    pub original_image: ImageData,
    pub processed_image: ImageData,
}

/// Partial update of the editable text fields of a draft.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftEdit {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub season: Option<String>,
    pub description: Option<String>,
}

impl DraftEdit {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.color.is_none()
            && self.style.is_none()
            && self.season.is_none()
            && self.description.is_none()
    }

    pub fn apply_to(self, info: &mut ClothingInfo) {
        if let Some(kind) = self.kind {
            info.kind = kind;
        }
        if let Some(color) = self.color {
            info.color = color;
        }
        if let Some(style) = self.style {
            info.style = style;
        }
        if let Some(season) = self.season {
            info.season = season;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::media::fixtures::png;

    pub fn info(kind: &str, color: &str, style: &str) -> ClothingInfo {
        ClothingInfo {
            kind: kind.to_string(),
            color: color.to_string(),
            style: style.to_string(),
            season: "صيف".to_string(),
            description: String::new(),
        }
    }

    pub fn candidate(kind: &str, color: &str, style: &str) -> NewClothingItem {
        NewClothingItem {
            info: info(kind, color, style),
            original_image: png(),
            processed_image: png(),
        }
    }
}
