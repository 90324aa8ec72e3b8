//! User body profile for personalized outfit visualization.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::ImageData;

/// Height, weight and a full-body photo.
///
/// Height and weight are kept as free text exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub height: String,
    pub weight: String,
    pub photo: Option<ImageData>,
}

impl UserProfile {
    /// Complete iff height and weight are non-blank and a non-empty photo
    /// is present.
    pub fn is_complete(&self) -> bool {
        !self.height.trim().is_empty() && !self.weight.trim().is_empty() && self.has_photo()
    }

    fn has_photo(&self) -> bool {
        self.photo.as_ref().is_some_and(|photo| !photo.is_empty())
    }

    /// Names of the fields still missing, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.height.trim().is_empty() {
            missing.push("height");
        }
        if self.weight.trim().is_empty() {
            missing.push("weight");
        }
        if !self.has_photo() {
            missing.push("photo");
        }
        missing
    }

    /// Apply `update`. A new photo must be a usable image; on rejection
    /// nothing changes.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), CoreError> {
        let photo = update
            .photo
            .map(ImageData::validate_upload)
            .transpose()?;

        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if update.clear_photo {
            self.photo = None;
        }
        if let Some(photo) = photo {
            self.photo = Some(photo);
        }
        Ok(())
    }
}

/// Incremental profile change; absent fields stay as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub height: Option<String>,
    pub weight: Option<String>,
    pub photo: Option<ImageData>,
    #[serde(default)]
    pub clear_photo: bool,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.weight.is_none() && self.photo.is_none() && !self.clear_photo
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::media::fixtures::png;

    fn complete() -> UserProfile {
        UserProfile {
            height: "175".into(),
            weight: "70".into(),
            photo: Some(png()),
        }
    }

    #[test]
    fn default_profile_is_incomplete() {
        let profile = UserProfile::default();
        assert!(!profile.is_complete());
        assert_eq!(profile.missing_fields(), vec!["height", "weight", "photo"]);
    }

    #[test]
    fn all_fields_present_is_complete() {
        assert!(complete().is_complete());
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn blank_height_counts_as_missing() {
        let profile = UserProfile {
            height: "   ".into(),
            ..complete()
        };
        assert!(!profile.is_complete());
        assert_eq!(profile.missing_fields(), vec!["height"]);
    }

    #[test]
    fn updates_apply_incrementally() {
        let mut profile = UserProfile::default();
        profile.apply(ProfileUpdate {
            height: Some("160".into()),
            ..Default::default()
        })
        .unwrap();
        profile.apply(ProfileUpdate {
            weight: Some("55".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(profile.height, "160");
        assert_eq!(profile.weight, "55");
        assert!(!profile.is_complete());

        profile.apply(ProfileUpdate {
            photo: Some(png()),
            ..Default::default()
        })
        .unwrap();
        assert!(profile.is_complete());
    }

    #[test]
    fn clear_photo_removes_it() {
        let mut profile = complete();
        profile.apply(ProfileUpdate {
            clear_photo: true,
            ..Default::default()
        })
        .unwrap();
        assert!(profile.photo.is_none());
        assert_eq!(profile.height, "175");
    }

    #[test]
    fn non_image_photo_is_rejected_and_profile_untouched() {
        let mut profile = UserProfile {
            height: "170".into(),
            weight: "60".into(),
            photo: None,
        };

        let result = profile.apply(ProfileUpdate {
            height: Some("180".into()),
            photo: Some(ImageData::new("text/plain", b"hello".to_vec())),
            ..Default::default()
        });

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(profile.height, "170");
        assert!(profile.photo.is_none());
        assert!(!profile.is_complete());
    }

    #[test]
    fn empty_photo_counts_as_missing() {
        let profile = UserProfile {
            photo: Some(ImageData::new("image/png", Vec::new())),
            ..complete()
        };
        assert!(!profile.is_complete());
        assert_eq!(profile.missing_fields(), vec!["photo"]);
    }
}
