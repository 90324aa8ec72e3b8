//! Image payloads exchanged with the stylist gateway and the HTTP surface.
//!
//! On the wire every image travels as a data URL
//! (`data:<mime>;base64,<payload>`); in memory it is raw bytes plus the
//! MIME type.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Raw image bytes with their MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageData {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build from an already base64-encoded payload (Gemini `inlineData`).
    pub fn from_base64(mime_type: impl Into<String>, encoded: &str) -> Result<Self, CoreError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CoreError::Validation(format!("Invalid base64 image payload: {e}")))?;
        Ok(Self::new(mime_type, bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, CoreError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::Validation("Image must be a data URL".into()))?;
        let (mime_type, payload) = rest.split_once(";base64,").ok_or_else(|| {
            CoreError::Validation("Image data URL must be base64 encoded".into())
        })?;
        if mime_type.is_empty() {
            return Err(CoreError::Validation(
                "Image data URL is missing its MIME type".into(),
            ));
        }
        Self::from_base64(mime_type, payload)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 payload without the data URL prefix.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Check that an upload is usable as a clothing photo.
    ///
    /// Rejects empty payloads and non-image MIME types. When the header bytes
    /// identify a known format, the declared MIME type is replaced by the
    /// sniffed one.
    pub fn validate_upload(self) -> Result<Self, CoreError> {
        if self.bytes.is_empty() {
            return Err(CoreError::Validation("Please select an image first".into()));
        }
        if !self.mime_type.starts_with("image/") {
            return Err(CoreError::Validation(format!(
                "Unsupported upload type '{}'. Expected an image",
                self.mime_type
            )));
        }
        match ::image::guess_format(&self.bytes) {
            Ok(format) => Ok(Self {
                mime_type: format.to_mime_type().to_string(),
                bytes: self.bytes,
            }),
            Err(_) => Ok(self),
        }
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl TryFrom<String> for ImageData {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_url(&value)
    }
}

impl From<ImageData> for String {
    fn from(image: ImageData) -> Self {
        image.to_data_url()
    }
}


#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::fixtures::PNG_HEADER;
    use super::*;

    #[test]
    fn data_url_round_trips_bytes_and_mime() {
        let image = ImageData::new("image/jpeg", vec![1, 2, 3, 250]);
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let parsed = ImageData::from_data_url(&url).unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn data_url_without_prefix_is_rejected() {
        assert_matches!(
            ImageData::from_data_url("image/png;base64,AAAA"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn data_url_without_base64_marker_is_rejected() {
        assert_matches!(
            ImageData::from_data_url("data:image/png,AAAA"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn data_url_with_bad_payload_is_rejected() {
        assert_matches!(
            ImageData::from_data_url("data:image/png;base64,***"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn serde_uses_data_url_strings() {
        let image = ImageData::new("image/png", vec![9, 9]);
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json, serde_json::json!("data:image/png;base64,CQk="));

        let back: ImageData = serde_json::from_value(json).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn empty_upload_is_rejected() {
        let image = ImageData::new("image/png", Vec::new());
        assert_matches!(image.validate_upload(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_image_upload_is_rejected() {
        let image = ImageData::new("application/pdf", b"%PDF-1.7".to_vec());
        assert_matches!(image.validate_upload(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn upload_mime_is_corrected_from_header_bytes() {
        let image = ImageData::new("image/jpeg", PNG_HEADER.to_vec());
        let checked = image.validate_upload().unwrap();
        assert_eq!(checked.mime_type(), "image/png");
    }

    #[test]
    fn unknown_image_bytes_keep_declared_mime() {
        let image = ImageData::new("image/heic", vec![0, 1, 2, 3, 4, 5, 6, 7]);
        let checked = image.validate_upload().unwrap();
        assert_eq!(checked.mime_type(), "image/heic");
    }

    #[test]
    fn debug_output_omits_payload() {
        let image = ImageData::new("image/png", vec![0; 4096]);
        let rendered = format!("{image:?}");
        assert!(rendered.contains("len: 4096"));
        assert!(rendered.len() < 100);
    }
}
