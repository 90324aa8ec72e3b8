//! Contract of the external stylist service.
//!
//! Every operation is asynchronous and fallible. Implementations own the
//! prompt templates and wire format; the core only supplies item data,
//! profile data and the occasion text.

use async_trait::async_trait;

use crate::item::ClothingInfo;
use crate::media::ImageData;
use crate::profile::UserProfile;
use crate::suggestion::OutfitSuggestion;

/// Errors reported by a [`StylistGateway`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {body}")]
    Service { status: u16, body: String },

    /// The service answered, but not with the structured output requested.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An image was requested but the response carried none.
    #[error("Response did not contain an image")]
    MissingImage,
}

/// The generative AI backend: classification, image cleanup, outfit
/// rendering and outfit suggestions.
#[async_trait]
pub trait StylistGateway: Send + Sync {
    /// Classify the clothing item shown in `image`.
    async fn analyze(&self, image: &ImageData) -> Result<ClothingInfo, GatewayError>;

    /// Produce a catalog-style version of `image` (background removed,
    /// wrinkles smoothed).
    async fn professionalize(&self, image: &ImageData) -> Result<ImageData, GatewayError>;

    /// Render the given garments, in slot order, on a model matching
    /// `profile`.
    async fn compose_outfit(
        &self,
        garments: &[ImageData],
        profile: &UserProfile,
    ) -> Result<ImageData, GatewayError>;

    /// Suggest outfits for `occasion` built only from `descriptors`.
    async fn suggest(
        &self,
        descriptors: &[String],
        occasion: &str,
    ) -> Result<Vec<OutfitSuggestion>, GatewayError>;
}
