//! [`StylistGateway`] backed by Gemini.

use std::time::Instant;

use async_trait::async_trait;
use khizana_core::gateway::{GatewayError, StylistGateway};
use khizana_core::item::ClothingInfo;
use khizana_core::media::ImageData;
use khizana_core::profile::UserProfile;
use khizana_core::suggestion::OutfitSuggestion;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::{GeminiApi, GeminiApiError};
use crate::config::GeminiConfig;
use crate::messages::{GenerateContentRequest, GenerateContentResponse, Part};
use crate::prompts;

impl From<GeminiApiError> for GatewayError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) if e.is_decode() => {
                GatewayError::MalformedResponse(e.to_string())
            }
            GeminiApiError::Request(e) => GatewayError::Transport(e.to_string()),
            GeminiApiError::ApiError { status, body } => GatewayError::Service { status, body },
        }
    }
}

/// Suggestion object as emitted under [`prompts::suggestion_schema`].
#[derive(Debug, Deserialize)]
struct SuggestionWire {
    #[serde(rename = "outfitName")]
    outfit_name: String,
    items: Vec<String>,
}

pub struct GeminiGateway {
    api: GeminiApi,
    text_model: String,
    image_model: String,
}

impl GeminiGateway {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiApiError> {
        Ok(Self::with_api(GeminiApi::new(config)?, config))
    }

    pub fn with_api(api: GeminiApi, config: &GeminiConfig) -> Self {
        Self {
            api,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    async fn generate(
        &self,
        operation: &'static str,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let started = Instant::now();
        let result = self.api.generate_content(model, &request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                tracing::debug!(
                    operation,
                    model,
                    elapsed_ms,
                    finish_reason = ?response.finish_reason(),
                    "Gemini request completed"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(operation, model, elapsed_ms, error = %e, "Gemini request failed");
                Err(e.into())
            }
        }
    }
}

/// Decode the structured JSON text of `response`.
fn parse_json<T: DeserializeOwned>(response: &GenerateContentResponse) -> Result<T, GatewayError> {
    let text = response
        .text()
        .ok_or_else(|| GatewayError::MalformedResponse("response contained no text".into()))?;
    serde_json::from_str(&text).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

/// Decode the first inline image of `response`.
fn extract_image(response: &GenerateContentResponse) -> Result<ImageData, GatewayError> {
    let data = response.inline_data().ok_or(GatewayError::MissingImage)?;
    ImageData::from_base64(data.mime_type.clone(), &data.data)
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl StylistGateway for GeminiGateway {
    async fn analyze(&self, image: &ImageData) -> Result<ClothingInfo, GatewayError> {
        let request =
            GenerateContentRequest::new(vec![Part::image(image), Part::text(prompts::ANALYZE_PROMPT)])
                .with_json_schema(prompts::analysis_schema());

        let response = self.generate("analyze", &self.text_model, request).await?;
        parse_json(&response)
    }

    async fn professionalize(&self, image: &ImageData) -> Result<ImageData, GatewayError> {
        let request = GenerateContentRequest::new(vec![
            Part::image(image),
            Part::text(prompts::PROFESSIONALIZE_PROMPT),
        ])
        .with_image_output();

        let response = self
            .generate("professionalize", &self.image_model, request)
            .await?;
        extract_image(&response)
    }

    async fn compose_outfit(
        &self,
        garments: &[ImageData],
        profile: &UserProfile,
    ) -> Result<ImageData, GatewayError> {
        let mut parts: Vec<Part> = profile.photo.iter().map(Part::image).collect();
        parts.extend(garments.iter().map(Part::image));
        parts.push(Part::text(prompts::compose_prompt(profile, garments.len())));
        let request = GenerateContentRequest::new(parts).with_image_output();

        let response = self
            .generate("compose_outfit", &self.image_model, request)
            .await?;
        extract_image(&response)
    }

    async fn suggest(
        &self,
        descriptors: &[String],
        occasion: &str,
    ) -> Result<Vec<OutfitSuggestion>, GatewayError> {
        let request = GenerateContentRequest::new(vec![Part::text(prompts::suggestion_prompt(
            descriptors,
            occasion,
        ))])
        .with_json_schema(prompts::suggestion_schema());

        let response = self.generate("suggest", &self.text_model, request).await?;
        let suggestions: Vec<SuggestionWire> = parse_json(&response)?;
        Ok(suggestions
            .into_iter()
            .map(|wire| OutfitSuggestion {
                outfit_name: wire.outfit_name,
                items: wire.items,
            })
            .collect())
    }
}
