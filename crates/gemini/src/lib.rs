//! Gemini-backed implementation of the stylist gateway.
//!
//! - [`api`]: thin REST client for the `generateContent` endpoint.
//! - [`messages`]: request/response wire types.
//! - [`prompts`]: fixed prompt templates and response schemas.
//! - [`gateway`]: [`GeminiGateway`], the [`StylistGateway`] implementation.
//!
//! [`StylistGateway`]: khizana_core::gateway::StylistGateway

pub mod api;
pub mod config;
pub mod gateway;
pub mod messages;
pub mod prompts;

pub use api::{GeminiApi, GeminiApiError};
pub use config::GeminiConfig;
pub use gateway::GeminiGateway;
