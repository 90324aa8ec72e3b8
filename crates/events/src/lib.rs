//! Wardrobe change notifications.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`WardrobeEvent`]: the event envelope published for every state change.
//! - [`EventLogger`]: background subscriber that records events via
//!   `tracing`.

pub mod bus;
pub mod logger;

pub use bus::{EventBus, WardrobeEvent};
pub use logger::EventLogger;
