//! Domain model of the wardrobe organizer: item store, categorization,
//! outfit composition, suggestions, the add-item flow and the application
//! reducer tying them together.
//!
//! Nothing here performs I/O; the generative backend is reached through the
//! [`gateway::StylistGateway`] trait.

pub mod app;
pub mod category;
pub mod composer;
pub mod error;
pub mod gateway;
pub mod intake;
pub mod item;
pub mod media;
pub mod profile;
pub mod store;
pub mod suggestion;
pub mod types;
