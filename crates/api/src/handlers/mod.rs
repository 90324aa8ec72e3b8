pub mod events;
pub mod intake;
pub mod items;
pub mod outfit;
pub mod profile;
pub mod suggestions;
pub mod view;
