//! Service layer for business logic.
//!
//! Separates deck logic and its collaborators from UI handlers.

pub mod card_source;
pub mod deck_service;
pub mod tag_store;

pub use deck_service::DeckService;
