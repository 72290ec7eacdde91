//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - `slint::spawn_local`: async work that must stay on the UI thread (file dialogs)
//! - `rayon::spawn`: blocking work (manifest reads, image decoding)
//! - `slint::invoke_from_event_loop`: hands rayon results back to the UI thread

pub mod card_display;
pub mod handlers;
mod state_helpers;

pub use card_display::render_card;
pub use handlers::setup_handlers;
pub use state_helpers::*;
