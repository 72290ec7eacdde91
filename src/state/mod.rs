//! State management for the flashcard viewer.

use crate::config::IMAGE_CACHE_CAPACITY;
use crate::image_cache::ImageCache;
use crate::services::tag_store::{self, TagStore};
use std::sync::{Arc, Mutex};

pub mod deck;
pub mod view;

pub use deck::{Card, DeckController};
pub use view::{DeckStatus, DisplayState, RowSummary};

/// Tag store used by the running application.
pub type SharedStore = Box<dyn TagStore + Send>;

/// Application-wide state container.
pub struct AppState {
    pub deck: Arc<Mutex<DeckController<SharedStore>>>,
    /// LRU cache for decoded card images.
    pub image_cache: Arc<Mutex<ImageCache>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_store(tag_store::open_default_store())
    }

    pub fn with_store(store: SharedStore) -> Self {
        Self {
            deck: Arc::new(Mutex::new(DeckController::new(store))),
            image_cache: Arc::new(Mutex::new(ImageCache::new(IMAGE_CACHE_CAPACITY))),
        }
    }
}
