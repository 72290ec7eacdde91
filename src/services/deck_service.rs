//! Service for running deck operations from UI callbacks.
//!
//! Each method locks the shared controller, applies one operation and
//! returns the resulting display state for the renderer.

use crate::services::tag_store::TagStore;
use crate::state::{Card, DeckController, DisplayState};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Service for managing deck operations.
pub struct DeckService<S> {
    deck: Arc<Mutex<DeckController<S>>>,
}

impl<S> Clone for DeckService<S> {
    fn clone(&self) -> Self {
        Self {
            deck: self.deck.clone(),
        }
    }
}

impl<S: TagStore> DeckService<S> {
    /// Creates a new deck service.
    pub fn new(deck: Arc<Mutex<DeckController<S>>>) -> Self {
        Self { deck }
    }

    fn lock(&self) -> MutexGuard<'_, DeckController<S>> {
        self.deck.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new session with `cards`.
    pub fn initialize(&self, cards: Vec<Card>) -> DisplayState {
        let mut deck = self.lock();
        deck.initialize(cards);
        deck.display_state()
    }

    pub fn next(&self) -> DisplayState {
        let mut deck = self.lock();
        deck.next();
        deck.display_state()
    }

    pub fn previous(&self) -> DisplayState {
        let mut deck = self.lock();
        deck.prev();
        deck.display_state()
    }

    /// Jumps to the card at `index` (wrapping).
    pub fn go_to(&self, index: i64) -> DisplayState {
        let mut deck = self.lock();
        deck.go_to(index);
        deck.display_state()
    }

    pub fn toggle_review(&self) -> DisplayState {
        let mut deck = self.lock();
        deck.toggle_review();
        deck.display_state()
    }

    pub fn toggle_complete(&self) -> DisplayState {
        let mut deck = self.lock();
        deck.toggle_complete();
        deck.display_state()
    }

    pub fn display_state(&self) -> DisplayState {
        self.lock().display_state()
    }

    /// Image paths worth preloading around the current card.
    pub fn adjacent_images(&self) -> Vec<PathBuf> {
        self.lock().adjacent_images()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tag_store::MemoryTagStore;
    use crate::state::DeckStatus;

    fn service() -> DeckService<MemoryTagStore> {
        DeckService::new(Arc::new(Mutex::new(DeckController::new(
            MemoryTagStore::new(),
        ))))
    }

    #[test]
    fn operations_return_fresh_state() {
        let service = service();
        assert_eq!(service.display_state().status, DeckStatus::Loading);

        let state = service.initialize(vec![
            Card::new("a", "Quartz"),
            Card::new("b", "Mica"),
            Card::new("c", "Pyrite"),
        ]);
        assert_eq!(state.position_label, "1/3");

        assert_eq!(service.previous().position_label, "3/3");
        assert_eq!(service.next().position_label, "1/3");
        assert_eq!(service.go_to(4).position_label, "2/3");
        assert!(service.toggle_review().is_reviewed);
        assert!(service.toggle_complete().is_completed);
    }

    #[test]
    fn clones_share_one_deck() {
        let service = service();
        let other = service.clone();

        service.initialize(vec![Card::new("a", "Quartz"), Card::new("b", "Mica")]);
        other.next();

        assert_eq!(service.display_state().card_name, "Mica");
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let service = service();
        service.initialize(vec![Card::new("a", "Quartz")]);

        let deck = service.deck.clone();
        let _ = std::thread::spawn(move || {
            let _guard = deck.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert_eq!(service.display_state().card_name, "Quartz");
    }
}
