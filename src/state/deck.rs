//! Deck controller: the card list, the current position and the tag sets.

use crate::config::{COMPLETED_MARKS_KEY, REVIEW_MARKS_KEY};
use crate::services::tag_store::{TagSet, TagStore};
use crate::state::view::{DeckStatus, DisplayState};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One flashcard. `id` is the key into the tag sets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    #[serde(rename = "file")]
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub image_path: PathBuf,
}

impl Card {
    /// Creates a card whose image lives at its id.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            image_path: PathBuf::from(&id),
            id,
            name: name.into(),
        }
    }

    /// Points the card at a resolved image path without changing its id.
    pub fn with_image_path(mut self, image_path: PathBuf) -> Self {
        self.image_path = image_path;
        self
    }
}

/// Direction for stepping through the deck.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Empty,
    Ready { position: usize },
}

/// Owns the deck for one session and keeps the tag sets in sync with the store.
pub struct DeckController<S> {
    store: S,
    cards: Vec<Card>,
    phase: Phase,
    review: TagSet,
    completed: TagSet,
}

impl<S: TagStore> DeckController<S> {
    /// Creates an uninitialized controller. Every operation is a no-op until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(store: S) -> Self {
        Self {
            store,
            cards: Vec::new(),
            phase: Phase::Uninitialized,
            review: TagSet::new(),
            completed: TagSet::new(),
        }
    }

    /// Starts a session with `cards`.
    ///
    /// An empty list puts the controller in the terminal empty state.
    /// Otherwise both tag sets are loaded from the store and the first card
    /// becomes current.
    pub fn initialize(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.review.clear();
        self.completed.clear();

        if self.cards.is_empty() {
            info!("Deck is empty");
            self.phase = Phase::Empty;
            return;
        }

        warn_on_duplicate_ids(&self.cards);

        self.review = self.store.load_set(REVIEW_MARKS_KEY);
        self.completed = self.store.load_set(COMPLETED_MARKS_KEY);
        self.phase = Phase::Ready { position: 0 };

        info!(
            "Deck initialized with {} cards ({} for review, {} completed)",
            self.cards.len(),
            self.review.len(),
            self.completed.len()
        );
    }

    /// Returns the current card, if any.
    pub fn current_card(&self) -> Option<&Card> {
        self.position().map(|position| &self.cards[position])
    }

    /// Returns the current position, or `None` when no card is shown.
    pub fn position(&self) -> Option<usize> {
        match self.phase {
            Phase::Ready { position } => Some(position),
            Phase::Uninitialized | Phase::Empty => None,
        }
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Moves to `index`, wrapping around both ends of the deck.
    pub fn go_to(&mut self, index: i64) {
        let len = self.cards.len() as i64;
        if let Phase::Ready { position } = &mut self.phase {
            *position = index.rem_euclid(len) as usize;
            debug!("Moved to card {}", *position);
        }
    }

    fn step(&mut self, direction: Direction) {
        let Some(position) = self.position() else {
            return;
        };

        let position = position as i64;
        match direction {
            Direction::Next => self.go_to(position + 1),
            Direction::Previous => self.go_to(position - 1),
        }
    }

    pub fn next(&mut self) {
        self.step(Direction::Next);
    }

    pub fn prev(&mut self) {
        self.step(Direction::Previous);
    }

    /// Flips the review mark on the current card and persists the review set.
    ///
    /// The completed mark is left untouched, so a completed card can also be
    /// marked for review.
    pub fn toggle_review(&mut self) {
        let Some(id) = self.current_card().map(|card| card.id.clone()) else {
            return;
        };

        if !self.review.remove(&id) {
            self.review.insert(id);
        }

        self.store.save_set(REVIEW_MARKS_KEY, &self.review);
    }

    /// Flips the completed mark on the current card and persists both sets.
    ///
    /// Completing a card clears its review mark. Un-completing does not
    /// restore it.
    pub fn toggle_complete(&mut self) {
        let Some(id) = self.current_card().map(|card| card.id.clone()) else {
            return;
        };

        if !self.completed.remove(&id) {
            self.review.remove(&id);
            self.completed.insert(id);
        }

        self.store.save_set(COMPLETED_MARKS_KEY, &self.completed);
        self.store.save_set(REVIEW_MARKS_KEY, &self.review);
    }

    #[cfg(test)]
    pub fn review_set(&self) -> &TagSet {
        &self.review
    }

    #[cfg(test)]
    pub fn completed_set(&self) -> &TagSet {
        &self.completed
    }

    /// Derives the view of the current state.
    pub fn display_state(&self) -> DisplayState {
        match self.phase {
            Phase::Uninitialized => DisplayState::without_cards(DeckStatus::Loading),
            Phase::Empty => DisplayState::without_cards(DeckStatus::Empty),
            Phase::Ready { position } => {
                DisplayState::for_deck(&self.cards, position, &self.review, &self.completed)
            }
        }
    }

    /// Paths of the cards either side of the current one.
    pub fn adjacent_images(&self) -> Vec<PathBuf> {
        let Some(position) = self.position() else {
            return Vec::new();
        };

        let len = self.cards.len();
        let mut indices = vec![(position + 1) % len, (position + len - 1) % len];
        indices.dedup();
        indices
            .into_iter()
            .filter(|&index| index != position)
            .map(|index| self.cards[index].image_path.clone())
            .collect()
    }
}

fn warn_on_duplicate_ids(cards: &[Card]) {
    let mut seen = HashSet::new();
    for card in cards {
        if !seen.insert(card.id.as_str()) {
            warn!("Duplicate card id {}; its marks are shared", card.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::services::tag_store::MemoryTagStore;
    use crate::state::view::RowTag;
    use proptest::prelude::*;

    fn minerals() -> Vec<Card> {
        vec![Card::new("a", "Quartz"), Card::new("b", "Mica")]
    }

    fn deck_of(len: usize) -> Vec<Card> {
        (0..len)
            .map(|i| Card::new(format!("card-{i}"), format!("Name{i}")))
            .collect()
    }

    struct ReadOnlyStore;

    impl TagStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(r#"["a"]"#.to_string()))
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(AppError::TagStore("read-only filesystem".to_string()))
        }
    }

    fn ready(cards: Vec<Card>) -> DeckController<MemoryTagStore> {
        let mut deck = DeckController::new(MemoryTagStore::new());
        deck.initialize(cards);
        deck
    }

    fn ids(ids: &[&str]) -> TagSet {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn wraps_past_both_ends() {
        let mut deck = ready(deck_of(5));

        deck.go_to(-1);
        assert_eq!(deck.position(), Some(4));

        deck.go_to(5);
        assert_eq!(deck.position(), Some(0));

        deck.prev();
        assert_eq!(deck.position(), Some(4));
        deck.next();
        assert_eq!(deck.position(), Some(0));
    }

    #[test]
    fn mineral_walkthrough() {
        let mut deck = ready(minerals());
        assert_eq!(deck.position(), Some(0));
        assert_eq!(deck.display_state().position_label, "1/2");

        deck.next();
        assert_eq!(deck.position(), Some(1));
        assert_eq!(deck.display_state().position_label, "2/2");

        deck.toggle_complete();
        assert_eq!(deck.completed_set(), &ids(&["b"]));

        let state = deck.display_state();
        assert_eq!(state.rows[1].label, "Card 2: Mica");
        assert_eq!(state.rows[1].tag, RowTag::Completed);
        assert_eq!(state.rows[0].label, "Card 1");
        assert_eq!(state.rows[0].tag, RowTag::None);
    }

    #[test]
    fn toggle_review_twice_restores_membership() {
        let mut deck = ready(minerals());

        deck.toggle_review();
        assert!(deck.display_state().is_reviewed);

        deck.toggle_review();
        assert!(!deck.display_state().is_reviewed);
        assert!(deck.review_set().is_empty());
    }

    #[test]
    fn completing_clears_review() {
        let mut deck = ready(minerals());
        deck.toggle_review();

        deck.toggle_complete();

        let state = deck.display_state();
        assert!(!state.is_reviewed);
        assert!(state.is_completed);
        assert!(deck.review_set().is_empty());
    }

    #[test]
    fn uncompleting_does_not_restore_review() {
        let mut deck = ready(minerals());
        deck.toggle_review();
        deck.toggle_complete();

        deck.toggle_complete();

        let state = deck.display_state();
        assert!(!state.is_completed);
        assert!(!state.is_reviewed);
    }

    #[test]
    fn review_on_completed_card_keeps_both_marks() {
        let mut deck = ready(minerals());
        deck.toggle_complete();

        deck.toggle_review();

        let state = deck.display_state();
        assert!(state.is_completed);
        assert!(state.is_reviewed);
        assert_eq!(state.rows[0].tag, RowTag::Completed);
    }

    #[test]
    fn empty_deck_is_inert() {
        let mut deck = ready(Vec::new());

        deck.next();
        deck.prev();
        deck.go_to(3);
        deck.toggle_review();
        deck.toggle_complete();

        let state = deck.display_state();
        assert_eq!(state.status, DeckStatus::Empty);
        assert_eq!(state.position_label, "0/0");
        assert!(deck.current_card().is_none());
        assert!(deck.review_set().is_empty());
        assert!(deck.completed_set().is_empty());
    }

    #[test]
    fn uninitialized_deck_is_inert() {
        let mut deck = DeckController::new(MemoryTagStore::new());

        deck.next();
        deck.toggle_review();

        assert_eq!(deck.display_state().status, DeckStatus::Loading);
        assert_eq!(deck.position(), None);
    }

    #[test]
    fn marks_survive_a_new_session() {
        let mut deck = ready(minerals());
        deck.toggle_review();
        deck.next();
        deck.toggle_complete();

        let mut store = MemoryTagStore::new();
        std::mem::swap(&mut store, &mut deck.store);

        let mut reloaded = DeckController::new(store);
        reloaded.initialize(minerals());
        assert_eq!(reloaded.review_set(), &ids(&["a"]));
        assert_eq!(reloaded.completed_set(), &ids(&["b"]));
    }

    #[test]
    fn failed_saves_keep_session_state() {
        let mut deck = DeckController::new(ReadOnlyStore);
        deck.initialize(minerals());
        assert!(deck.display_state().is_reviewed);

        deck.toggle_review();
        assert!(!deck.display_state().is_reviewed);

        deck.toggle_review();
        deck.toggle_complete();

        let state = deck.display_state();
        assert!(state.is_completed);
        assert!(!state.is_reviewed);
        assert_eq!(state.rows[0].label, "Card 1: Quartz");
        assert_eq!(deck.completed_set(), &ids(&["a"]));
        assert!(deck.review_set().is_empty());
    }

    #[test]
    fn toggles_write_through_to_store() {
        let mut deck = ready(minerals());
        deck.toggle_review();
        assert_eq!(deck.store.load_set(REVIEW_MARKS_KEY), ids(&["a"]));

        deck.toggle_complete();
        assert!(deck.store.load_set(REVIEW_MARKS_KEY).is_empty());
        assert_eq!(deck.store.load_set(COMPLETED_MARKS_KEY), ids(&["a"]));
    }

    #[test]
    fn reinitializing_resets_position() {
        let mut deck = ready(deck_of(4));
        deck.go_to(2);

        deck.initialize(deck_of(3));
        assert_eq!(deck.position(), Some(0));
        assert_eq!(deck.cards().len(), 3);
    }

    #[test]
    fn tags_follow_ids_not_indices() {
        let mut deck = ready(minerals());
        deck.toggle_complete();

        let mut swapped = minerals();
        swapped.reverse();
        deck.initialize(swapped);

        let state = deck.display_state();
        assert_eq!(state.rows[0].tag, RowTag::None);
        assert_eq!(state.rows[1].tag, RowTag::Completed);
        assert_eq!(state.rows[1].label, "Card 2: Quartz");
    }

    #[test]
    fn adjacent_images_skip_current() {
        assert!(ready(deck_of(1)).adjacent_images().is_empty());
        assert_eq!(
            ready(deck_of(2)).adjacent_images(),
            vec![PathBuf::from("card-1")]
        );
        assert_eq!(
            ready(deck_of(3)).adjacent_images(),
            vec![PathBuf::from("card-1"), PathBuf::from("card-2")]
        );
    }

    proptest! {
        #[test]
        fn go_to_always_lands_in_range(len in 1usize..40, index in any::<i64>()) {
            let mut deck = ready(deck_of(len));
            deck.go_to(index);

            let position = deck.position().unwrap();
            prop_assert!(position < len);
            prop_assert_eq!(position as i64, index.rem_euclid(len as i64));
        }

        #[test]
        fn rows_never_leak_uncompleted_names(
            names in prop::collection::vec("[Q-Z][a-z]{3,8}", 1..12),
            completed_mask in prop::collection::vec(any::<bool>(), 12),
        ) {
            let cards: Vec<Card> = names
                .iter()
                .enumerate()
                .map(|(i, name)| Card::new(format!("id-{i}"), name.clone()))
                .collect();

            let mut store = MemoryTagStore::new();
            let completed: TagSet = cards
                .iter()
                .zip(&completed_mask)
                .filter(|(_, done)| **done)
                .map(|(card, _)| card.id.clone())
                .collect();
            store.save_set(COMPLETED_MARKS_KEY, &completed);

            let mut deck = DeckController::new(store);
            deck.initialize(cards.clone());

            for (row, card) in deck.display_state().rows.iter().zip(&cards) {
                if completed.contains(&card.id) {
                    prop_assert!(row.label.contains(&card.name));
                } else {
                    prop_assert!(!row.label.contains(&card.name));
                }
            }
        }
    }
}
