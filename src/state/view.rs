//! Display state derived from the deck controller.
//!
//! Everything here is a pure function of the controller's data. Row labels
//! only reveal a card's name once it is completed so the sidebar never
//! gives answers away.

use crate::services::tag_store::TagSet;
use crate::state::deck::Card;
use std::path::PathBuf;

/// Lifecycle of the deck as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStatus {
    /// Cards have not been delivered yet.
    Loading,
    /// The card source produced no cards.
    Empty,
    Ready,
}

/// Badge shown on a sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTag {
    Completed,
    Review,
    None,
}

impl RowTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RowTag::Completed => "completed",
            RowTag::Review => "review",
            RowTag::None => "none",
        }
    }

    fn for_card(card: &Card, review: &TagSet, completed: &TagSet) -> Self {
        if completed.contains(&card.id) {
            RowTag::Completed
        } else if review.contains(&card.id) {
            RowTag::Review
        } else {
            RowTag::None
        }
    }
}

/// One sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSummary {
    pub index: usize,
    pub is_current: bool,
    pub label: String,
    pub tag: RowTag,
}

/// Everything a renderer needs to draw the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub status: DeckStatus,
    pub position_label: String,
    pub card_name: String,
    pub card_image: Option<PathBuf>,
    pub is_reviewed: bool,
    pub is_completed: bool,
    pub rows: Vec<RowSummary>,
}

impl DisplayState {
    /// State with no current card.
    pub fn without_cards(status: DeckStatus) -> Self {
        Self {
            status,
            position_label: "0/0".to_string(),
            card_name: String::new(),
            card_image: None,
            is_reviewed: false,
            is_completed: false,
            rows: Vec::new(),
        }
    }

    /// Derives the state for a non-empty deck positioned at `position`.
    pub fn for_deck(
        cards: &[Card],
        position: usize,
        review: &TagSet,
        completed: &TagSet,
    ) -> Self {
        let current = &cards[position];

        let rows = cards
            .iter()
            .enumerate()
            .map(|(index, card)| RowSummary {
                index,
                is_current: index == position,
                label: row_label(index, card, completed.contains(&card.id)),
                tag: RowTag::for_card(card, review, completed),
            })
            .collect();

        Self {
            status: DeckStatus::Ready,
            position_label: format!("{}/{}", position + 1, cards.len()),
            card_name: current.name.clone(),
            card_image: Some(current.image_path.clone()),
            is_reviewed: review.contains(&current.id),
            is_completed: completed.contains(&current.id),
            rows,
        }
    }
}

/// `Card N`, with `: name` appended only for completed cards.
pub fn row_label(index: usize, card: &Card, completed: bool) -> String {
    if completed {
        format!("Card {}: {}", index + 1, card.name)
    } else {
        format!("Card {}", index + 1)
    }
}
