//! Helper functions to set groups of DeckState properties together.

use crate::state::{DeckStatus, DisplayState, RowSummary};
use log::error;
use slint::ComponentHandle;

/// Sets every property derived from the deck's display state.
///
/// Groups: loading, has-cards, position-label, card-name, reviewed,
/// completed, rows
pub fn set_deck_info(ui: &crate::AppWindow, state: &DisplayState) {
    let deck_state = ui.global::<crate::DeckState>();
    deck_state.set_loading(state.status == DeckStatus::Loading);
    deck_state.set_has_cards(state.status == DeckStatus::Ready);
    deck_state.set_position_label(state.position_label.as_str().into());
    deck_state.set_card_name(state.card_name.as_str().into());
    deck_state.set_reviewed(state.is_reviewed);
    deck_state.set_completed(state.is_completed);

    let rows: Vec<crate::CardRow> = state.rows.iter().map(card_row).collect();
    deck_state.set_rows(slint::ModelRc::new(slint::VecModel::from(rows)));
}

fn card_row(row: &RowSummary) -> crate::CardRow {
    crate::CardRow {
        index: row.index as i32,
        current: row.is_current,
        label: row.label.as_str().into(),
        tag: row.tag.as_str().into(),
    }
}

/// Sets the card image and marks it as loaded.
pub fn set_card_image(ui: &crate::AppWindow, image: slint::Image) {
    let deck_state = ui.global::<crate::DeckState>();
    deck_state.set_card_image(image);
    deck_state.set_image_loaded(true);
    deck_state.set_error_message("".into());
}

/// Hides the card image and any previous load error until a new image arrives.
pub fn clear_card_image(ui: &crate::AppWindow) {
    let deck_state = ui.global::<crate::DeckState>();
    deck_state.set_image_loaded(false);
    deck_state.set_card_image(slint::Image::default());
    deck_state.set_error_message("".into());
}

/// Turns the card back to its front side.
pub fn reset_flip(ui: &crate::AppWindow) {
    ui.global::<crate::DeckState>().set_flipped(false);
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the DeckState error-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    ui.global::<crate::DeckState>()
        .set_error_message(error_message.into());
}
