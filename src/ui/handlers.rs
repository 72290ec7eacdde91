//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (next_card, prev_card, toggle_review, etc.).
//! Every callback runs one deck operation and pushes the resulting state
//! back into the window.

use crate::services::DeckService;
use crate::state::AppState;
use crate::ui::{render_card, set_deck_info};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, app_state: &AppState) {
    let service = DeckService::new(app_state.deck.clone());
    let cache = app_state.image_cache.clone();
    let logic = ui.global::<crate::Logic>();

    logic.on_next_card({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        let cache = cache.clone();
        move || {
            let state = service.next();
            if let Some(ui) = ui_handle.upgrade() {
                render_card(&ui, &state, &service, &cache);
            }
        }
    });

    logic.on_prev_card({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        let cache = cache.clone();
        move || {
            let state = service.previous();
            if let Some(ui) = ui_handle.upgrade() {
                render_card(&ui, &state, &service, &cache);
            }
        }
    });

    logic.on_go_to({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        let cache = cache.clone();
        move |index| {
            let state = service.go_to(i64::from(index));
            if let Some(ui) = ui_handle.upgrade() {
                render_card(&ui, &state, &service, &cache);
            }
        }
    });

    // Tag toggles keep the current card, so the image and flip side stay put.
    logic.on_toggle_review({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        move || {
            let state = service.toggle_review();
            if let Some(ui) = ui_handle.upgrade() {
                set_deck_info(&ui, &state);
            }
        }
    });

    logic.on_toggle_complete({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        move || {
            let state = service.toggle_complete();
            if let Some(ui) = ui_handle.upgrade() {
                set_deck_info(&ui, &state);
            }
        }
    });

    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread
    logic.on_open_deck({
        let ui_handle = ui.as_weak();
        let service = service.clone();
        let cache = cache.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let service = service.clone();
            let cache = cache.clone();
            let _ = slint::spawn_local(async move {
                let Some(file_handle) = AsyncFileDialog::new()
                    .add_filter("Deck manifest", &["json"])
                    .pick_file()
                    .await
                else {
                    return;
                };

                crate::startup::load_deck(
                    ui_handle,
                    file_handle.path().to_path_buf(),
                    service,
                    cache,
                );
            });
        }
    });
}
