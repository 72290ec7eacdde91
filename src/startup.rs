use log::info;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::DEFAULT_MANIFEST;
use crate::image_cache::ImageCache;
use crate::services::{DeckService, card_source};
use crate::state::{AppState, SharedStore};

/// Reads the deck at `path` off the UI thread and starts a session with it.
///
/// A deck that fails to load starts an empty session.
pub fn load_deck(
    ui: slint::Weak<crate::AppWindow>,
    path: PathBuf,
    service: DeckService<SharedStore>,
    cache: Arc<Mutex<ImageCache>>,
) {
    info!("Loading deck from {}", path.display());

    rayon::spawn(move || {
        let cards = card_source::load_cards(&path);

        let _ = slint::invoke_from_event_loop(move || {
            let state = service.initialize(cards);
            if let Some(ui) = ui.upgrade() {
                crate::ui::render_card(&ui, &state, &service, &cache);
            }
        });
    });
}

/// First non-flag argument, or the default manifest.
fn manifest_path_from_args() -> PathBuf {
    std::env::args_os()
        .skip(1)
        .find(|arg| !arg.to_string_lossy().starts_with('-'))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}

pub fn configure_startup_opening(app: &crate::AppWindow, app_state: &AppState) {
    use slint::ComponentHandle;

    load_deck(
        app.as_weak(),
        manifest_path_from_args(),
        DeckService::new(app_state.deck.clone()),
        app_state.image_cache.clone(),
    );
}
