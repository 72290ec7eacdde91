//! Card rendering and image loading.
//!
//! Uses `rayon::spawn` for image decoding, then `slint::invoke_from_event_loop`
//! to update the UI from the background thread.

use crate::image_cache::{CachedImage, ImageCache};
use crate::image_loader;
use crate::services::DeckService;
use crate::state::{DisplayState, SharedStore};
use crate::ui::{
    clear_card_image, reset_flip, set_card_image, set_deck_info, set_error_with_prefix,
};
use log::debug;
use slint::ComponentHandle;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Pushes a new display state to the UI after the current card changed.
///
/// The card is turned back to its front and its image is loaded.
pub fn render_card(
    ui: &crate::AppWindow,
    state: &DisplayState,
    service: &DeckService<SharedStore>,
    cache: &Arc<Mutex<ImageCache>>,
) {
    set_deck_info(ui, state);
    reset_flip(ui);

    match &state.card_image {
        Some(path) => load_and_display_image(ui, path.clone(), service.clone(), cache.clone()),
        None => clear_card_image(ui),
    }
}

fn decode(path: &Path) -> Result<CachedImage, String> {
    let (data, width, height) =
        image_loader::load_image_blocking(path).map_err(|e| e.to_string())?;
    Ok(CachedImage::new(data, width, height))
}

fn show_cached(ui: &crate::AppWindow, cached: CachedImage) {
    let image = image_loader::create_slint_image(cached.data, cached.width, cached.height);
    set_card_image(ui, image);
}

/// Shows the image at `path`, decoding it in the background on a cache miss.
fn load_and_display_image(
    ui: &crate::AppWindow,
    path: PathBuf,
    service: DeckService<SharedStore>,
    cache: Arc<Mutex<ImageCache>>,
) {
    let cached = cache.lock().ok().and_then(|mut c| c.get(&path));

    if let Some(cached_image) = cached {
        show_cached(ui, cached_image);
        preload_adjacent_images(&service, &cache);
        return;
    }

    clear_card_image(ui);

    let ui_handle = ui.as_weak();
    rayon::spawn(move || {
        let result = decode(&path);

        let _ = slint::invoke_from_event_loop(move || {
            let Some(ui) = ui_handle.upgrade() else {
                return;
            };

            // The user may have moved on while this was decoding.
            let still_current =
                service.display_state().card_image.as_deref() == Some(path.as_path());

            match result {
                Ok(image) => {
                    if let Ok(mut cache) = cache.lock() {
                        cache.put(path.clone(), image.clone());
                    }

                    if still_current {
                        show_cached(&ui, image);
                        preload_adjacent_images(&service, &cache);
                    } else {
                        debug!("Dropping stale image {}", path.display());
                    }
                }
                Err(error) if still_current => {
                    set_error_with_prefix(&ui, "Failed to load card image", error)
                }
                Err(error) => debug!("Ignoring stale load failure: {}", error),
            }
        });
    });
}

/// Decodes the neighbouring cards' images into the cache.
fn preload_adjacent_images(service: &DeckService<SharedStore>, cache: &Arc<Mutex<ImageCache>>) {
    for path in service.adjacent_images() {
        let should_load = cache
            .lock()
            .map(|c| !c.contains(&path))
            .unwrap_or(false);

        if !should_load {
            continue;
        }

        let cache = cache.clone();
        rayon::spawn(move || {
            // Preload failures surface when the card is actually shown.
            if let Ok(image) = decode(&path) {
                if let Ok(mut cache) = cache.lock() {
                    cache.put(path, image);
                }
            }
        });
    }
}
