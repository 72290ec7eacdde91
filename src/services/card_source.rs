//! Supplies the deck's cards.
//!
//! A deck is normally described by a JSON manifest of `{ "file", "name" }`
//! records, with image paths relative to the manifest. A plain directory of
//! images also works; each file becomes a card named after its stem.
//! Failures never escape: they are logged and produce an empty deck.

use crate::error::{AppError, Result};
use crate::file_utils;
use crate::state::Card;
use log::{error, info};
use std::fs;
use std::path::Path;

/// Loads the cards at `path`, falling back to an empty deck on any failure.
pub fn load_cards(path: &Path) -> Vec<Card> {
    match try_load_cards(path) {
        Ok(cards) => {
            info!("Loaded {} cards from {}", cards.len(), path.display());
            cards
        }
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

/// Loads the cards at `path`, reporting why it failed.
pub fn try_load_cards(path: &Path) -> Result<Vec<Card>> {
    if path.is_dir() {
        cards_from_directory(path)
    } else {
        cards_from_manifest(path)
    }
}

fn cards_from_manifest(path: &Path) -> Result<Vec<Card>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::CardSource(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let cards: Vec<Card> = serde_json::from_str(&raw).map_err(|e| {
        AppError::CardSource(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(cards
        .into_iter()
        .map(|card| {
            let image_path = base.join(&card.id);
            card.with_image_path(image_path)
        })
        .collect())
}

fn cards_from_directory(dir: &Path) -> Result<Vec<Card>> {
    let cards = file_utils::scan_directory(dir)?
        .into_iter()
        .filter_map(|path| {
            let id = path.file_name()?.to_string_lossy().into_owned();
            let name = path.file_stem()?.to_string_lossy().into_owned();
            Some(Card::new(id, name).with_image_path(path))
        })
        .collect();

    Ok(cards)
}
