//! Favorites: local bookmarks of artwork snapshots
//!
//! The whole mapping is rewritten to storage after every toggle.
//! Storage failures never reach the user; the in-memory set keeps the change.

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::constants::storage::FAVORITES_KEY;
use crate::persistence::{Storage, read_json, write_json};
use crate::types::Artwork;

/// Artwork id (as string) → snapshot taken when it was favorited
pub type FavoriteSet = BTreeMap<String, Artwork>;

pub struct FavoritesStore {
    storage: Box<dyn Storage>,
    favorites: FavoriteSet,
}

impl FavoritesStore {
    /// Empty store; call `load()` to hydrate from storage
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            favorites: FavoriteSet::new(),
        }
    }

    /// Create and hydrate in one step
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Read the persisted mapping. Absent, unreadable or corrupt data
    /// leaves the set empty.
    pub fn load(&mut self) {
        self.favorites = match read_json::<FavoriteSet>(self.storage.as_ref(), FAVORITES_KEY) {
            Ok(Some(favorites)) => {
                info!(count = favorites.len(), "Loaded favorites");
                favorites
            }
            Ok(None) => {
                info!("No saved favorites");
                FavoriteSet::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorites, starting empty");
                FavoriteSet::new()
            }
        };
    }

    /// Add or remove `artwork`, then persist the full mapping.
    /// Returns whether the artwork is a favorite afterwards.
    pub fn toggle(&mut self, artwork: &Artwork) -> bool {
        let key = artwork.key();
        let now_favorite = if self.favorites.remove(&key).is_some() {
            false
        } else {
            self.favorites.insert(key, artwork.clone());
            true
        };
        info!(id = artwork.id, favorite = now_favorite, "Toggled favorite");

        if let Err(e) = write_json(self.storage.as_ref(), FAVORITES_KEY, &self.favorites) {
            warn!(error = %e, id = artwork.id, "Failed to save favorites");
        }

        now_favorite
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.contains_key(&id.to_string())
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}
