//! # Favorites Store
//!
//! The single source of truth for the user's favorites on this device.
//!
//! State changes go through a pure reducer ([`reduce`]) and a single
//! dispatch point ([`FavoritesStore::dispatch`]), so the transition table can
//! be tested without any storage at all.
//!
//! ## Lifecycle
//!
//! 1. A new store starts empty with `loading = true`.
//! 2. [`FavoritesStore::initialize`] reads the durable blob once. A missing
//!    blob means no favorites. A blob that cannot be read or parsed is left
//!    untouched on disk, the store falls back to an empty list and records a
//!    storage error. Either way `loading` ends up `false`.
//! 3. After that, only add/remove/clear mutate the list. Each applies the
//!    change in memory first and then rewrites the whole list to storage.
//!
//! ## Write failures
//!
//! A failed write is returned to the caller and recorded in
//! [`FavoritesState::error`], but the in-memory change is **not** rolled
//! back: the favorite stays "added" until the next successful write
//! reconciles storage. Callers that need a stronger guarantee must check the
//! returned error themselves.

use crate::error::Result;
use crate::model::FavoriteRecipe;
use crate::store::{StorageBackend, FAVORITES_KEY};
use chrono::Utc;
use tracing::{debug, info, warn};

pub const STORAGE_ERROR: &str = "Failed to save data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesState {
    /// Insertion order, at most one entry per id.
    pub favorites: Vec<FavoriteRecipe>,
    /// True only until start-up rehydration settles.
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FavoritesState {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    SetLoading(bool),
    SetError(Option<String>),
    LoadFavorites(Vec<FavoriteRecipe>),
    AddFavorite(FavoriteRecipe),
    RemoveFavorite(String),
    ClearFavorites,
}

/// Pure state transition.
pub fn reduce(mut state: FavoritesState, action: FavoritesAction) -> FavoritesState {
    match action {
        FavoritesAction::SetLoading(loading) => {
            state.loading = loading;
        }
        FavoritesAction::SetError(error) => {
            state.error = error;
            state.loading = false;
        }
        FavoritesAction::LoadFavorites(favorites) => {
            // Hand-edited blobs may repeat an id; first occurrence wins.
            let mut unique: Vec<FavoriteRecipe> = Vec::with_capacity(favorites.len());
            for favorite in favorites {
                if !unique.iter().any(|f| f.id == favorite.id) {
                    unique.push(favorite);
                }
            }
            state.favorites = unique;
            state.loading = false;
            state.error = None;
        }
        FavoritesAction::AddFavorite(favorite) => {
            if state.favorites.iter().any(|f| f.id == favorite.id) {
                return state;
            }
            state.favorites.push(favorite);
            state.error = None;
        }
        FavoritesAction::RemoveFavorite(id) => {
            state.favorites.retain(|f| f.id != id);
            state.error = None;
        }
        FavoritesAction::ClearFavorites => {
            state.favorites.clear();
            state.error = None;
        }
    }
    state
}

/// Owns the favorites state and mirrors it into a [`StorageBackend`].
pub struct FavoritesStore<B: StorageBackend> {
    backend: B,
    state: FavoritesState,
}

impl<B: StorageBackend> FavoritesStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: FavoritesState::default(),
        }
    }

    pub fn state(&self) -> &FavoritesState {
        &self.state
    }

    pub fn favorites(&self) -> &[FavoriteRecipe] {
        &self.state.favorites
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Applies `action` to the current state. The only place state changes.
    pub fn dispatch(&mut self, action: FavoritesAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Rehydrates from storage. Runs once; later calls return the current count.
    ///
    /// On failure the store is still usable (empty, `loading == false`,
    /// `error` set) and the error is returned so the caller can report it.
    pub fn initialize(&mut self) -> Result<usize> {
        if !self.state.loading {
            return Ok(self.state.favorites.len());
        }

        match self.read_favorites() {
            Ok(favorites) => {
                self.dispatch(FavoritesAction::LoadFavorites(favorites));
                info!(count = self.state.favorites.len(), "favorites rehydrated");
                Ok(self.state.favorites.len())
            }
            Err(e) => {
                warn!(error = %e, "could not rehydrate favorites; starting empty");
                self.dispatch(FavoritesAction::LoadFavorites(Vec::new()));
                self.dispatch(FavoritesAction::SetError(Some(STORAGE_ERROR.to_string())));
                Err(e)
            }
        }
    }

    /// Adds `recipe` unless its id is already present. Returns whether it was added.
    pub fn add_favorite(&mut self, recipe: impl Into<FavoriteRecipe>) -> Result<bool> {
        self.ensure_loaded();
        let favorite = recipe.into();
        if self.is_favorite(&favorite.id) {
            debug!(id = %favorite.id, "already a favorite");
            return Ok(false);
        }

        self.dispatch(FavoritesAction::AddFavorite(favorite.stamped(Utc::now())));
        self.persist()?;
        Ok(true)
    }

    /// Removes the favorite with `id`. Returns whether anything was removed.
    pub fn remove_favorite(&mut self, id: &str) -> Result<bool> {
        self.ensure_loaded();
        if !self.is_favorite(id) {
            return Ok(false);
        }

        self.dispatch(FavoritesAction::RemoveFavorite(id.to_string()));
        self.persist()?;
        Ok(true)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.favorites.iter().any(|f| f.id == id)
    }

    pub fn get_favorite(&self, id: &str) -> Option<&FavoriteRecipe> {
        self.state.favorites.iter().find(|f| f.id == id)
    }

    /// Empties the list and deletes the durable blob.
    pub fn clear_all_favorites(&mut self) -> Result<()> {
        self.ensure_loaded();
        self.dispatch(FavoritesAction::ClearFavorites);
        if let Err(e) = self.backend.remove_item(FAVORITES_KEY) {
            warn!(error = %e, "could not delete favorites blob");
            self.dispatch(FavoritesAction::SetError(Some(STORAGE_ERROR.to_string())));
            return Err(e);
        }
        Ok(())
    }

    pub fn favorite_count(&self) -> usize {
        self.state.favorites.len()
    }

    // Mutating before rehydration would overwrite the stored list with a partial one.
    fn ensure_loaded(&mut self) {
        if self.state.loading {
            if let Err(e) = self.initialize() {
                debug!(error = %e, "mutating after failed rehydration");
            }
        }
    }

    fn read_favorites(&self) -> Result<Vec<FavoriteRecipe>> {
        match self.backend.get_item(FAVORITES_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&mut self) -> Result<()> {
        let written = serde_json::to_string(&self.state.favorites)
            .map_err(Into::into)
            .and_then(|blob| self.backend.set_item(FAVORITES_KEY, &blob));

        if let Err(e) = written {
            warn!(error = %e, "could not persist favorites; keeping in-memory change");
            self.dispatch(FavoritesAction::SetError(Some(STORAGE_ERROR.to_string())));
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::mem_backend::fixtures::{favorite, BackendFixture};
    use crate::store::mem_backend::MemBackend;

    fn loaded_store() -> FavoritesStore<MemBackend> {
        let mut store = FavoritesStore::new(MemBackend::new());
        store.initialize().unwrap();
        store
    }

    fn stored_blob(store: &FavoritesStore<MemBackend>) -> Option<String> {
        store.backend().get_item(FAVORITES_KEY).unwrap()
    }

    // --- reducer ---

    #[test]
    fn reducer_add_is_idempotent_by_id() {
        let state = FavoritesState::default();
        let state = reduce(state, FavoritesAction::LoadFavorites(vec![]));
        let state = reduce(state, FavoritesAction::AddFavorite(favorite("1", "Tart")));
        let mut renamed = favorite("1", "Treacle Tart");
        renamed.area = None;
        let state = reduce(state, FavoritesAction::AddFavorite(renamed));

        assert_eq!(state.favorites.len(), 1);
        assert_eq!(state.favorites[0].name, "Tart");
    }

    #[test]
    fn reducer_load_drops_duplicate_ids() {
        let state = reduce(
            FavoritesState::default(),
            FavoritesAction::LoadFavorites(vec![
                favorite("1", "First"),
                favorite("2", "Second"),
                favorite("1", "Again"),
            ]),
        );
        let names: Vec<_> = state.favorites.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(!state.loading);
    }

    #[test]
    fn reducer_set_error_ends_loading() {
        let state = reduce(
            FavoritesState::default(),
            FavoritesAction::SetError(Some(STORAGE_ERROR.into())),
        );
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(STORAGE_ERROR));
    }

    #[test]
    fn reducer_mutations_clear_the_error() {
        let mut state = reduce(
            FavoritesState::default(),
            FavoritesAction::LoadFavorites(vec![favorite("1", "A")]),
        );
        state.error = Some(STORAGE_ERROR.into());

        let state = reduce(state, FavoritesAction::RemoveFavorite("1".into()));
        assert!(state.favorites.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn reducer_set_loading() {
        let state = reduce(
            FavoritesState::default(),
            FavoritesAction::LoadFavorites(vec![]),
        );
        assert!(reduce(state, FavoritesAction::SetLoading(true)).loading);
    }

    // --- initialize ---

    #[test]
    fn new_store_is_loading_until_initialized() {
        let mut store = FavoritesStore::new(MemBackend::new());
        assert!(store.state().loading);
        assert_eq!(store.initialize().unwrap(), 0);
        assert!(!store.state().loading);
        assert_eq!(store.state().error, None);
    }

    #[test]
    fn initialize_reads_existing_favorites_in_order() {
        let fixture = BackendFixture::new().with_favorites(3);
        let mut store = FavoritesStore::new(fixture.backend);

        assert_eq!(store.initialize().unwrap(), 3);
        let ids: Vec<_> = store.favorites().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["52701", "52702", "52703"]);
    }

    #[test]
    fn corrupt_blob_falls_back_to_empty_and_is_left_alone() {
        let fixture = BackendFixture::new().with_corrupt_favorites();
        let backend = fixture.backend.clone();
        let mut store = FavoritesStore::new(fixture.backend);

        let err = store.initialize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(!store.state().loading);
        assert_eq!(store.state().error.as_deref(), Some(STORAGE_ERROR));
        assert_eq!(store.favorite_count(), 0);
        assert_eq!(
            backend.get_item(FAVORITES_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn read_failure_falls_back_to_empty() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let mut store = FavoritesStore::new(backend);

        assert!(store.initialize().is_err());
        assert!(!store.state().loading);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn initialize_runs_once() {
        let fixture = BackendFixture::new().with_favorites(1);
        let backend = fixture.backend.clone();
        let mut store = FavoritesStore::new(fixture.backend);
        store.initialize().unwrap();

        backend.insert_raw(FAVORITES_KEY, "[]");
        assert_eq!(store.initialize().unwrap(), 1);
        assert_eq!(store.favorite_count(), 1);
    }

    // --- add ---

    #[test]
    fn add_appends_stamps_and_persists() {
        let mut store = loaded_store();
        assert!(store.add_favorite(favorite("1", "Apple Frangipan Tart")).unwrap());
        assert!(store.add_favorite(favorite("2", "Bakewell Tart")).unwrap());

        assert_eq!(store.favorite_count(), 2);
        assert_eq!(store.favorites()[1].id, "2");
        assert!(store.favorites().iter().all(|f| f.added_at().is_some()));
        assert_eq!(
            stored_blob(&store),
            Some(serde_json::to_string(store.favorites()).unwrap())
        );
    }

    #[test]
    fn add_keeps_a_supplied_date() {
        let mut store = loaded_store();
        let mut fav = favorite("1", "Christmas Pudding");
        fav.date_added = Some("2023-12-24T18:00:00".to_string());

        store.add_favorite(fav).unwrap();
        assert_eq!(
            store.favorites()[0].date_added.as_deref(),
            Some("2023-12-24T18:00:00")
        );
    }

    #[test]
    fn adding_twice_changes_nothing() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "Tart")).unwrap();
        store.add_favorite(favorite("2", "Pie")).unwrap();
        let before = store.favorites().to_vec();

        assert!(!store.add_favorite(favorite("1", "Tart, renamed")).unwrap());
        assert_eq!(store.favorites(), before.as_slice());
    }

    #[test]
    fn add_before_initialize_rehydrates_first() {
        let fixture = BackendFixture::new().with_favorites(2);
        let mut store = FavoritesStore::new(fixture.backend);

        store.add_favorite(favorite("1", "New")).unwrap();
        assert_eq!(store.favorite_count(), 3);
        assert!(!store.state().loading);
    }

    #[test]
    fn add_after_failed_rehydration_still_works() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let mut store = FavoritesStore::new(backend);

        assert!(store.add_favorite(favorite("1", "Tart")).unwrap());
        assert!(!store.state().loading);
        assert_eq!(store.state().error, None);
        assert_eq!(store.favorite_count(), 1);
    }

    #[test]
    fn failed_write_keeps_the_in_memory_addition() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "Saved")).unwrap();
        store.backend().set_simulate_write_error(true);

        let err = store.add_favorite(favorite("2", "Unsaved")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(store.is_favorite("2"));
        assert_eq!(store.state().error.as_deref(), Some(STORAGE_ERROR));
        assert!(!store.state().loading);

        let on_disk: Vec<FavoriteRecipe> =
            serde_json::from_str(&stored_blob(&store).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[test]
    fn next_successful_write_reconciles() {
        let mut store = loaded_store();
        store.backend().set_simulate_write_error(true);
        let _ = store.add_favorite(favorite("1", "A"));
        store.backend().set_simulate_write_error(false);

        store.add_favorite(favorite("2", "B")).unwrap();
        assert_eq!(store.state().error, None);
        assert_eq!(
            stored_blob(&store),
            Some(serde_json::to_string(store.favorites()).unwrap())
        );
    }

    // --- remove / clear / queries ---

    #[test]
    fn removing_an_absent_id_is_a_noop() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "Tart")).unwrap();
        let before = store.state().clone();
        store.backend().set_simulate_write_error(true);

        assert!(!store.remove_favorite("404").unwrap());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn remove_persists() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "A")).unwrap();
        store.add_favorite(favorite("2", "B")).unwrap();

        assert!(store.remove_favorite("1").unwrap());
        assert!(!store.is_favorite("1"));
        assert_eq!(
            stored_blob(&store),
            Some(serde_json::to_string(store.favorites()).unwrap())
        );
    }

    #[test]
    fn clear_deletes_the_blob() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "A")).unwrap();

        store.clear_all_favorites().unwrap();
        assert_eq!(store.favorite_count(), 0);
        assert!(!store.backend().contains(FAVORITES_KEY));
    }

    #[test]
    fn clear_failure_still_empties_memory() {
        let mut store = loaded_store();
        store.add_favorite(favorite("1", "A")).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(store.clear_all_favorites().is_err());
        assert_eq!(store.favorite_count(), 0);
        assert!(store.backend().contains(FAVORITES_KEY));
    }

    #[test]
    fn get_favorite_by_id() {
        let mut store = loaded_store();
        store.add_favorite(favorite("7", "Eton Mess")).unwrap();
        assert_eq!(store.get_favorite("7").unwrap().name, "Eton Mess");
        assert!(store.get_favorite("8").is_none());
    }

    #[test]
    fn ids_stay_unique_under_mixed_operations() {
        let mut store = loaded_store();
        // Deterministic pseudo-random walk over a small id space.
        let mut seed: u32 = 17;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = format!("{}", (seed >> 16) % 8);
            if (seed >> 8) % 3 == 0 {
                store.remove_favorite(&id).unwrap();
            } else {
                store.add_favorite(favorite(&id, "Any")).unwrap();
            }

            let mut ids: Vec<_> = store.favorites().iter().map(|f| f.id.clone()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total);
        }
    }

    #[test]
    fn restart_sees_only_what_was_persisted() {
        let backend = MemBackend::new();
        let mut store = FavoritesStore::new(backend.clone());
        store.initialize().unwrap();
        store.add_favorite(favorite("A", "Recipe A")).unwrap();
        store.add_favorite(favorite("B", "Recipe B")).unwrap();
        store.remove_favorite("A").unwrap();
        drop(store);

        let mut reopened = FavoritesStore::new(backend);
        reopened.initialize().unwrap();
        let ids: Vec<_> = reopened.favorites().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["B"]);
    }
}
