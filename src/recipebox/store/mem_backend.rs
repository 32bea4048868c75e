use super::backend::StorageBackend;
use crate::error::{RecipeBoxError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since recipebox runs a single
/// logical flow at a time. Clones share the same items, which lets a test
/// drop a store and rehydrate a fresh one from the "same device".
#[derive(Clone, Default)]
pub struct MemBackend {
    items: Rc<RefCell<HashMap<String, String>>>,
    simulate_write_error: Rc<Cell<bool>>,
    simulate_read_error: Rc<Cell<bool>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable read error simulation for testing rehydration fallbacks.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Test helper to plant a raw blob, bypassing the error switches.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(RecipeBoxError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RecipeBoxError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RecipeBoxError::Store("Simulated write error".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::FavoriteRecipe;
    use crate::store::FAVORITES_KEY;

    pub fn favorite(id: &str, name: &str) -> FavoriteRecipe {
        FavoriteRecipe {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: format!("https://www.themealdb.com/images/media/meals/{}.jpg", id),
            category: Some("Dessert".to_string()),
            area: Some("British".to_string()),
            date_added: None,
        }
    }

    pub struct BackendFixture {
        pub backend: MemBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new(),
            }
        }

        /// Persist `count` favorites as an earlier session would have.
        pub fn with_favorites(self, count: usize) -> Self {
            let favorites: Vec<FavoriteRecipe> = (1..=count)
                .map(|i| favorite(&format!("{}", 52700 + i), &format!("Recipe {}", i)))
                .collect();
            let blob = serde_json::to_string(&favorites).unwrap();
            self.backend.insert_raw(FAVORITES_KEY, &blob);
            self
        }

        pub fn with_corrupt_favorites(self) -> Self {
            self.backend.insert_raw(FAVORITES_KEY, "{not json");
            self
        }
    }
}
