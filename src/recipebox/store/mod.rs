//! # Storage Layer
//!
//! On-device persistence is a plain key-value store of string blobs, the same
//! shape as the mobile client's async storage. The [`StorageBackend`] trait
//! hides where the blobs live.
//!
//! ## Keys
//!
//! - [`FAVORITES_KEY`]: JSON array of favorited recipes
//! - [`TOKEN_KEY`]: identity-provider session token
//! - [`USER_KEY`]: JSON user profile of the signed-in user
//!
//! There is no schema versioning. Callers treat a blob they cannot parse as
//! absent rather than as a fatal error.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key under the data directory,
//!   written atomically (tmp file, then rename).
//! - [`mem_backend::MemBackend`]: in-memory, for tests. Clones share the same
//!   items, so dropping a store and building a new one over a clone behaves
//!   like an app restart.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json                 # RecipeBoxConfig
//! ├── _RecipeBox_favorites.json   # @RecipeBox:favorites
//! ├── token.json                  # token
//! └── user.json                   # user
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

pub const FAVORITES_KEY: &str = "@RecipeBox:favorites";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
