//! # RecipeBox Architecture
//!
//! RecipeBox is a **recipe discovery library** with a CLI client: search an
//! online recipe catalogue, read recipes with their ingredients and steps,
//! and keep a list of favorites on this device.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, owns the runtime      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session's service objects                       │
//! │  - Enforces the optional sign-in requirement                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user operation, returns CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                             │
//!                  ▼                             ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Services                    │ │  Storage (store/)          │
//! │  favorites, auth, source,    │ │  StorageBackend trait      │
//! │  normalize, instructions     │ │  FsBackend / MemBackend    │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics are `tracing` events; the binary decides where
//! they go (see [`logging`]).
//!
//! ## Sync storage, async network
//!
//! Storage blobs are tiny and local, so [`store::StorageBackend`] is
//! synchronous. Everything that talks HTTP ([`source`], [`auth`]) is async on
//! tokio; the CLI drives it with a current-thread runtime.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per command family
//! - [`favorites`]: Favorites state, reducer and persistence
//! - [`source`]: HTTP client for the recipe API, with input validation
//! - [`normalize`]: Wire records to [`model`] types
//! - [`instructions`]: Best-effort splitting of instructions into steps
//! - [`search`]: Keystroke debouncing for interactive search
//! - [`auth`]: Optional sign-in against an identity provider
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod favorites;
pub mod instructions;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod search;
pub mod source;
pub mod store;
