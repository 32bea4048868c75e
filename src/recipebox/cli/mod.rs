//! # CLI Behavior
//!
//! This is **one possible UI client** for recipebox. It is the only place
//! that knows about terminal I/O, exit codes and output formatting.
//!
//! ### Naked Execution (`recipebox`)
//!
//! Running `recipebox` with no arguments lists favorites.
//!
//! ### Interactive search (`recipebox browse`)
//!
//! Reads one query per line from stdin and searches once typing settles
//! (`debounce-ms`, default 300). Piping a file of queries works too; the last
//! line is always searched.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
