//! Library crate for usercore.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, key handling and event loop (`app`)
//! - Command-line options (`cli`)
//! - Error and result types (`error`)
//! - Add/edit form and validation (`form`)
//! - Remote user loader (`loader`)
//! - User record types (`model`)
//! - In-memory search helpers (`search`)
//! - Reducer-style user store (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usercore` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod form;
pub mod loader;
pub mod model;
pub mod search;
pub mod store;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, LoadError, Result};
pub use model::{NewUser, User, UserId};
pub use store::{Action, Store, UserState};
