//! # inkpost-store
//!
//! Local session storage for Inkpost.
//!
//! A small key-value table in SQLite stands in for the browser's local
//! storage: the bearer token lives under `token` and a JSON profile snapshot
//! under `user`. Every write is broadcast so that independent views can
//! re-read after a change. [`Session`] is the typed facade the client uses.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::{KeyValueStore, SqliteStore, StorageEvent};
pub use session::Session;
