//! Storage layer for DonateSome
//!
//! This crate provides the durable key-value store and the preference
//! storage abstraction used by the application stores.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod preferences;

pub use kv::{scoped_key, KvConfig, KvError, KvStore, Result};
pub use preferences::{open_preference_storage, MemoryStorage, PreferenceStorage};
