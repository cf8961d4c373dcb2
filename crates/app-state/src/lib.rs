//! Application state management for DonateSome
//!
//! This crate provides the shared, observable stores screens read from and
//! mutate: the theme preference store and the follow graph.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod follow;
pub mod theme_store;

pub use follow::{AccountType, FollowGraphStore, FollowSet, FollowSnapshot};
pub use theme_store::{ThemeStore, ThemeStoreConfig};
