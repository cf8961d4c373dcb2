//! Platform integration for DonateSome
//!
//! This crate abstracts the operating system signals the application
//! reacts to. Currently that is the light/dark appearance setting.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;

pub use appearance::{AppearanceSource, ColorScheme, ManualAppearance};
