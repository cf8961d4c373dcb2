//! User interface design system for DonateSome
//!
//! This crate holds the pieces of the UI layer that carry logic rather
//! than markup: the theme preference, the two fixed color palettes and the
//! rule that resolves a preference against the OS appearance.
//!
//! Two palettes exist:
//! - [`theme::LIGHT_PALETTE`] - light grey background, white surfaces
//! - [`theme::DARK_PALETTE`] - black background, charcoal surfaces
//!
//! # Example
//!
//! ```rust
//! use app_platform::ColorScheme;
//! use app_ui::{ColorRole, ResolvedTheme, ThemePreference};
//!
//! let theme = ResolvedTheme::resolve(ThemePreference::Light, ColorScheme::Dark);
//! assert!(!theme.is_dark);
//! assert_eq!(theme.color(ColorRole::Surface), "#FFFFFF");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod theme;

pub use theme::{
    palette_for, parse_hex_color, resolve_is_dark, Color, ColorRole, Palette,
    ParseThemePreferenceError, ResolvedTheme, StatusBarStyle, ThemePreference, DARK_PALETTE,
    LIGHT_PALETTE,
};
