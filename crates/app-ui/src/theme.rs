//! Theme preference, color palettes and theme resolution
//!
//! The user picks a [`ThemePreference`]; together with the operating system's
//! [`ColorScheme`] it resolves to a [`ResolvedTheme`] selecting one of the two
//! fixed palettes.
//!
//! # Usage
//!
//! ```rust
//! use app_platform::ColorScheme;
//! use app_ui::theme::{ResolvedTheme, ThemePreference, DARK_PALETTE};
//!
//! let theme = ResolvedTheme::resolve(ThemePreference::System, ColorScheme::Dark);
//! assert!(theme.is_dark);
//! assert_eq!(theme.palette, &DARK_PALETTE);
//! ```

use app_platform::ColorScheme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = &'static str;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

// =============================================================================
// Theme Preference
// =============================================================================

/// The user's stored theme choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Always light
    Light,
    /// Always dark
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl ThemePreference {
    /// All preferences, in settings-menu order
    pub const ALL: [ThemePreference; 3] =
        [ThemePreference::Light, ThemePreference::Dark, ThemePreference::System];

    /// The literal persisted for this preference
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Label shown in the settings menu
    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored string that is not one of `light`, `dark` or `system`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme preference: {0:?}")]
pub struct ParseThemePreferenceError(pub String);

impl std::str::FromStr for ThemePreference {
    type Err = ParseThemePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact literals only, anything else is treated as corrupt
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(ParseThemePreferenceError(s.to_string())),
        }
    }
}

// =============================================================================
// Palettes
// =============================================================================

/// Named color roles every palette defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    /// Screen background
    Background,
    /// Raised surfaces (headers, list rows)
    Surface,
    /// Primary text
    Text,
    /// Muted text
    TextSecondary,
    /// Separators and outlines
    Border,
    /// Brand/action color
    Primary,
    /// Feed card background
    CardBackground,
    /// Screen header background
    HeaderBackground,
    /// Tab bar background
    TabBarBackground,
    /// Selected tab tint
    TabBarActive,
    /// Unselected tab tint
    TabBarInactive,
    /// Text input background
    InputBackground,
    /// Input placeholder text
    Placeholder,
}

impl ColorRole {
    /// Every role
    pub const ALL: [ColorRole; 13] = [
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Text,
        ColorRole::TextSecondary,
        ColorRole::Border,
        ColorRole::Primary,
        ColorRole::CardBackground,
        ColorRole::HeaderBackground,
        ColorRole::TabBarBackground,
        ColorRole::TabBarActive,
        ColorRole::TabBarInactive,
        ColorRole::InputBackground,
        ColorRole::Placeholder,
    ];

    /// Role name as used by screens
    pub fn name(&self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::Surface => "surface",
            ColorRole::Text => "text",
            ColorRole::TextSecondary => "textSecondary",
            ColorRole::Border => "border",
            ColorRole::Primary => "primary",
            ColorRole::CardBackground => "cardBackground",
            ColorRole::HeaderBackground => "headerBackground",
            ColorRole::TabBarBackground => "tabBarBackground",
            ColorRole::TabBarActive => "tabBarActive",
            ColorRole::TabBarInactive => "tabBarInactive",
            ColorRole::InputBackground => "inputBackground",
            ColorRole::Placeholder => "placeholder",
        }
    }
}

/// Complete color palette for one appearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Raised surfaces
    pub surface: Color,
    /// Primary text
    pub text: Color,
    /// Muted text
    pub text_secondary: Color,
    /// Separators and outlines
    pub border: Color,
    /// Brand/action color
    pub primary: Color,
    /// Feed card background
    pub card_background: Color,
    /// Screen header background
    pub header_background: Color,
    /// Tab bar background
    pub tab_bar_background: Color,
    /// Selected tab tint
    pub tab_bar_active: Color,
    /// Unselected tab tint
    pub tab_bar_inactive: Color,
    /// Text input background
    pub input_background: Color,
    /// Input placeholder text
    pub placeholder: Color,
}

impl Palette {
    /// Look up a color by role
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Text => self.text,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::Border => self.border,
            ColorRole::Primary => self.primary,
            ColorRole::CardBackground => self.card_background,
            ColorRole::HeaderBackground => self.header_background,
            ColorRole::TabBarBackground => self.tab_bar_background,
            ColorRole::TabBarActive => self.tab_bar_active,
            ColorRole::TabBarInactive => self.tab_bar_inactive,
            ColorRole::InputBackground => self.input_background,
            ColorRole::Placeholder => self.placeholder,
        }
    }
}

/// Light appearance palette
pub static LIGHT_PALETTE: Palette = Palette {
    background: "#F5F5F5",
    surface: "#FFFFFF",
    text: "#000000",
    text_secondary: "#666666",
    border: "#E5E5EA",
    primary: "#007AFF",
    card_background: "#FFFFFF",
    header_background: "#F5F5F5",
    tab_bar_background: "#FFFFFF",
    tab_bar_active: "#007AFF",
    tab_bar_inactive: "#8E8E93",
    input_background: "#FFFFFF",
    placeholder: "#999999",
};

/// Dark appearance palette
pub static DARK_PALETTE: Palette = Palette {
    background: "#000000",
    surface: "#1C1C1E",
    text: "#FFFFFF",
    text_secondary: "#AEAEB2",
    border: "#38383A",
    primary: "#0A84FF",
    card_background: "#1C1C1E",
    header_background: "#000000",
    tab_bar_background: "#1C1C1E",
    tab_bar_active: "#0A84FF",
    tab_bar_inactive: "#8E8E93",
    input_background: "#2C2C2E",
    placeholder: "#8E8E93",
};

/// Select the palette for an appearance
pub fn palette_for(is_dark: bool) -> &'static Palette {
    if is_dark {
        &DARK_PALETTE
    } else {
        &LIGHT_PALETTE
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Whether a preference displays dark under the given OS scheme
///
/// `System` follows the OS only on a positive dark signal; an unknown
/// scheme displays light.
pub fn resolve_is_dark(preference: ThemePreference, os_scheme: ColorScheme) -> bool {
    match preference {
        ThemePreference::Dark => true,
        ThemePreference::Light => false,
        ThemePreference::System => os_scheme.is_dark(),
    }
}

/// Status bar content style matching a resolved theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    /// Light glyphs, for dark backgrounds
    LightContent,
    /// Dark glyphs, for light backgrounds
    DarkContent,
}

/// Effective theme derived from a preference and the OS scheme
///
/// Always computed from its inputs, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    /// Whether the dark palette is active
    pub is_dark: bool,
    /// Active palette
    pub palette: &'static Palette,
}

impl ResolvedTheme {
    /// Resolve a preference against the OS scheme
    pub fn resolve(preference: ThemePreference, os_scheme: ColorScheme) -> Self {
        let is_dark = resolve_is_dark(preference, os_scheme);
        Self { is_dark, palette: palette_for(is_dark) }
    }

    /// Color for a role in the active palette
    pub fn color(&self, role: ColorRole) -> Color {
        self.palette.get(role)
    }

    /// Status bar style for the active palette
    pub fn status_bar_style(&self) -> StatusBarStyle {
        if self.is_dark {
            StatusBarStyle::LightContent
        } else {
            StatusBarStyle::DarkContent
        }
    }

    /// The preference that pins the opposite of what is displayed
    pub fn opposite_preference(&self) -> ThemePreference {
        if self.is_dark {
            ThemePreference::Light
        } else {
            ThemePreference::Dark
        }
    }
}
