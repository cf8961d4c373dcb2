//! Operating system appearance signal
//!
//! The OS reports whether the user prefers a light or dark interface. Some
//! platforms cannot answer, which is reported as [`ColorScheme::Unknown`].

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Color scheme reported by the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light appearance
    Light,
    /// Dark appearance
    Dark,
    /// The platform did not report a scheme
    #[default]
    Unknown,
}

impl ColorScheme {
    /// Interpret a platform scheme name (`"light"`, `"dark"`, anything else)
    pub fn from_platform_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("light") => ColorScheme::Light,
            Some("dark") => ColorScheme::Dark,
            _ => ColorScheme::Unknown,
        }
    }

    /// Whether the OS positively reports a dark appearance
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScheme::Light => write!(f, "light"),
            ColorScheme::Dark => write!(f, "dark"),
            ColorScheme::Unknown => write!(f, "unknown"),
        }
    }
}

/// Source of the OS appearance setting
pub trait AppearanceSource: Send + Sync {
    /// Current scheme, queried synchronously
    fn current_scheme(&self) -> ColorScheme;

    /// Receiver notified on every scheme change
    ///
    /// The receiver holds the latest scheme only. Changes arriving faster
    /// than the receiver is polled are merged, so a listener may skip
    /// intermediate schemes but always ends on the most recent one.
    fn subscribe(&self) -> watch::Receiver<ColorScheme>;
}

/// Appearance source driven from code
///
/// Shells without a native appearance API (and tests) push scheme changes
/// through [`ManualAppearance::set_scheme`].
///
/// # Example
///
/// ```rust
/// use app_platform::{AppearanceSource, ColorScheme, ManualAppearance};
///
/// let appearance = ManualAppearance::new(ColorScheme::Light);
/// let rx = appearance.subscribe();
///
/// appearance.set_scheme(ColorScheme::Dark);
/// assert_eq!(*rx.borrow(), ColorScheme::Dark);
/// assert_eq!(appearance.current_scheme(), ColorScheme::Dark);
/// ```
#[derive(Debug)]
pub struct ManualAppearance {
    scheme_tx: watch::Sender<ColorScheme>,
}

impl ManualAppearance {
    /// Create a source reporting `initial`
    pub fn new(initial: ColorScheme) -> Self {
        let (scheme_tx, _) = watch::channel(initial);
        Self { scheme_tx }
    }

    /// Report a new scheme to all subscribers
    ///
    /// Every call notifies, even when the scheme is unchanged, matching
    /// platforms that re-send their appearance on focus changes.
    pub fn set_scheme(&self, scheme: ColorScheme) {
        tracing::debug!(%scheme, "OS appearance changed");
        self.scheme_tx.send_replace(scheme);
    }
}

impl Default for ManualAppearance {
    fn default() -> Self {
        Self::new(ColorScheme::Unknown)
    }
}

impl AppearanceSource for ManualAppearance {
    fn current_scheme(&self) -> ColorScheme {
        *self.scheme_tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.scheme_tx.subscribe()
    }
}
