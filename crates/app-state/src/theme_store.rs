//! Theme preference store
//!
//! [`ThemeStore`] owns the user's [`ThemePreference`], follows the OS
//! appearance and hands out the [`ResolvedTheme`] screens render with.
//!
//! The preference is the only persisted value. The resolved theme is
//! recomputed from the preference and the last OS scheme on every read and
//! every change, so the two can never drift apart.
//!
//! Persistence is best-effort. The in-memory preference is updated and
//! published before the write is queued, and a failed write never rolls it
//! back; the UI state is the source of truth for the session.

use std::sync::{Arc, Weak};
use std::time::Duration;

use app_platform::{AppearanceSource, ColorScheme};
use app_ui::theme::{ResolvedTheme, ThemePreference};
use parking_lot::{Mutex, RwLock};
use storage::{scoped_key, PreferenceStorage};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Default time allowed for reading the saved preference at startup
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for the theme store
#[derive(Debug, Clone)]
pub struct ThemeStoreConfig {
    /// Storage key holding the preference literal
    pub storage_key: String,
    /// Upper bound on the startup read before falling back to `System`
    pub load_timeout: Duration,
}

impl Default for ThemeStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: scoped_key(&["device", "themeMode"]),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

impl ThemeStoreConfig {
    /// Use a custom storage key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the startup read timeout
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }
}

/// Inputs the resolved theme is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemeInputs {
    preference: ThemePreference,
    os_scheme: ColorScheme,
}

impl ThemeInputs {
    fn resolve(&self) -> ResolvedTheme {
        ResolvedTheme::resolve(self.preference, self.os_scheme)
    }
}

/// Work for the persistence writer, processed in order
#[derive(Debug)]
enum PersistCommand {
    Save(ThemePreference),
    Clear,
    Flush(oneshot::Sender<()>),
    Shutdown,
}

struct ThemeInner {
    inputs: RwLock<ThemeInputs>,
    resolved_tx: watch::Sender<ResolvedTheme>,
    persist_tx: mpsc::UnboundedSender<PersistCommand>,
    writer: Mutex<Option<JoinHandle<()>>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl ThemeInner {
    fn publish(&self, resolved: ResolvedTheme) {
        self.resolved_tx.send_replace(resolved);
    }

    fn enqueue(&self, command: PersistCommand) {
        if self.persist_tx.send(command).is_err() {
            tracing::warn!("Theme persistence stopped, change kept in memory only");
        }
    }

    fn apply_os_scheme(&self, os_scheme: ColorScheme) {
        let resolved = {
            let mut inputs = self.inputs.write();
            inputs.os_scheme = os_scheme;
            inputs.resolve()
        };
        tracing::debug!(%os_scheme, is_dark = resolved.is_dark, "OS scheme applied");
        self.publish(resolved);
    }
}

impl Drop for ThemeInner {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.get_mut().take() {
            listener.abort();
        }
    }
}

/// Shared theme preference store
///
/// Cloning yields another handle to the same store.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use app_platform::{ColorScheme, ManualAppearance};
/// use app_state::theme_store::{ThemeStore, ThemeStoreConfig};
/// use app_ui::theme::ThemePreference;
/// use storage::MemoryStorage;
///
/// #[tokio::main]
/// async fn main() {
///     let store = ThemeStore::initialize(
///         Arc::new(MemoryStorage::new()),
///         Arc::new(ManualAppearance::new(ColorScheme::Dark)),
///         ThemeStoreConfig::default(),
///     )
///     .await;
///
///     assert!(store.resolved_theme().is_dark);
///
///     store.toggle();
///     assert_eq!(store.preference(), ThemePreference::Light);
/// }
/// ```
#[derive(Clone)]
pub struct ThemeStore {
    inner: Arc<ThemeInner>,
}

impl ThemeStore {
    /// Load the saved preference and start following the OS appearance
    ///
    /// Never fails: a missing, unreadable, slow or invalid saved value
    /// starts the store in `System` mode. Must be called within a tokio
    /// runtime.
    pub async fn initialize(
        storage: Arc<dyn PreferenceStorage>,
        appearance: Arc<dyn AppearanceSource>,
        config: ThemeStoreConfig,
    ) -> Self {
        let preference =
            load_preference(storage.as_ref(), &config.storage_key, config.load_timeout).await;

        // Subscribe before sampling so no change falls in between
        let scheme_rx = appearance.subscribe();
        let os_scheme = appearance.current_scheme();

        let inputs = ThemeInputs { preference, os_scheme };
        let (resolved_tx, _) = watch::channel(inputs.resolve());
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();

        let writer = tokio::spawn(run_writer(storage, config.storage_key, persist_rx));

        let inner = Arc::new(ThemeInner {
            inputs: RwLock::new(inputs),
            resolved_tx,
            persist_tx,
            writer: Mutex::new(Some(writer)),
            listener: Mutex::new(None),
        });

        let listener = tokio::spawn(run_listener(Arc::downgrade(&inner), scheme_rx));
        *inner.listener.lock() = Some(listener);

        tracing::debug!(%preference, %os_scheme, "theme store initialized");
        Self { inner }
    }

    /// Current stored preference
    pub fn preference(&self) -> ThemePreference {
        self.inner.inputs.read().preference
    }

    /// Last OS scheme seen
    pub fn os_scheme(&self) -> ColorScheme {
        self.inner.inputs.read().os_scheme
    }

    /// Effective theme for the current preference and OS scheme
    pub fn resolved_theme(&self) -> ResolvedTheme {
        self.inner.inputs.read().resolve()
    }

    /// Set the preference
    ///
    /// The new preference is visible to readers and subscribers before this
    /// returns. Persisting it happens afterwards in the background.
    pub fn set_preference(&self, preference: ThemePreference) {
        let resolved = {
            let mut inputs = self.inner.inputs.write();
            inputs.preference = preference;
            inputs.resolve()
        };
        tracing::debug!(%preference, is_dark = resolved.is_dark, "theme preference set");
        self.inner.publish(resolved);
        self.inner.enqueue(PersistCommand::Save(preference));
    }

    /// Pin the opposite of what is currently displayed
    ///
    /// Always leaves `System` mode: under a dark OS, toggling from `System`
    /// pins `Light`.
    pub fn toggle(&self) {
        let (preference, resolved) = {
            let mut inputs = self.inner.inputs.write();
            inputs.preference = inputs.resolve().opposite_preference();
            (inputs.preference, inputs.resolve())
        };
        tracing::debug!(%preference, "theme toggled");
        self.inner.publish(resolved);
        self.inner.enqueue(PersistCommand::Save(preference));
    }

    /// Return to `System` mode and forget the saved preference
    pub fn clear_saved_preference(&self) {
        let resolved = {
            let mut inputs = self.inner.inputs.write();
            inputs.preference = ThemePreference::System;
            inputs.resolve()
        };
        self.inner.publish(resolved);
        self.inner.enqueue(PersistCommand::Clear);
    }

    /// Handle an OS appearance change
    ///
    /// Applies and publishes `os_scheme` immediately. The appearance
    /// listener calls this with the latest scheme each time it wakes, so a
    /// burst of OS events is applied as its final value. Shells that must
    /// apply every event deliver them here directly.
    pub fn on_os_scheme_changed(&self, os_scheme: ColorScheme) {
        self.inner.apply_os_scheme(os_scheme);
    }

    /// Receiver notified with the new resolved theme on every change
    pub fn subscribe(&self) -> watch::Receiver<ResolvedTheme> {
        self.inner.resolved_tx.subscribe()
    }

    /// Wait until every change made so far has been written (or has failed)
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.inner.enqueue(PersistCommand::Flush(ack_tx));
        let _ = ack_rx.await;
    }

    /// Finish pending writes and release the storage backend
    ///
    /// Later preference changes still apply in memory but are not persisted.
    pub async fn shutdown(&self) {
        self.inner.enqueue(PersistCommand::Shutdown);
        let writer = self.inner.writer.lock().take();
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                tracing::warn!("Theme writer ended abnormally: {}", e);
            }
        }
        if let Some(listener) = self.inner.listener.lock().take() {
            listener.abort();
        }
    }
}

async fn load_preference(
    storage: &dyn PreferenceStorage,
    key: &str,
    timeout: Duration,
) -> ThemePreference {
    match tokio::time::timeout(timeout, storage.get(key)).await {
        Ok(Ok(Some(raw))) => match raw.parse() {
            Ok(preference) => preference,
            Err(e) => {
                tracing::warn!("Ignoring saved theme preference: {}", e);
                ThemePreference::System
            }
        },
        Ok(Ok(None)) => ThemePreference::System,
        Ok(Err(e)) => {
            tracing::warn!("Error loading theme preference: {}", e);
            ThemePreference::System
        }
        Err(_) => {
            tracing::warn!(?timeout, "Timed out loading theme preference");
            ThemePreference::System
        }
    }
}

async fn run_writer(
    storage: Arc<dyn PreferenceStorage>,
    key: String,
    mut commands: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            PersistCommand::Save(preference) => {
                match storage.set(&key, preference.as_str()).await {
                    Ok(()) => tracing::debug!(%preference, "theme preference saved"),
                    Err(e) => tracing::warn!("Error saving theme preference: {}", e),
                }
            }
            PersistCommand::Clear => {
                if let Err(e) = storage.remove(&key).await {
                    tracing::warn!("Error clearing theme preference: {}", e);
                }
            }
            PersistCommand::Flush(ack) => {
                let _ = ack.send(());
            }
            PersistCommand::Shutdown => break,
        }
    }
}

async fn run_listener(inner: Weak<ThemeInner>, mut scheme_rx: watch::Receiver<ColorScheme>) {
    while scheme_rx.changed().await.is_ok() {
        let os_scheme = *scheme_rx.borrow_and_update();
        match inner.upgrade() {
            Some(inner) => inner.apply_os_scheme(os_scheme),
            None => break,
        }
    }
}
