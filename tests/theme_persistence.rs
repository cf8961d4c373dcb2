//! Theme persistence integration tests
//!
//! End-to-end tests of the theme preference across sessions, storage
//! failures and OS appearance changes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use donate_some::app_platform::{ColorScheme, ManualAppearance};
use donate_some::app_ui::{ColorRole, ThemePreference};
use donate_some::storage::{
    open_preference_storage, KvConfig, KvError, KvStore, PreferenceStorage, Result,
};
use donate_some::{AppConfig, AppContext};
use tempfile::TempDir;

const THEME_KEY: &str = "device:themeMode";

/// Storage whose every operation fails
struct BrokenStorage;

#[async_trait]
impl PreferenceStorage for BrokenStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(KvError::Unavailable("disk removed".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(KvError::Unavailable("disk removed".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<bool> {
        Err(KvError::Unavailable("disk removed".to_string()))
    }
}

fn kv_config(dir: &TempDir) -> KvConfig {
    let path = dir.path().join("prefs.db");
    KvConfig::new(path.to_string_lossy().into_owned()).flush_every_ms(None)
}

/// Test that a pinned preference is restored by the next session
#[tokio::test]
async fn test_preference_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    // Session 1: pin dark under a light OS
    {
        let appearance = Arc::new(ManualAppearance::new(ColorScheme::Light));
        let ctx = AppContext::start(AppConfig::default().kv(kv_config(&temp_dir)), appearance)
            .await
            .unwrap();

        assert_eq!(ctx.theme().preference(), ThemePreference::System);
        ctx.theme().set_preference(ThemePreference::Dark);
        assert!(ctx.theme().resolved_theme().is_dark);

        ctx.shutdown().await;
    }

    // Session 2: the saved preference wins over the light OS
    {
        let appearance = Arc::new(ManualAppearance::new(ColorScheme::Light));
        let ctx = AppContext::start(AppConfig::default().kv(kv_config(&temp_dir)), appearance)
            .await
            .unwrap();

        assert_eq!(ctx.theme().preference(), ThemePreference::Dark);
        let theme = ctx.theme().resolved_theme();
        assert!(theme.is_dark);
        assert_eq!(theme.color(ColorRole::Background), "#000000");

        ctx.shutdown().await;
    }
}

/// Test that sessions sharing one store see each other's saved value
#[tokio::test]
async fn test_shared_store_between_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let kv = Arc::new(KvStore::new(kv_config(&temp_dir)).unwrap());

    let first = AppContext::with_storage(
        AppConfig::default(),
        kv.clone(),
        Arc::new(ManualAppearance::new(ColorScheme::Dark)),
    )
    .await
    .unwrap();

    // Toggling from System under a dark OS pins light
    first.theme().toggle();
    assert_eq!(first.theme().preference(), ThemePreference::Light);
    first.theme().flush().await;

    assert_eq!(kv.get_string(THEME_KEY).unwrap(), Some("light".to_string()));

    let second = AppContext::with_storage(
        AppConfig::default(),
        kv.clone(),
        Arc::new(ManualAppearance::new(ColorScheme::Dark)),
    )
    .await
    .unwrap();
    assert_eq!(second.theme().preference(), ThemePreference::Light);
    assert!(!second.theme().resolved_theme().is_dark);

    first.shutdown().await;
    second.shutdown().await;
}

/// Test that clearing the preference removes the saved value
#[tokio::test]
async fn test_clear_saved_preference() {
    let temp_dir = TempDir::new().unwrap();
    let kv = Arc::new(KvStore::new(kv_config(&temp_dir)).unwrap());
    kv.set_string(THEME_KEY, "dark").unwrap();

    let ctx = AppContext::with_storage(
        AppConfig::default(),
        kv.clone(),
        Arc::new(ManualAppearance::new(ColorScheme::Light)),
    )
    .await
    .unwrap();
    assert_eq!(ctx.theme().preference(), ThemePreference::Dark);

    ctx.theme().clear_saved_preference();
    assert_eq!(ctx.theme().preference(), ThemePreference::System);
    assert!(!ctx.theme().resolved_theme().is_dark);

    ctx.shutdown().await;
    assert_eq!(kv.get_string(THEME_KEY).unwrap(), None);
}

/// Test that a corrupt saved value falls back to System
#[tokio::test]
async fn test_corrupt_saved_value() {
    let temp_dir = TempDir::new().unwrap();
    let kv = Arc::new(KvStore::new(kv_config(&temp_dir)).unwrap());
    kv.set_string(THEME_KEY, "Dark").unwrap();

    let ctx = AppContext::with_storage(
        AppConfig::default(),
        kv,
        Arc::new(ManualAppearance::new(ColorScheme::Dark)),
    )
    .await
    .unwrap();

    assert_eq!(ctx.theme().preference(), ThemePreference::System);
    assert!(ctx.theme().resolved_theme().is_dark);
    ctx.shutdown().await;
}

/// Test that failing storage starts in System mode and still applies changes
#[tokio::test]
async fn test_failing_storage() {
    let ctx = AppContext::with_storage(
        AppConfig::default(),
        Arc::new(BrokenStorage),
        Arc::new(ManualAppearance::new(ColorScheme::Dark)),
    )
    .await
    .unwrap();

    assert_eq!(ctx.theme().preference(), ThemePreference::System);
    assert!(ctx.theme().resolved_theme().is_dark);

    ctx.theme().set_preference(ThemePreference::Light);
    ctx.theme().flush().await;
    assert_eq!(ctx.theme().preference(), ThemePreference::Light);
    assert!(!ctx.theme().resolved_theme().is_dark);

    ctx.shutdown().await;
}

/// Test that an unopenable database degrades to session-only storage
#[tokio::test]
async fn test_unopenable_database_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let path = blocker.join("prefs.db");

    let storage = open_preference_storage(KvConfig::new(path.to_string_lossy().into_owned()));
    assert!(!storage.is_durable());

    let config = AppConfig::default().kv(KvConfig::new(path.to_string_lossy().into_owned()));
    let ctx = AppContext::start(config, Arc::new(ManualAppearance::new(ColorScheme::Light)))
        .await
        .unwrap();

    ctx.theme().set_preference(ThemePreference::Dark);
    ctx.theme().flush().await;
    assert!(ctx.theme().resolved_theme().is_dark);

    ctx.shutdown().await;
}

/// Test that OS appearance changes reach subscribers only in System mode
#[tokio::test]
async fn test_os_changes_follow_system_mode() {
    let appearance = Arc::new(ManualAppearance::new(ColorScheme::Light));
    let ctx = AppContext::start(AppConfig::default().in_memory(), appearance.clone())
        .await
        .unwrap();

    let mut rx = ctx.theme().subscribe();
    assert!(!rx.borrow_and_update().is_dark);

    appearance.set_scheme(ColorScheme::Dark);
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert!(rx.borrow_and_update().is_dark);
    assert_eq!(ctx.theme().os_scheme(), ColorScheme::Dark);

    // Pinned light ignores the OS
    ctx.theme().set_preference(ThemePreference::Light);
    appearance.set_scheme(ColorScheme::Dark);
    appearance.set_scheme(ColorScheme::Unknown);
    tokio::time::timeout(Duration::from_secs(1), async {
        while ctx.theme().os_scheme() != ColorScheme::Unknown {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert!(!ctx.theme().resolved_theme().is_dark);

    // Unknown resolves to light when following the system
    ctx.theme().set_preference(ThemePreference::System);
    assert!(!ctx.theme().resolved_theme().is_dark);

    ctx.shutdown().await;
}
