//! DonateSome demo shell
//!
//! Starts a session against the sled preference database and prints the
//! resolved theme and home feed. `DONATE_SOME_APPEARANCE` (`light`/`dark`)
//! stands in for the OS appearance and `DONATE_SOME_THEME`
//! (`light`/`dark`/`system`) changes the saved preference.

use std::sync::Arc;

use anyhow::Context;
use donate_some::app_platform::{ColorScheme, ManualAppearance};
use donate_some::app_state::AccountType;
use donate_some::app_ui::{ColorRole, ThemePreference};
use donate_some::storage::KvConfig;
use donate_some::{AppConfig, AppContext};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut kv = KvConfig::default();
    if let Ok(path) = std::env::var("DONATE_SOME_KV_PATH") {
        kv = KvConfig::new(path);
    }

    let os_scheme =
        ColorScheme::from_platform_name(std::env::var("DONATE_SOME_APPEARANCE").ok().as_deref());
    let appearance = Arc::new(ManualAppearance::new(os_scheme));

    let config = AppConfig::default()
        .kv(kv)
        .viewer_name("Alex Thompson")
        .account_type(AccountType::Want);
    let ctx = AppContext::start(config, appearance)
        .await
        .context("failed to start session")?;

    if let Ok(raw) = std::env::var("DONATE_SOME_THEME") {
        let preference: ThemePreference = raw.parse().context("invalid DONATE_SOME_THEME")?;
        ctx.theme().set_preference(preference);
    }

    let theme = ctx.theme().resolved_theme();
    println!(
        "Theme: {} ({}, OS {})",
        ctx.theme().preference().label(),
        if theme.is_dark { "dark" } else { "light" },
        ctx.theme().os_scheme()
    );
    for role in [ColorRole::Background, ColorRole::Text, ColorRole::Primary] {
        println!("  {:<12} {}", role.name(), theme.color(role));
    }

    let snapshot = ctx.follows().snapshot();
    println!(
        "\n{} following {} providers",
        snapshot.account_type.label(),
        snapshot.following.len()
    );

    let feed = ctx.home_feed().await;
    match feed.empty_message {
        Some(message) => println!("{message}"),
        None => {
            for post in &feed.posts {
                println!(
                    "  [{}] {}: {} ({})",
                    post.time_ago, post.author_display_name, post.content, post.location
                );
            }
        }
    }

    let inbox = ctx.notifications().await;
    println!("\n{} unread notifications", inbox.unread_count());

    ctx.shutdown().await;
    Ok(())
}
