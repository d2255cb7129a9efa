use anyhow::{Context, Result};
use ebios_login::{create_login_screen, AppConfig};
use std::env;
use tracing::info;

/// Headless login against an e-Bios backend.
///
/// Reads `EBIOS_USERNAME`, `EBIOS_PASSWORD` and optionally `EBIOS_COMPANY`
/// (a composite `id,code` key; a single-company backend selects itself),
/// plus the configuration documented in `config.rs`.
#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    info!("Starting e-Bios login client v{}...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    let screen = create_login_screen(&config)?;
    screen.mount().await;

    let form = screen.form().await;
    for notice in [&form.amc_warning, &form.license_warning] {
        if !notice.is_empty() {
            println!("! {notice}");
        }
    }
    if !form.error_message.is_empty() {
        println!("! {}", form.error_message);
    }

    println!("Companies:");
    for company in &form.companies {
        println!("  {:<12} {}", company.composite_key, company.display_name);
    }

    if let Ok(key) = env::var("EBIOS_COMPANY") {
        screen.select_company(&key).await;
    }
    screen
        .set_username(env::var("EBIOS_USERNAME").context("EBIOS_USERNAME is not set")?)
        .await;
    screen
        .set_password(env::var("EBIOS_PASSWORD").context("EBIOS_PASSWORD is not set")?)
        .await;

    let outcome = screen.submit().await;
    let metrics = screen.services().metrics().render();
    if !metrics.is_empty() {
        println!("{metrics}");
    }

    match outcome {
        Ok(session) => {
            println!(
                "Logged in as {} (user {}, admin: {}) at {} [{}]",
                session.user_name,
                session.user_id,
                session.is_admin,
                session.company_name,
                session.company_code
            );
            println!("Token expires at {} ms since epoch", session.token_expiry_epoch_millis);
            Ok(())
        }
        Err(err) => {
            println!("Login failed: {err}");
            std::process::exit(1);
        }
    }
}
