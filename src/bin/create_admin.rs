//! Bootstrap an admin account: `ADMIN_EMAIL=... ADMIN_PASSWORD=... cargo run --bin create_admin`

use anyhow::Context;
use sqlx::PgPool;

use seedshop::auth::handlers::is_valid_email;
use seedshop::auth::password::hash_password;
use seedshop::auth::repo::{Role, User};
use seedshop::state::AppState;

/// Creates the admin when the email is free; `None` means the account
/// already existed and nothing was touched. Idempotent by design: a second
/// run is a success no-op.
async fn ensure_admin(db: &PgPool, email: &str, password: &str) -> anyhow::Result<Option<User>> {
    if let Some(existing) = User::find_by_email(db, email).await? {
        tracing::info!(user_id = %existing.id, email = %existing.email, role = ?existing.role, "user already exists, nothing to do");
        return Ok(None);
    }
    let hash = hash_password(password)?;
    let user = User::create(db, email, &hash, Role::Admin).await?;
    Ok(Some(user))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "seedshop=info".to_string()),
        )
        .init();

    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL is required")?;
    let email = email.trim().to_string();
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is required")?;

    anyhow::ensure!(is_valid_email(&email), "ADMIN_EMAIL is not a valid email");
    anyhow::ensure!(
        password.len() >= 8,
        "ADMIN_PASSWORD must be at least 8 characters"
    );

    let state = AppState::init().await?;
    sqlx::migrate!("./migrations").run(&state.db).await?;

    if let Some(user) = ensure_admin(&state.db, &email, &password).await? {
        tracing::info!(user_id = %user.id, email = %user.email, "admin user created");
    }
    Ok(())
}
