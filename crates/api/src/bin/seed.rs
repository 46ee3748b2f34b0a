//! Idempotent database seeder.
//!
//! Creates the initial admin account so a fresh deployment can log in.
//! Requires the database connection variables plus `ADMIN_SEED_PASSWORD`;
//! refuses to run without them so no deployment ships a default password.
//!
//! ```text
//! DB_HOST=localhost DB_PORT=5432 DB_USER=cradle DB_PASSWORD=... \
//! DB_NAME=cradle ADMIN_SEED_PASSWORD=... cargo run --bin seed
//! ```

use cradle_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use cradle_core::roles::ROLE_ADMIN;
use cradle_db::models::user::CreateUser;
use cradle_db::repositories::UserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@cradle.local";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = build_database_url();

    let admin_password =
        std::env::var("ADMIN_SEED_PASSWORD").expect("ADMIN_SEED_PASSWORD must be set");
    validate_password_strength(&admin_password, MIN_PASSWORD_LENGTH)
        .expect("ADMIN_SEED_PASSWORD is too weak");

    let pool = cradle_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    cradle_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied");

    // Idempotency: re-running against a seeded database is a no-op.
    if UserRepo::find_by_username(&pool, ADMIN_USERNAME)
        .await
        .expect("Failed to query users")
        .is_some()
    {
        tracing::info!(username = ADMIN_USERNAME, "Admin user already exists, nothing to do");
        return;
    }

    let password_hash = hash_password(&admin_password).expect("Failed to hash admin password");

    let admin = UserRepo::create(
        &pool,
        &CreateUser {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .expect("Failed to create admin user");

    tracing::info!(id = admin.id, username = %admin.username, "Admin user created");
}

/// Assemble the connection URL from the discrete `DB_*` variables. Every
/// variable is required; a partial configuration fails loudly.
fn build_database_url() -> String {
    let host = require_env("DB_HOST");
    let port = require_env("DB_PORT");
    let user = require_env("DB_USER");
    let password = require_env("DB_PASSWORD");
    let name = require_env("DB_NAME");
    format!("postgres://{user}:{password}@{host}:{port}/{name}")
}

fn require_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}
