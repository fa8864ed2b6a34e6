use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;

/// Database connection and configuration tests
pub mod db_tests;

/// CRUD operations tests for the CRM entities
pub mod crud_tests;


// Migrations run once per test process, on a throwaway connection.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

async fn open() -> Option<DatabaseConnection> {
    let mut opts = ConnectOptions::new(crate::db::DATABASE_URL.as_str());
    opts.connect_timeout(Duration::from_secs(3))
        .acquire_timeout(Duration::from_secs(3))
        .sqlx_logging(false);
    match Database::connect(opts).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            None
        }
    }
}

/// Connects and migrates, or returns `None` when no database is available.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        println!("Skipping database tests (SKIP_DB_TESTS is set)");
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let Some(db) = open().await else { return false };
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {e}");
                    false
                }
            }
        })
        .await;
    if !migrated {
        return None;
    }
    open().await
}

pub(crate) async fn seed_user(db: &DatabaseConnection) -> anyhow::Result<crate::user::Model> {
    let id = format!("test-{}", uuid::Uuid::new_v4());
    let u = crate::user::upsert(
        db,
        crate::user::UpsertUser {
            id: id.clone(),
            email: Some(format!("{id}@example.com")),
            first_name: Some("Test".into()),
            last_name: Some("Agent".into()),
            profile_image_url: None,
        },
    )
    .await?;
    Ok(u)
}
