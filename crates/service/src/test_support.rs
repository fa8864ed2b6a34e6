#![cfg(test)]
use std::time::Duration;

use tokio::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

async fn open(max_connections: u32) -> Option<DatabaseConnection> {
    let mut opts = ConnectOptions::new(models::db::DATABASE_URL.as_str());
    opts.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(3))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    match Database::connect(opts).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            None
        }
    }
}

/// A migrated connection, or `None` when `SKIP_DB_TESTS` is set or no
/// database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }

    // Run migrations exactly once, with a throwaway connection
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let Some(db) = open(2).await else { return false };
            let ok = migration::Migrator::up(&db, None).await.map_err(|e| eprintln!("skip: migrate up failed: {e}")).is_ok();
            drop(db);
            ok
        })
        .await;
    if !migrated { return None; }

    // Return a fresh connection for the current test's runtime
    open(20).await
}
