use configs::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::setup_test_db;
use crate::db::{connect_with_config, DATABASE_URL};

#[tokio::test]
async fn test_basic_query() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i32 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}

#[tokio::test]
async fn test_connect_with_pool_config() -> Result<()> {
    if setup_test_db().await.is_none() {
        return Ok(());
    }
    let cfg = DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 3,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    db.ping().await?;
    Ok(())
}
