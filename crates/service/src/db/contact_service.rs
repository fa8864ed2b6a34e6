use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, contact};
use crate::errors::ServiceError;

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_contact(db: &DatabaseConnection, input: contact::NewContact) -> Result<contact::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = contact::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(contact_id = created.id, "contact_created");
    Ok(created)
}

pub async fn list_contacts(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<contact::Model>, ServiceError> {
    let rows = contact::Entity::find()
        .apply_if(owner, |q, o| q.filter(contact::Column::AssignedTo.eq(o)))
        .order_by_desc(contact::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_contact(db: &DatabaseConnection, id: i32) -> Result<Option<contact::Model>, ServiceError> {
    Ok(contact::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_contact(db: &DatabaseConnection, id: i32, changes: contact::ContactChanges) -> Result<contact::Model, ServiceError> {
    let mut am: contact::ActiveModel = contact::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("contact"))?
        .into();
    changes.apply(&mut am)?;
    Ok(am.update(db).await?)
}

pub async fn delete_contact(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = contact::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn stored(id: i32, owner: &str) -> contact::Model {
        let now = Utc::now().into();
        contact::Model {
            id,
            first_name: "Priya".into(),
            last_name: "Shah".into(),
            email: "priya@shah.dev".into(),
            phone: None,
            company: Some("Shah Builders".into()),
            job_title: None,
            address: None,
            contact_type: "vendor".into(),
            notes: None,
            assigned_to: Some(owner.into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_returns_rows_in_query_order() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(3, "a"), stored(2, "a")]])
            .into_connection();
        let rows = list_contacts(&db, Some("a")).await?;
        assert_eq!(rows.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 2]);
        let sql = format!("{:?}", db.into_transaction_log());
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("DESC"));
        Ok(())
    }

    #[tokio::test]
    async fn update_applies_patch_to_loaded_row() -> Result<(), anyhow::Error> {
        let mut patched = stored(9, "a");
        patched.company = None;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(9, "a")]])
            .append_query_results([vec![patched]])
            .into_connection();
        let out = update_contact(&db, 9, contact::ContactChanges {
            company: Some(None),
            ..Default::default()
        }).await?;
        assert_eq!(out.company, None);
        Ok(())
    }
}
