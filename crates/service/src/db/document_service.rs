use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, document};
use crate::errors::ServiceError;

#[instrument(skip(db, input), fields(file_name = %input.file_name))]
pub async fn create_document(db: &DatabaseConnection, input: document::NewDocument) -> Result<document::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = document::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(document_id = created.id, "document_uploaded");
    Ok(created)
}

pub async fn list_documents(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<document::Model>, ServiceError> {
    let rows = document::Entity::find()
        .apply_if(owner, |q, o| q.filter(document::Column::UploadedBy.eq(o)))
        .order_by_desc(document::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_document(db: &DatabaseConnection, id: i32) -> Result<Option<document::Model>, ServiceError> {
    Ok(document::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_document(db: &DatabaseConnection, id: i32, changes: document::DocumentChanges) -> Result<document::Model, ServiceError> {
    let mut am: document::ActiveModel = document::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("document"))?
        .into();
    changes.apply(&mut am)?;
    Ok(am.update(db).await?)
}

pub async fn delete_document(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = document::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn get_missing_document_is_none() -> Result<(), anyhow::Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<document::Model>::new()])
            .into_connection();
        assert!(get_document(&db, 77).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn rejected_upload_is_not_logged() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create_document(&db, document::NewDocument {
            title: "Deed".into(),
            file_name: "deed.pdf".into(),
            ..Default::default()
        }).await.unwrap_err();
        assert!(err.is_validation());
        let sql = format!("{:?}", db.into_transaction_log());
        assert!(!sql.contains("activities"));
    }

    fn stored(id: i32) -> document::Model {
        let now = chrono::Utc::now().into();
        document::Model {
            id,
            title: "Deed".into(),
            description: None,
            file_name: "deed.pdf".into(),
            file_path: "docs/deed.pdf".into(),
            file_size: Some(1024),
            mime_type: Some("application/pdf".into()),
            document_type: Some("legal".into()),
            lead_id: None,
            contact_id: None,
            property_id: None,
            uploaded_by: Some("agent-4".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn upload_and_log_share_a_transaction() -> Result<(), anyhow::Error> {
        let a = stored(9).creation_activity();
        let logged = activity::Model {
            id: 1,
            title: a.title,
            description: a.description,
            activity_type: a.activity_type,
            entity_type: a.entity_type,
            entity_id: a.entity_id,
            user_id: a.user_id,
            created_at: chrono::Utc::now().into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(9)]])
            .append_query_results([vec![logged]])
            .into_connection();

        let created = create_document(&db, document::NewDocument {
            title: "Deed".into(),
            file_name: "deed.pdf".into(),
            file_path: "docs/deed.pdf".into(),
            uploaded_by: Some("agent-4".into()),
            ..Default::default()
        }).await?;
        assert_eq!(created.id, 9);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains(r#"INSERT INTO \"documents\""#));
        assert!(sql.contains(r#"INSERT INTO \"activities\""#));
        assert!(sql.contains("document_uploaded"));
        assert!(sql.contains("has been uploaded"));
        assert!(sql.contains("agent-4"));
        Ok(())
    }
}
