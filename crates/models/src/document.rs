//! Document metadata. File bytes live outside the database; only the
//! path and descriptive fields are stored here.

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{contact, errors::ModelError, lead, property, user, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i32>,
    pub mime_type: Option<String>,
    pub document_type: Option<String>,
    pub lead_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub property_id: Option<i32>,
    pub uploaded_by: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Lead,
    Contact,
    Property,
    Uploader,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Lead => Entity::belongs_to(lead::Entity).from(Column::LeadId).to(lead::Column::Id).into(),
            Relation::Contact => Entity::belongs_to(contact::Entity).from(Column::ContactId).to(contact::Column::Id).into(),
            Relation::Property => Entity::belongs_to(property::Entity).from(Column::PropertyId).to(property::Column::Id).into(),
            Relation::Uploader => Entity::belongs_to(user::Entity).from(Column::UploadedBy).to(user::Column::Id).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Uploader.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<i32>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub lead_id: Option<i32>,
    #[serde(default)]
    pub contact_id: Option<i32>,
    #[serde(default)]
    pub property_id: Option<i32>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

impl NewDocument {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::required("fileName", &self.file_name)?;
        validate::required("filePath", &self.file_path)?;
        validate::non_negative("fileSize", self.file_size)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChanges {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub file_size: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub mime_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub document_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub lead_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub contact_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub property_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub uploaded_by: Option<Option<String>>,
}

impl DocumentChanges {
    pub fn apply(self, am: &mut ActiveModel) -> Result<(), ModelError> {
        if let Some(v) = &self.title { validate::required("title", v)?; }
        if let Some(v) = &self.file_name { validate::required("fileName", v)?; }
        if let Some(v) = &self.file_path { validate::required("filePath", v)?; }
        validate::non_negative("fileSize", self.file_size.flatten())?;

        if let Some(v) = self.title { am.title = Set(v); }
        if let Some(v) = self.description { am.description = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.file_name { am.file_name = Set(v); }
        if let Some(v) = self.file_path { am.file_path = Set(v); }
        if let Some(v) = self.file_size { am.file_size = Set(v); }
        if let Some(v) = self.mime_type { am.mime_type = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.document_type { am.document_type = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.lead_id { am.lead_id = Set(v); }
        if let Some(v) = self.contact_id { am.contact_id = Set(v); }
        if let Some(v) = self.property_id { am.property_id = Set(v); }
        if let Some(v) = self.uploaded_by { am.uploaded_by = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewDocument) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(input.title),
        description: Set(validate::blank_to_none(input.description)),
        file_name: Set(input.file_name),
        file_path: Set(input.file_path),
        file_size: Set(input.file_size),
        mime_type: Set(validate::blank_to_none(input.mime_type)),
        document_type: Set(validate::blank_to_none(input.document_type)),
        lead_id: Set(input.lead_id),
        contact_id: Set(input.contact_id),
        property_id: Set(input.property_id),
        uploaded_by: Set(input.uploaded_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

impl Audited for Model {
    fn creation_activity(&self) -> NewActivity {
        NewActivity {
            title: "Document uploaded".into(),
            description: Some(format!("Document \"{}\" has been uploaded", self.title)),
            activity_type: "document_uploaded".into(),
            entity_type: Some("document".into()),
            entity_id: Some(self.id),
            user_id: self.uploaded_by.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_fields_required() {
        let d = NewDocument {
            title: "Purchase agreement".into(),
            file_name: "agreement.pdf".into(),
            file_path: "/uploads/agreement.pdf".into(),
            file_size: Some(2048),
            ..Default::default()
        };
        assert!(d.validate().is_ok());
        assert!(NewDocument { file_path: "".into(), ..d.clone() }.validate().is_err());
        assert!(NewDocument { file_size: Some(-1), ..d }.validate().is_err());
    }

    #[test]
    fn creation_activity_text() {
        let now = Utc::now().into();
        let m = Model {
            id: 21,
            title: "Purchase agreement".into(),
            description: None,
            file_name: "agreement.pdf".into(),
            file_path: "docs/agreement.pdf".into(),
            file_size: Some(2048),
            mime_type: Some("application/pdf".into()),
            document_type: None,
            lead_id: None,
            contact_id: None,
            property_id: Some(3),
            uploaded_by: Some("u4".into()),
            created_at: now,
            updated_at: now,
        };
        let a = m.creation_activity();
        assert_eq!(a.title, "Document uploaded");
        assert_eq!(a.description.as_deref(), Some("Document \"Purchase agreement\" has been uploaded"));
        assert_eq!(a.activity_type, "document_uploaded");
        assert_eq!(a.entity_type.as_deref(), Some("document"));
        assert_eq!(a.entity_id, Some(21));
        assert_eq!(a.user_id.as_deref(), Some("u4"));
    }
}
