use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{errors::ModelError, user, validate};

pub const CONTACT_TYPES: &[&str] = &["client", "vendor", "partner", "other"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub address: Option<String>,
    pub contact_type: String,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AssignedUser,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AssignedUser => Entity::belongs_to(user::Entity)
                .from(Column::AssignedTo)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub contact_type: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("firstName", &self.first_name)?;
        validate::required("lastName", &self.last_name)?;
        validate::email("email", &self.email)?;
        validate::one_of("contactType", &self.contact_type, CONTACT_TYPES)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub job_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub address: Option<Option<String>>,
    pub contact_type: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub assigned_to: Option<Option<String>>,
}

impl ContactChanges {
    pub fn apply(self, am: &mut ActiveModel) -> Result<(), ModelError> {
        if let Some(v) = &self.first_name { validate::required("firstName", v)?; }
        if let Some(v) = &self.last_name { validate::required("lastName", v)?; }
        if let Some(v) = &self.email { validate::email("email", v)?; }
        if let Some(v) = &self.contact_type { validate::one_of("contactType", v, CONTACT_TYPES)?; }

        if let Some(v) = self.first_name { am.first_name = Set(v); }
        if let Some(v) = self.last_name { am.last_name = Set(v); }
        if let Some(v) = self.email { am.email = Set(v.trim().to_string()); }
        if let Some(v) = self.phone { am.phone = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.company { am.company = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.job_title { am.job_title = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.address { am.address = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.contact_type { am.contact_type = Set(v); }
        if let Some(v) = self.notes { am.notes = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.assigned_to { am.assigned_to = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewContact) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(input.email.trim().to_string()),
        phone: Set(validate::blank_to_none(input.phone)),
        company: Set(validate::blank_to_none(input.company)),
        job_title: Set(validate::blank_to_none(input.job_title)),
        address: Set(validate::blank_to_none(input.address)),
        contact_type: Set(input.contact_type),
        notes: Set(validate::blank_to_none(input.notes)),
        assigned_to: Set(input.assigned_to),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

impl Audited for Model {
    fn creation_activity(&self) -> NewActivity {
        NewActivity {
            title: "Contact added".into(),
            description: Some(format!("Contact {} {} has been added", self.first_name, self.last_name)),
            activity_type: "contact_created".into(),
            entity_type: Some("contact".into()),
            entity_id: Some(self.id),
            user_id: self.assigned_to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_type_must_be_known() {
        let c = NewContact {
            first_name: "Sam".into(),
            last_name: "Lee".into(),
            email: "sam@lee.io".into(),
            contact_type: "vendor".into(),
            ..Default::default()
        };
        assert!(c.validate().is_ok());
        assert!(NewContact { contact_type: "friend".into(), ..c }.validate().is_err());
    }

    #[test]
    fn blank_company_is_cleared() {
        let mut am = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        ContactChanges { company: Some(Some("   ".into())), ..Default::default() }
            .apply(&mut am)
            .unwrap();
        assert_eq!(am.company, Set(None));
    }

    #[test]
    fn creation_activity_text() {
        let now = Utc::now().into();
        let m = Model {
            id: 11,
            first_name: "Sam".into(),
            last_name: "Lee".into(),
            email: "sam@example.com".into(),
            phone: None,
            company: Some("Lee Roofing".into()),
            job_title: None,
            address: None,
            contact_type: "vendor".into(),
            notes: None,
            assigned_to: Some("u2".into()),
            created_at: now,
            updated_at: now,
        };
        let a = m.creation_activity();
        assert_eq!(a.title, "Contact added");
        assert_eq!(a.description.as_deref(), Some("Contact Sam Lee has been added"));
        assert_eq!(a.activity_type, "contact_created");
        assert_eq!(a.entity_type.as_deref(), Some("contact"));
        assert_eq!(a.entity_id, Some(11));
        assert_eq!(a.user_id.as_deref(), Some("u2"));
    }
}
