use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{errors::ModelError, user, validate};

pub const STATUSES: &[&str] = &["new", "contacted", "qualified", "unqualified", "converted"];
pub const DEFAULT_STATUS: &str = "new";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leads")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: String,
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
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl NewLead {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("firstName", &self.first_name)?;
        validate::required("lastName", &self.last_name)?;
        validate::email("email", &self.email)?;
        if let Some(s) = self.status.as_deref() {
            validate::one_of("status", s, STATUSES)?;
        }
        Ok(())
    }
}

/// Partial update; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub source: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub assigned_to: Option<Option<String>>,
}

impl LeadChanges {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(v) = &self.first_name { validate::required("firstName", v)?; }
        if let Some(v) = &self.last_name { validate::required("lastName", v)?; }
        if let Some(v) = &self.email { validate::email("email", v)?; }
        if let Some(v) = &self.status { validate::one_of("status", v, STATUSES)?; }
        Ok(())
    }

    pub fn apply(self, am: &mut ActiveModel) -> Result<(), ModelError> {
        self.validate()?;
        if let Some(v) = self.first_name { am.first_name = Set(v); }
        if let Some(v) = self.last_name { am.last_name = Set(v); }
        if let Some(v) = self.email { am.email = Set(v.trim().to_string()); }
        if let Some(v) = self.phone { am.phone = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.source { am.source = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.status { am.status = Set(v); }
        if let Some(v) = self.notes { am.notes = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.assigned_to { am.assigned_to = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewLead) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(input.email.trim().to_string()),
        phone: Set(validate::blank_to_none(input.phone)),
        source: Set(validate::blank_to_none(input.source)),
        status: Set(input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
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
            title: "New lead added".into(),
            description: Some(format!("Lead {} {} has been added to the system", self.first_name, self.last_name)),
            activity_type: "lead_created".into(),
            entity_type: Some("lead".into()),
            entity_id: Some(self.id),
            user_id: self.assigned_to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewLead {
        NewLead {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn new_lead_validation() {
        assert!(sample().validate().is_ok());
        assert!(NewLead { email: "nope".into(), ..sample() }.validate().is_err());
        assert!(NewLead { first_name: "".into(), ..sample() }.validate().is_err());
        assert!(NewLead { status: Some("won".into()), ..sample() }.validate().is_err());
        assert!(NewLead { status: Some("qualified".into()), ..sample() }.validate().is_ok());
    }

    #[test]
    fn changes_distinguish_null_from_absent() {
        let c: LeadChanges = serde_json::from_str(r#"{"phone":null,"status":"contacted"}"#).unwrap();
        assert_eq!(c.phone, Some(None));
        assert_eq!(c.notes, None);
        assert_eq!(c.status.as_deref(), Some("contacted"));
    }

    #[test]
    fn apply_sets_only_present_fields() {
        let mut am = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        LeadChanges { status: Some("qualified".into()), phone: Some(None), ..Default::default() }
            .apply(&mut am)
            .unwrap();
        assert_eq!(am.status, Set("qualified".to_string()));
        assert_eq!(am.phone, Set(None));
        assert!(am.first_name.is_not_set());
        assert!(am.updated_at.is_set());
    }

    #[test]
    fn apply_rejects_unknown_status() {
        let mut am = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        let err = LeadChanges { status: Some("lost".into()), ..Default::default() }.apply(&mut am);
        assert!(err.is_err());
    }

    #[test]
    fn creation_activity_text() {
        let now = Utc::now().into();
        let m = Model {
            id: 7,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: None,
            source: None,
            status: "new".into(),
            notes: None,
            assigned_to: Some("u1".into()),
            created_at: now,
            updated_at: now,
        };
        let a = m.creation_activity();
        assert_eq!(a.title, "New lead added");
        assert_eq!(a.description.as_deref(), Some("Lead Jane Doe has been added to the system"));
        assert_eq!(a.activity_type, "lead_created");
        assert_eq!(a.entity_id, Some(7));
        assert_eq!(a.user_id.as_deref(), Some("u1"));
    }
}
