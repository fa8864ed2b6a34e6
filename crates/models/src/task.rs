use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{contact, errors::ModelError, lead, property, user, validate};

pub const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
pub const DEFAULT_PRIORITY: &str = "medium";
pub const STATUSES: &[&str] = &["pending", "in_progress", "completed", "cancelled"];
pub const DEFAULT_STATUS: &str = "pending";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub priority: String,
    pub status: String,
    pub category: Option<String>,
    pub lead_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub property_id: Option<i32>,
    pub assigned_to: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Lead,
    Contact,
    Property,
    AssignedUser,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Lead => Entity::belongs_to(lead::Entity).from(Column::LeadId).to(lead::Column::Id).into(),
            Relation::Contact => Entity::belongs_to(contact::Entity).from(Column::ContactId).to(contact::Column::Id).into(),
            Relation::Property => Entity::belongs_to(property::Entity).from(Column::PropertyId).to(property::Column::Id).into(),
            Relation::AssignedUser => Entity::belongs_to(user::Entity).from(Column::AssignedTo).to(user::Column::Id).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub lead_id: Option<i32>,
    #[serde(default)]
    pub contact_id: Option<i32>,
    #[serde(default)]
    pub property_id: Option<i32>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        if let Some(p) = self.priority.as_deref() { validate::one_of("priority", p, PRIORITIES)?; }
        if let Some(s) = self.status.as_deref() { validate::one_of("status", s, STATUSES)?; }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub due_date: Option<Option<Date>>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub lead_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub contact_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub property_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub assigned_to: Option<Option<String>>,
}

impl TaskChanges {
    pub fn apply(self, am: &mut ActiveModel) -> Result<(), ModelError> {
        if let Some(v) = &self.title { validate::required("title", v)?; }
        if let Some(v) = &self.priority { validate::one_of("priority", v, PRIORITIES)?; }
        if let Some(v) = &self.status { validate::one_of("status", v, STATUSES)?; }

        if let Some(v) = self.title { am.title = Set(v); }
        if let Some(v) = self.description { am.description = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.due_date { am.due_date = Set(v); }
        if let Some(v) = self.priority { am.priority = Set(v); }
        if let Some(v) = self.status { am.status = Set(v); }
        if let Some(v) = self.category { am.category = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.lead_id { am.lead_id = Set(v); }
        if let Some(v) = self.contact_id { am.contact_id = Set(v); }
        if let Some(v) = self.property_id { am.property_id = Set(v); }
        if let Some(v) = self.assigned_to { am.assigned_to = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewTask) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(input.title),
        description: Set(validate::blank_to_none(input.description)),
        due_date: Set(input.due_date),
        priority: Set(input.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string())),
        status: Set(input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
        category: Set(validate::blank_to_none(input.category)),
        lead_id: Set(input.lead_id),
        contact_id: Set(input.contact_id),
        property_id: Set(input.property_id),
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
            title: "Task created".into(),
            description: Some(format!("Task \"{}\" has been created", self.title)),
            activity_type: "task_created".into(),
            entity_type: Some("task".into()),
            entity_id: Some(self.id),
            user_id: self.assigned_to.clone(),
        }
    }
}
