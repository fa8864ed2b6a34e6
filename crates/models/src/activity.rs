//! Append-only activity log.
//!
//! Rows are written once, in the same transaction as the record they
//! describe, and never updated or deleted afterwards.

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, user, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub activity_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub user_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub activity_type: String,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<i32>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NewActivity {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::required("activityType", &self.activity_type)?;
        Ok(())
    }
}

/// Records that log an activity entry when they are created.
pub trait Audited {
    fn creation_activity(&self) -> NewActivity;
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewActivity) -> Result<Model, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        activity_type: Set(input.activity_type),
        entity_type: Set(input.entity_type),
        entity_id: Set(input.entity_id),
        user_id: Set(input.user_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
