use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validate};

pub const USER_TYPES: &[&str] = &["developer", "agency", "individual"];
pub const DEFAULT_USER_TYPE: &str = "individual";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub user_type: String,
    pub company_name: Option<String>,
    pub company_license: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Profile as reported by the identity layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Account classification chosen after first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeChange {
    pub user_type: String,
    pub company_name: Option<String>,
    pub company_license: Option<String>,
}

impl UserTypeChange {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::one_of("userType", &self.user_type, USER_TYPES)
    }

    /// Company fields only apply to developers and agencies.
    pub fn normalized(self) -> Self {
        if self.user_type == "individual" {
            return Self { user_type: self.user_type, company_name: None, company_license: None };
        }
        Self {
            user_type: self.user_type,
            company_name: validate::blank_to_none(self.company_name),
            company_license: validate::blank_to_none(self.company_license),
        }
    }
}

/// Insert the user, or refresh the profile fields when the id already exists.
pub async fn upsert<C: ConnectionTrait>(db: &C, input: UpsertUser) -> Result<Model, ModelError> {
    validate::required("id", &input.id)?;
    if let Some(e) = input.email.as_deref() { validate::email("email", e)?; }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        profile_image_url: Set(input.profile_image_url),
        user_type: Set(DEFAULT_USER_TYPE.to_string()),
        company_name: Set(None),
        company_license: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let on_conflict = OnConflict::column(Column::Id)
        .update_columns([
            Column::Email,
            Column::FirstName,
            Column::LastName,
            Column::ProfileImageUrl,
            Column::UpdatedAt,
        ])
        .to_owned();
    let saved = Entity::insert(am)
        .on_conflict(on_conflict)
        .exec_with_returning(db)
        .await?;
    Ok(saved)
}

pub fn display_name(m: &Model) -> String {
    match (m.first_name.as_deref(), m.last_name.as_deref()) {
        (Some(f), Some(l)) => format!("{f} {l}"),
        (Some(f), None) => f.to_string(),
        (None, Some(l)) => l.to_string(),
        (None, None) => m.email.clone().unwrap_or_else(|| m.id.clone()),
    }
}
