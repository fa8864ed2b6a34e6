//! OpenAPI document served at `/api-docs/openapi.json`.
//!
//! The request schemas below mirror the JSON the handlers accept; the entity
//! payload types themselves live in `models` and carry no utoipa derives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeRequest {
    /// `developer`, `agency` or `individual`
    pub user_type: String,
    pub company_name: Option<String>,
    pub company_license: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub source: Option<String>,
    /// `new`, `contacted`, `qualified`, `unqualified` or `converted`
    pub status: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDoc {
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// `apartment`, `house`, `condo` or `commercial`
    pub property_type: String,
    pub status: Option<String>,
    /// Decimal string, two fractional digits.
    #[schema(example = "450000.00")]
    pub price: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_footage: Option<i32>,
    pub lot_size: Option<String>,
    pub year_built: Option<i32>,
    pub image_urls: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub listing_agent: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub address: Option<String>,
    /// `client`, `vendor`, `partner` or `other`
    pub contact_type: String,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDoc {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    /// `showing`, `meeting`, `call` or `inspection`
    pub appointment_type: String,
    pub status: Option<String>,
    pub lead_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub property_id: Option<i32>,
    pub assigned_to: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// `low`, `medium`, `high` or `urgent`
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub lead_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub property_id: Option<i32>,
    pub assigned_to: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDoc {
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
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDoc {
    pub title: String,
    pub description: Option<String>,
    pub activity_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub user_id: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::auth::set_user_type,
        crate::routes::leads::list,
        crate::routes::leads::create,
        crate::routes::leads::get,
        crate::routes::leads::update,
        crate::routes::leads::delete,
        crate::routes::properties::list,
        crate::routes::properties::create,
        crate::routes::properties::get,
        crate::routes::properties::update,
        crate::routes::properties::delete,
        crate::routes::contacts::list,
        crate::routes::contacts::create,
        crate::routes::contacts::get,
        crate::routes::contacts::update,
        crate::routes::contacts::delete,
        crate::routes::appointments::list,
        crate::routes::appointments::upcoming,
        crate::routes::appointments::create,
        crate::routes::appointments::get,
        crate::routes::appointments::update,
        crate::routes::appointments::delete,
        crate::routes::tasks::list,
        crate::routes::tasks::create,
        crate::routes::tasks::get,
        crate::routes::tasks::update,
        crate::routes::tasks::delete,
        crate::routes::documents::list,
        crate::routes::documents::create,
        crate::routes::documents::get,
        crate::routes::documents::update,
        crate::routes::documents::delete,
        crate::routes::activities::list,
        crate::routes::activities::recent,
        crate::routes::activities::record,
        crate::routes::dashboard::stats,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            UserTypeRequest,
            LeadDoc,
            PropertyDoc,
            ContactDoc,
            AppointmentDoc,
            TaskDoc,
            DocumentDoc,
            ActivityDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "leads"),
        (name = "properties"),
        (name = "contacts"),
        (name = "appointments"),
        (name = "tasks"),
        (name = "documents"),
        (name = "activities"),
        (name = "dashboard")
    )
)]
pub struct ApiDoc;
