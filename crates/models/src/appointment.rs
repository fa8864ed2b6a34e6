//! Calendar appointments, optionally linked to a lead, contact or property.

use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::activity::{Audited, NewActivity};
use crate::{contact, errors::ModelError, lead, property, user, validate};

pub const APPOINTMENT_TYPES: &[&str] = &["showing", "meeting", "call", "inspection"];
pub const STATUSES: &[&str] = &["scheduled", "confirmed", "completed", "cancelled"];
pub const DEFAULT_STATUS: &str = "scheduled";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTimeWithTimeZone,
    pub end_time: DateTimeWithTimeZone,
    pub location: Option<String>,
    pub appointment_type: String,
    pub status: String,
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
            Relation::Lead => Entity::belongs_to(lead::Entity)
                .from(Column::LeadId)
                .to(lead::Column::Id)
                .into(),
            Relation::Contact => Entity::belongs_to(contact::Entity)
                .from(Column::ContactId)
                .to(contact::Column::Id)
                .into(),
            Relation::Property => Entity::belongs_to(property::Entity)
                .from(Column::PropertyId)
                .to(property::Column::Id)
                .into(),
            Relation::AssignedUser => Entity::belongs_to(user::Entity)
                .from(Column::AssignedTo)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<lead::Entity> for Entity {
    fn to() -> RelationDef { Relation::Lead.def() }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contact.def() }
}

impl Related<property::Entity> for Entity {
    fn to() -> RelationDef { Relation::Property.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: DateTimeWithTimeZone,
    pub end_time: DateTimeWithTimeZone,
    #[serde(default)]
    pub location: Option<String>,
    pub appointment_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lead_id: Option<i32>,
    #[serde(default)]
    pub contact_id: Option<i32>,
    #[serde(default)]
    pub property_id: Option<i32>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

fn check_window(start: &DateTimeWithTimeZone, end: &DateTimeWithTimeZone) -> Result<(), ModelError> {
    if end < start {
        return Err(ModelError::invalid("endTime must not be before startTime"));
    }
    Ok(())
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::one_of("appointmentType", &self.appointment_type, APPOINTMENT_TYPES)?;
        if let Some(s) = self.status.as_deref() {
            validate::one_of("status", s, STATUSES)?;
        }
        check_window(&self.start_time, &self.end_time)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    pub start_time: Option<DateTimeWithTimeZone>,
    pub end_time: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub location: Option<Option<String>>,
    pub appointment_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub lead_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub contact_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub property_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub assigned_to: Option<Option<String>>,
}

impl AppointmentChanges {
    /// Applies the changes to a loaded row. The time window is checked
    /// against the stored values for whichever bound is not being changed.
    pub fn apply(self, current: &Model, am: &mut ActiveModel) -> Result<(), ModelError> {
        if let Some(v) = &self.title { validate::required("title", v)?; }
        if let Some(v) = &self.appointment_type { validate::one_of("appointmentType", v, APPOINTMENT_TYPES)?; }
        if let Some(v) = &self.status { validate::one_of("status", v, STATUSES)?; }
        let start = self.start_time.unwrap_or(current.start_time);
        let end = self.end_time.unwrap_or(current.end_time);
        check_window(&start, &end)?;

        if let Some(v) = self.title { am.title = Set(v); }
        if let Some(v) = self.description { am.description = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.start_time { am.start_time = Set(v); }
        if let Some(v) = self.end_time { am.end_time = Set(v); }
        if let Some(v) = self.location { am.location = Set(validate::blank_to_none(v)); }
        if let Some(v) = self.appointment_type { am.appointment_type = Set(v); }
        if let Some(v) = self.status { am.status = Set(v); }
        if let Some(v) = self.lead_id { am.lead_id = Set(v); }
        if let Some(v) = self.contact_id { am.contact_id = Set(v); }
        if let Some(v) = self.property_id { am.property_id = Set(v); }
        if let Some(v) = self.assigned_to { am.assigned_to = Set(v); }
        am.updated_at = Set(Utc::now().into());
        Ok(())
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: NewAppointment) -> Result<Model, ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(input.title),
        description: Set(validate::blank_to_none(input.description)),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        location: Set(validate::blank_to_none(input.location)),
        appointment_type: Set(input.appointment_type),
        status: Set(input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
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
            title: "Appointment scheduled".into(),
            description: Some(format!("Appointment \"{}\" has been scheduled", self.title)),
            activity_type: "appointment_scheduled".into(),
            entity_type: Some("appointment".into()),
            entity_id: Some(self.id),
            user_id: self.assigned_to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> NewAppointment {
        let start: DateTimeWithTimeZone = Utc::now().into();
        NewAppointment {
            title: "Showing at Elm St".into(),
            description: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            location: None,
            appointment_type: "showing".into(),
            status: None,
            lead_id: None,
            contact_id: None,
            property_id: None,
            assigned_to: None,
        }
    }

    fn stored() -> Model {
        let s = sample();
        Model {
            id: 1,
            title: s.title,
            description: None,
            start_time: s.start_time,
            end_time: s.end_time,
            location: None,
            appointment_type: s.appointment_type,
            status: DEFAULT_STATUS.into(),
            lead_id: None,
            contact_id: None,
            property_id: None,
            assigned_to: None,
            created_at: s.start_time,
            updated_at: s.start_time,
        }
    }

    #[test]
    fn end_before_start_rejected() {
        let mut a = sample();
        assert!(a.validate().is_ok());
        a.end_time = a.start_time - Duration::minutes(5);
        assert!(a.validate().is_err());
    }

    #[test]
    fn zero_length_allowed() {
        let mut a = sample();
        a.end_time = a.start_time;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn update_checks_window_against_stored_bounds() {
        let current = stored();
        let mut am = <ActiveModel as sea_orm::ActiveModelTrait>::default();
        let moved_past_end = AppointmentChanges {
            start_time: Some(current.end_time + Duration::hours(1)),
            ..Default::default()
        };
        assert!(moved_past_end.apply(&current, &mut am).is_err());

        let both = AppointmentChanges {
            start_time: Some(current.end_time + Duration::hours(1)),
            end_time: Some(current.end_time + Duration::hours(2)),
            ..Default::default()
        };
        assert!(both.apply(&current, &mut am).is_ok());
    }

    #[test]
    fn parses_rfc3339_times() {
        let a: NewAppointment = serde_json::from_str(
            r#"{"title":"Call","startTime":"2025-03-01T10:00:00Z","endTime":"2025-03-01T10:30:00+00:00","appointmentType":"call"}"#,
        )
        .unwrap();
        assert!(a.validate().is_ok());
        assert_eq!((a.end_time - a.start_time).num_minutes(), 30);
    }

    #[test]
    fn creation_activity_text() {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let m = Model {
            id: 4,
            title: "Open house".into(),
            description: None,
            start_time: now,
            end_time: now + Duration::hours(2),
            location: None,
            appointment_type: "showing".into(),
            status: "scheduled".into(),
            lead_id: Some(1),
            contact_id: None,
            property_id: Some(3),
            assigned_to: None,
            created_at: now,
            updated_at: now,
        };
        let a = m.creation_activity();
        assert_eq!(a.title, "Appointment scheduled");
        assert_eq!(a.description.as_deref(), Some("Appointment \"Open house\" has been scheduled"));
        assert_eq!(a.activity_type, "appointment_scheduled");
        assert_eq!(a.entity_type.as_deref(), Some("appointment"));
        assert_eq!(a.entity_id, Some(4));
        assert_eq!(a.user_id, None);
    }
}
