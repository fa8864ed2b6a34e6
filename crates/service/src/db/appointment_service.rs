use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, appointment};
use crate::errors::ServiceError;

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_appointment(db: &DatabaseConnection, input: appointment::NewAppointment) -> Result<appointment::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = appointment::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(appointment_id = created.id, "appointment_scheduled");
    Ok(created)
}

/// Appointments by start time, latest first.
pub async fn list_appointments(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<appointment::Model>, ServiceError> {
    let rows = appointment::Entity::find()
        .apply_if(owner, |q, o| q.filter(appointment::Column::AssignedTo.eq(o)))
        .order_by_desc(appointment::Column::StartTime)
        .all(db)
        .await?;
    Ok(rows)
}

/// Scheduled appointments that have not started yet, soonest first.
pub async fn upcoming_appointments(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<appointment::Model>, ServiceError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let rows = appointment::Entity::find()
        .filter(appointment::Column::Status.eq(appointment::DEFAULT_STATUS))
        .filter(appointment::Column::StartTime.gt(now))
        .apply_if(owner, |q, o| q.filter(appointment::Column::AssignedTo.eq(o)))
        .order_by_asc(appointment::Column::StartTime)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_appointment(db: &DatabaseConnection, id: i32) -> Result<Option<appointment::Model>, ServiceError> {
    Ok(appointment::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_appointment(
    db: &DatabaseConnection,
    id: i32,
    changes: appointment::AppointmentChanges,
) -> Result<appointment::Model, ServiceError> {
    let current = appointment::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("appointment"))?;
    let mut am: appointment::ActiveModel = current.clone().into();
    changes.apply(&current, &mut am)?;
    Ok(am.update(db).await?)
}

pub async fn delete_appointment(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = appointment::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;
    use crate::test_support::get_db;

    fn at(offset: Duration, title: &str, owner: &str) -> appointment::NewAppointment {
        let start: DateTimeWithTimeZone = (Utc::now() + offset).into();
        appointment::NewAppointment {
            title: title.into(),
            description: None,
            start_time: start,
            end_time: start + Duration::minutes(45),
            location: Some("Office".into()),
            appointment_type: "meeting".into(),
            status: None,
            lead_id: None,
            contact_id: None,
            property_id: None,
            assigned_to: Some(owner.into()),
        }
    }

    #[tokio::test]
    async fn upcoming_excludes_past_and_unscheduled() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let owner = format!("appt-{}", Uuid::new_v4());
        models::user::upsert(&db, models::user::UpsertUser { id: owner.clone(), ..Default::default() }).await?;

        let later = create_appointment(&db, at(Duration::days(2), "later", &owner)).await?;
        let sooner = create_appointment(&db, at(Duration::days(1), "sooner", &owner)).await?;
        let past = create_appointment(&db, at(-Duration::days(1), "past", &owner)).await?;
        let mut confirmed = at(Duration::days(3), "confirmed", &owner);
        confirmed.status = Some("confirmed".into());
        let confirmed = create_appointment(&db, confirmed).await?;

        let upcoming = upcoming_appointments(&db, Some(&owner)).await?;
        let ids: Vec<i32> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);

        let all = list_appointments(&db, Some(&owner)).await?;
        assert_eq!(all.first().map(|a| a.id), Some(confirmed.id));
        assert_eq!(all.last().map(|a| a.id), Some(past.id));

        for a in [later, sooner, past, confirmed] {
            delete_appointment(&db, a.id).await?;
        }
        models::user::Entity::delete_by_id(owner).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn reschedule_cannot_invert_window() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let owner = format!("appt-{}", Uuid::new_v4());
        models::user::upsert(&db, models::user::UpsertUser { id: owner.clone(), ..Default::default() }).await?;
        let a = create_appointment(&db, at(Duration::hours(4), "walkthrough", &owner)).await?;

        let err = update_appointment(&db, a.id, appointment::AppointmentChanges {
            end_time: Some(a.start_time - Duration::minutes(1)),
            ..Default::default()
        }).await.unwrap_err();
        assert!(err.is_validation());

        delete_appointment(&db, a.id).await?;
        models::user::Entity::delete_by_id(owner).exec(&db).await?;
        Ok(())
    }
}
