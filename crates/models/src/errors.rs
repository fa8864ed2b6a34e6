use sea_orm::SqlErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}

/// A referenced row (owner, lead, contact, property) that does not exist is the
/// caller's mistake; everything else is a storage failure.
impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                Self::Validation(format!("referenced record does not exist: {detail}"))
            }
            _ => Self::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn non_constraint_errors_stay_db_errors() {
        assert!(matches!(ModelError::from(DbErr::Custom("pool timed out".into())), ModelError::Db(_)));
        assert!(matches!(ModelError::from(DbErr::RecordNotInserted), ModelError::Db(_)));
    }
}
