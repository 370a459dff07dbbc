use sea_orm::{DbErr, SqlErr};
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    InvalidInput(String),
    Database(DbErr),
    Parse(String),
    Config(String),
}

impl ServiceError {
    pub fn not_found(what: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{what} not found with id: {id}"))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) | Self::InvalidInput(msg) => write!(f, "{msg}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::Parse(msg) => write!(f, "XML parse error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::InvalidInput(format!("Unique constraint violated: {msg}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::InvalidInput(format!("Foreign key constraint violated: {msg}"))
            }
            _ => Self::Database(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Schedule", 7);
        assert_eq!(err.to_string(), "Schedule not found with id: 7");
    }

    #[test]
    fn test_invalid_input_display_is_bare_message() {
        let err = ServiceError::InvalidInput("Departure time must be before arrival time".into());
        assert_eq!(err.to_string(), "Departure time must be before arrival time");
    }

    #[test]
    fn test_database_error_display() {
        let err = ServiceError::from(DbErr::Custom("connection failed".to_string()));
        assert!(matches!(err, ServiceError::Database(_)));
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_parse_and_config_display() {
        assert_eq!(
            ServiceError::Parse("unexpected EOF".into()).to_string(),
            "XML parse error: unexpected EOF"
        );
        assert_eq!(
            ServiceError::Config("Invalid REST_ADDR".into()).to_string(),
            "Configuration error: Invalid REST_ADDR"
        );
    }
}
