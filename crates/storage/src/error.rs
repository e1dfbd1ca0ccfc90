use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid seed configuration: {0}")]
    InvalidSeed(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some("23505")
            }
            StorageError::ConstraintViolation(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_counts_as_unique_violation() {
        let err = StorageError::ConstraintViolation("duplicate person".to_string());
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_invalid_seed_is_not_a_violation() {
        let err = StorageError::InvalidSeed("no animals".to_string());
        assert!(!err.is_unique_violation());
    }
}
