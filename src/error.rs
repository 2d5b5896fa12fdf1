use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {0}")]
    UniquenessViolation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ForeignKeyViolation(String),

    #[error("database error: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) => match e.kind() {
                ErrorKind::UniqueViolation => {
                    Self::UniquenessViolation(constraint_target(e.message()))
                }
                ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(e.message().to_string()),
                _ => Self::Db(sqlx::Error::Database(e)),
            },
            other => Self::Db(other),
        }
    }
}

// SQLite reports "UNIQUE constraint failed: barbers.phone"; keep the column part
fn constraint_target(message: &str) -> String {
    match message.split_once(": ") {
        Some((_, columns)) => columns.to_string(),
        None => message.to_string(),
    }
}
