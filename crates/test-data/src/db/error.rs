use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    /// A unique, foreign-key, not-null or check constraint rejected a row.
    #[error("Constraint violation{}: {source}", constraint_suffix(.constraint))]
    ConstraintViolation {
        constraint: Option<String>,
        source: sqlx::Error,
    },

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Schema error on table {table}: {source}")]
    Ddl {
        table: &'static str,
        source: sqlx::Error,
    },

    /// A name reference that no inserted row carries.
    #[error("Unresolved {entity} reference {name:?} from {referenced_by}")]
    UnresolvedReference {
        entity: &'static str,
        name: String,
        referenced_by: String,
    },

    /// A name reference that more than one inserted row carries.
    #[error("Ambiguous {entity} reference {name:?} from {referenced_by}: name is not unique")]
    AmbiguousReference {
        entity: &'static str,
        name: String,
        referenced_by: String,
    },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|name| format!(" ({name})"))
        .unwrap_or_default()
}

impl SeedError {
    /// Wraps a failed CREATE or DROP.
    pub fn ddl(table: &'static str, source: sqlx::Error) -> Self {
        Self::Ddl { table, source }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        let violated = err.as_database_error().and_then(|db| {
            matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            )
            .then(|| db.constraint().map(str::to_string))
        });

        if let Some(constraint) = violated {
            return Self::ConstraintViolation {
                constraint,
                source: err,
            };
        }

        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            _ => Self::Database(err),
        }
    }
}
