//! Failure taxonomy for import runs.
//!
//! Every variant aborts the run. [`ImportError::class`] groups them into the
//! four categories operators act on, and the command-line binary maps each
//! class to its own exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::EntityKind;

pub type ImportResult<T> = Result<T, ImportError>;

/// Broad category of an [`ImportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or unreadable source file.
    Io,
    /// Source data that does not fit the configured layout.
    MalformedRecord,
    /// Rejected by PostgreSQL (constraints, casts, connectivity).
    Storage,
    /// Invalid plan or settings, detected before any data is touched.
    Configuration,
}

impl ErrorClass {
    /// Process exit code for this class.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorClass::Io => 1,
            ErrorClass::MalformedRecord => 2,
            ErrorClass::Storage => 3,
            ErrorClass::Configuration => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file} line {line}: expected at least {expected} columns, found {found}")]
    TooFewColumns {
        file: String,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("{file} line {line}: invalid boolean {token:?} for field {field} (expected Y, N or empty)")]
    InvalidBoolean {
        file: String,
        line: u64,
        field: &'static str,
        token: String,
    },
    #[error("{file}: unreadable record: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("{entity} has no field named {field}")]
    UnknownField { entity: EntityKind, field: String },
    #[error("{entity}.{field} is assigned by the database and cannot be imported")]
    GeneratedField {
        entity: EntityKind,
        field: &'static str,
    },
    #[error("{entity}.{field} is mapped more than once in {file}")]
    DuplicateField {
        entity: EntityKind,
        field: &'static str,
        file: String,
    },
    #[error("{file} loads {entity} before {target}, which it references")]
    DependencyOrder {
        file: String,
        entity: EntityKind,
        target: EntityKind,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

impl ImportError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ImportError::Io { .. } => ErrorClass::Io,
            ImportError::Csv { source, .. } if source.is_io_error() => ErrorClass::Io,
            ImportError::TooFewColumns { .. }
            | ImportError::InvalidBoolean { .. }
            | ImportError::Csv { .. } => ErrorClass::MalformedRecord,
            ImportError::Database(_) | ImportError::Migration(_) => ErrorClass::Storage,
            ImportError::UnknownField { .. }
            | ImportError::GeneratedField { .. }
            | ImportError::DuplicateField { .. }
            | ImportError::DependencyOrder { .. }
            | ImportError::Config(_) => ErrorClass::Configuration,
        }
    }

    /// SQLSTATE reported by PostgreSQL, when the failure came from the server.
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            ImportError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|code| code.into_owned())
            }
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23505")
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23503")
    }

    pub fn is_not_null_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23502")
    }

    pub fn is_check_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23514")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_and_exit_codes() {
        let io = ImportError::Io {
            path: PathBuf::from("data/sr28/FD_GROUP.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.class(), ErrorClass::Io);
        assert_eq!(io.class().exit_code(), 1);

        let short = ImportError::TooFewColumns {
            file: "WEIGHT.txt".to_string(),
            line: 3,
            expected: 7,
            found: 2,
        };
        assert_eq!(short.class(), ErrorClass::MalformedRecord);

        let unknown = ImportError::UnknownField {
            entity: EntityKind::FoodGroup,
            field: "name".to_string(),
        };
        assert_eq!(unknown.class(), ErrorClass::Configuration);
        assert_eq!(unknown.class().exit_code(), 4);

        let storage = ImportError::Database(sqlx::Error::RowNotFound);
        assert_eq!(storage.class(), ErrorClass::Storage);
        assert!(!storage.is_unique_violation());
    }

    #[test]
    fn test_messages_name_the_location() {
        let err = ImportError::InvalidBoolean {
            file: "FOOD_DES.txt".to_string(),
            line: 12,
            field: "survey",
            token: "X".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("FOOD_DES.txt line 12"));
        assert!(message.contains("\"X\""));
        assert!(message.contains("survey"));
    }
}
