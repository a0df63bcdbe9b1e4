//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for persons/marriages.
//! - Isolate SQLite query details from the relationship query service.
//! - Translate SQLite constraint failures into `IntegrityViolation`s.
//!
//! # Invariants
//! - Repository writes call `validate()` before SQL mutations.
//! - Repositories only accept connections with migrations fully applied.
//! - Read paths return stored rows as-is; only shape errors (bad sex code,
//!   self-marriage) are reported as `InvalidData`.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::marriage::MarriageId;
use crate::model::person::PersonId;
use crate::model::ValidationError;
use rusqlite::{Connection, ErrorCode};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod marriage_repo;
pub mod person_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Identifier of any stored record, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordRef {
    Person(PersonId),
    Marriage(MarriageId),
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person(id) => write!(f, "person {id}"),
            Self::Marriage(id) => write!(f, "marriage {id}"),
        }
    }
}

/// Referential or uniqueness rule rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("marriage between husband {husband_id} and wife {wife_id} already exists")]
    DuplicateMarriage {
        husband_id: PersonId,
        wife_id: PersonId,
    },
    #[error("{0} is still referenced and cannot be deleted")]
    ReferencedRecord(RecordRef),
    #[error("referenced {0} does not exist")]
    UnknownReference(RecordRef),
    #[error("constraint failed: {0}")]
    Constraint(String),
}

/// Repository error for person/marriage persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{0} not found")]
    NotFound(RecordRef),
    #[error("integrity violation: {0}")]
    IntegrityViolation(IntegrityViolation),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error(
        "connection schema version {actual_version} is behind required {expected_version}; open it through db::open_db"
    )]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Db(_) => "DB_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::IntegrityViolation(_) => "INTEGRITY_VIOLATION",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => "SCHEMA_NOT_READY",
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<IntegrityViolation> for RepoError {
    fn from(value: IntegrityViolation) -> Self {
        Self::IntegrityViolation(value)
    }
}

const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

/// Class of a failed SQLite constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
    Other,
}

/// Returns the constraint class when `err` is a constraint failure.
pub(crate) fn constraint_kind(err: &rusqlite::Error) -> Option<ConstraintKind> {
    match err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::Unique,
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
                rusqlite::ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
                // `ON DELETE RESTRICT` actions fail through the trigger code.
                rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER
                    if message
                        .as_deref()
                        .is_some_and(|text| text.contains(FOREIGN_KEY_FAILED)) =>
                {
                    ConstraintKind::ForeignKey
                }
                _ => ConstraintKind::Other,
            })
        }
        _ => None,
    }
}

/// Verifies that migrations ran and `table` carries every column in `columns`.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    let present = table_columns(conn, table)?;
    if let Some(column) = columns
        .iter()
        .copied()
        .find(|column| !present.iter().any(|name| name == column))
    {
        return Err(RepoError::MissingRequiredColumn { table, column });
    }

    Ok(())
}

pub(crate) fn record_exists(conn: &Connection, record: RecordRef) -> RepoResult<bool> {
    let (sql, id) = match record {
        RecordRef::Person(id) => ("SELECT EXISTS(SELECT 1 FROM persons WHERE id = ?1);", id),
        RecordRef::Marriage(id) => ("SELECT EXISTS(SELECT 1 FROM marriages WHERE id = ?1);", id),
    };
    let exists: i64 = conn.query_row(sql, [id], |row| row.get(0))?;
    Ok(exists == 1)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
