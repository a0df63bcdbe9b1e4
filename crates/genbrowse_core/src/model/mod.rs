//! Genealogy domain model.
//!
//! # Responsibility
//! - Define the canonical `Person` and `Marriage` records.
//! - Build human-readable labels for both records.
//!
//! # Invariants
//! - Records are identified by store-assigned integer ids.
//! - A marriage always joins two distinct persons.
//! - Children and spouses are never stored on a record; they are derived
//!   from marriage references by the query layer.

use thiserror::Error;

pub mod marriage;
pub mod names;
pub mod person;

/// Display-label formatting failure.
///
/// Labels need dates that the stored records may lack; callers that cannot
/// guarantee them must handle this error instead of expecting a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("person {person_id} has no birthdate")]
    MissingBirthdate { person_id: i64 },
    #[error("marriage {marriage_id} has no date")]
    MissingMarriageDate { marriage_id: i64 },
    #[error("person {person_id} is not the {role} of marriage {marriage_id}")]
    SpouseMismatch {
        marriage_id: i64,
        person_id: i64,
        role: marriage::SpouseRole,
    },
}

impl LabelError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        "MISSING_FIELD_FOR_DISPLAY"
    }
}

/// Record constraint failure detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{field}` is {actual} characters long, limit is {max}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("person {0} cannot be married to themselves")]
    SelfMarriage(i64),
    #[error("divorce date {divorced} precedes marriage date {married}")]
    DivorceBeforeMarriage {
        married: chrono::NaiveDate,
        divorced: chrono::NaiveDate,
    },
}
