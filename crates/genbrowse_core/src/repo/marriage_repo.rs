//! Marriage repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store and load `marriages` rows.
//! - List the marriages of a person with the husband-or-wife filter.
//!
//! # Invariants
//! - Person marriage lists are sorted by date ascending, undated marriages
//!   last, ties broken by id.
//! - A duplicate `(husband_id, wife_id)` pair is reported as
//!   `IntegrityViolation::DuplicateMarriage`.

use crate::model::marriage::{Marriage, MarriageId, NewMarriage};
use crate::model::person::PersonId;
use crate::repo::{
    constraint_kind, ensure_table_ready, record_exists, ConstraintKind, IntegrityViolation,
    RecordRef, RepoError, RepoResult,
};
use log::debug;
use rusqlite::{params, Connection, Row};

const MARRIAGE_COLUMNS: &[&str] = &[
    "id",
    "marriage_date",
    "divorce_date",
    "husband_id",
    "wife_id",
];

const MARRIAGE_SELECT_SQL: &str = "SELECT
    id,
    marriage_date,
    divorce_date,
    husband_id,
    wife_id
FROM marriages";

/// Repository interface for marriage records.
pub trait MarriageRepository {
    /// Inserts a marriage and returns the store-assigned id.
    fn create_marriage(&self, marriage: &NewMarriage) -> RepoResult<MarriageId>;
    /// Loads one marriage by id.
    fn get_marriage(&self, id: MarriageId) -> RepoResult<Option<Marriage>>;
    /// Lists marriages where `person_id` is husband or wife.
    fn list_marriages_of(&self, person_id: PersonId) -> RepoResult<Vec<Marriage>>;
    /// Deletes a marriage that no person names as birth-marriage.
    fn delete_marriage(&self, id: MarriageId) -> RepoResult<()>;
}

/// SQLite-backed marriage repository.
pub struct SqliteMarriageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMarriageRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "marriages", MARRIAGE_COLUMNS)?;
        Ok(Self { conn })
    }

    fn classify_insert_failure(
        &self,
        marriage: &NewMarriage,
        err: rusqlite::Error,
    ) -> RepoResult<RepoError> {
        let violation = match constraint_kind(&err) {
            Some(ConstraintKind::Unique) => IntegrityViolation::DuplicateMarriage {
                husband_id: marriage.husband_id,
                wife_id: marriage.wife_id,
            },
            Some(ConstraintKind::ForeignKey) => {
                let mut missing = IntegrityViolation::Constraint(err.to_string());
                for id in [marriage.husband_id, marriage.wife_id] {
                    if !record_exists(self.conn, RecordRef::Person(id))? {
                        missing = IntegrityViolation::UnknownReference(RecordRef::Person(id));
                        break;
                    }
                }
                missing
            }
            Some(ConstraintKind::Check | ConstraintKind::Other) => {
                IntegrityViolation::Constraint(err.to_string())
            }
            None => return Ok(err.into()),
        };
        Ok(violation.into())
    }
}

impl MarriageRepository for SqliteMarriageRepository<'_> {
    fn create_marriage(&self, marriage: &NewMarriage) -> RepoResult<MarriageId> {
        marriage.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO marriages (
                marriage_date,
                divorce_date,
                husband_id,
                wife_id
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                marriage.date,
                marriage.date_of_divorce,
                marriage.husband_id,
                marriage.wife_id,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!(
                    "event=marriage_create module=repo status=ok marriage_id={id} husband_id={} wife_id={}",
                    marriage.husband_id, marriage.wife_id
                );
                Ok(id)
            }
            Err(err) => Err(self.classify_insert_failure(marriage, err)?),
        }
    }

    fn get_marriage(&self, id: MarriageId) -> RepoResult<Option<Marriage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MARRIAGE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_marriage_row(row)?));
        }
        Ok(None)
    }

    fn list_marriages_of(&self, person_id: PersonId) -> RepoResult<Vec<Marriage>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MARRIAGE_SELECT_SQL}
             WHERE husband_id = ?1 OR wife_id = ?1
             ORDER BY marriage_date IS NULL, marriage_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([person_id])?;
        let mut marriages = Vec::new();
        while let Some(row) = rows.next()? {
            marriages.push(parse_marriage_row(row)?);
        }
        Ok(marriages)
    }

    fn delete_marriage(&self, id: MarriageId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM marriages WHERE id = ?1;", [id])
            .map_err(|err| match constraint_kind(&err) {
                Some(ConstraintKind::ForeignKey) => RepoError::IntegrityViolation(
                    IntegrityViolation::ReferencedRecord(RecordRef::Marriage(id)),
                ),
                _ => err.into(),
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordRef::Marriage(id)));
        }
        debug!("event=marriage_delete module=repo status=ok marriage_id={id}");
        Ok(())
    }
}

fn parse_marriage_row(row: &Row<'_>) -> RepoResult<Marriage> {
    let marriage = Marriage {
        id: row.get("id")?,
        husband_id: row.get("husband_id")?,
        wife_id: row.get("wife_id")?,
        date: row.get("marriage_date")?,
        date_of_divorce: row.get("divorce_date")?,
    };
    // Externally entered date order is shown as stored; only the pairing is checked.
    if marriage.husband_id == marriage.wife_id {
        return Err(RepoError::InvalidData(format!(
            "marriage {} pairs person {} with itself",
            marriage.id, marriage.husband_id
        )));
    }
    Ok(marriage)
}
