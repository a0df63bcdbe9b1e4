//! Person repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store and load `persons` rows.
//! - Serve the person-valued relationship lookups: spouses through
//!   `marriages`, and children through the indexed `birth_marriage_id`.
//!
//! # Invariants
//! - Spouse lists follow marriage id order.
//! - Child lists follow person id order.
//! - Deleting a person still referenced by a marriage is rejected.

use crate::model::marriage::{MarriageId, SpouseRole};
use crate::model::person::{NewPerson, Person, PersonId, Sex};
use crate::repo::{
    constraint_kind, ensure_table_ready, ConstraintKind, IntegrityViolation, RecordRef, RepoError,
    RepoResult,
};
use log::debug;
use rusqlite::{params, Connection, Row};

const PERSON_COLUMNS: &[&str] = &[
    "id",
    "lastname",
    "maidenname",
    "firstname",
    "middlename",
    "sex",
    "birthdate",
    "date_of_death",
    "place_of_birth",
    "birth_marriage_id",
];

const PERSON_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.lastname AS lastname,
    p.maidenname AS maidenname,
    p.firstname AS firstname,
    p.middlename AS middlename,
    p.sex AS sex,
    p.birthdate AS birthdate,
    p.date_of_death AS date_of_death,
    p.place_of_birth AS place_of_birth,
    p.birth_marriage_id AS birth_marriage_id
FROM persons p";

/// Repository interface for person records and person-valued lookups.
pub trait PersonRepository {
    /// Inserts a person and returns the store-assigned id.
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Loads one person by id.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Lists the partners of `person_id`, who takes `role` in each marriage.
    fn list_spouses(&self, person_id: PersonId, role: SpouseRole) -> RepoResult<Vec<Person>>;
    /// Lists persons whose birth-marriage is `marriage_id`.
    fn list_children(&self, marriage_id: MarriageId) -> RepoResult<Vec<Person>>;
    /// Deletes an unreferenced person.
    fn delete_person(&self, id: PersonId) -> RepoResult<()>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "persons", PERSON_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_persons(&self, sql: &str, id: i64) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }
        Ok(persons)
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId> {
        person.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO persons (
                lastname,
                maidenname,
                firstname,
                middlename,
                sex,
                birthdate,
                date_of_death,
                place_of_birth,
                birth_marriage_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                person.lastname.as_str(),
                person.maidenname.as_str(),
                person.firstname.as_str(),
                person.middlename.as_str(),
                person.sex.as_db(),
                person.birthdate,
                person.date_of_death,
                person.place_of_birth.as_str(),
                person.birth_marriage_id,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!("event=person_create module=repo status=ok person_id={id}");
                Ok(id)
            }
            Err(err) => match (constraint_kind(&err), person.birth_marriage_id) {
                (Some(ConstraintKind::ForeignKey), Some(marriage_id)) => Err(
                    IntegrityViolation::UnknownReference(RecordRef::Marriage(marriage_id)).into(),
                ),
                (Some(_), _) => Err(IntegrityViolation::Constraint(err.to_string()).into()),
                (None, _) => Err(err.into()),
            },
        }
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }
        Ok(None)
    }

    fn list_spouses(&self, person_id: PersonId, role: SpouseRole) -> RepoResult<Vec<Person>> {
        // `role` is the side `person_id` takes; partners sit on the other side.
        let (own_column, partner_column) = match role {
            SpouseRole::Husband => ("husband_id", "wife_id"),
            SpouseRole::Wife => ("wife_id", "husband_id"),
        };
        let sql = format!(
            "{PERSON_SELECT_SQL}
             INNER JOIN marriages m ON m.{partner_column} = p.id
             WHERE m.{own_column} = ?1
             ORDER BY m.id ASC;"
        );
        self.query_persons(&sql, person_id)
    }

    fn list_children(&self, marriage_id: MarriageId) -> RepoResult<Vec<Person>> {
        let sql = format!(
            "{PERSON_SELECT_SQL}
             WHERE p.birth_marriage_id = ?1
             ORDER BY p.id ASC;"
        );
        self.query_persons(&sql, marriage_id)
    }

    fn delete_person(&self, id: PersonId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])
            .map_err(|err| match constraint_kind(&err) {
                Some(ConstraintKind::ForeignKey) => RepoError::IntegrityViolation(
                    IntegrityViolation::ReferencedRecord(RecordRef::Person(id)),
                ),
                _ => err.into(),
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordRef::Person(id)));
        }
        debug!("event=person_delete module=repo status=ok person_id={id}");
        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: PersonId = row.get("id")?;
    let sex_text: String = row.get("sex")?;
    let sex = Sex::from_db(&sex_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid sex `{sex_text}` in persons.sex (id {id})"))
    })?;

    Ok(Person {
        id,
        lastname: row.get("lastname")?,
        maidenname: row.get("maidenname")?,
        firstname: row.get("firstname")?,
        middlename: row.get("middlename")?,
        sex,
        birthdate: row.get("birthdate")?,
        date_of_death: row.get("date_of_death")?,
        place_of_birth: row.get("place_of_birth")?,
        birth_marriage_id: row.get("birth_marriage_id")?,
    })
}
