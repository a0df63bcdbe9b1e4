//! Person domain model.
//!
//! # Responsibility
//! - Define the individual genealogy record and its creation draft.
//! - Format the person display label.
//!
//! # Invariants
//! - Name parts are stored as text and may be empty, never null.
//! - `birth_marriage_id`, when set, points at the parents' marriage.

use crate::model::marriage::{MarriageId, SpouseRole};
use crate::model::{LabelError, ValidationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Store-assigned person identifier.
pub type PersonId = i64;

/// Maximum length of each name part, in characters.
pub const NAME_MAX_CHARS: usize = 30;
/// Maximum length of `place_of_birth`, in characters.
pub const PLACE_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Female,
    Male,
}

impl Sex {
    /// Storage code used by the `persons.sex` column.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Female => "f",
            Self::Male => "m",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "f" => Some(Self::Female),
            "m" => Some(Self::Male),
            _ => None,
        }
    }

    /// Russian display name, as shown on detail pages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Female => "женский",
            Self::Male => "мужской",
        }
    }
}

/// Stored genealogy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub lastname: String,
    /// Previous surname, usually the maiden name. Empty when unknown.
    pub maidenname: String,
    pub firstname: String,
    /// Patronymic.
    pub middlename: String,
    pub sex: Sex,
    pub birthdate: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub place_of_birth: String,
    /// Marriage of this person's parents, if known.
    pub birth_marriage_id: Option<MarriageId>,
}

impl Person {
    /// Formats `"{lastname} {firstname} {middlename}, {year} г.р."`.
    ///
    /// # Errors
    /// - `LabelError::MissingBirthdate` when the birth year is unknown.
    pub fn display_label(&self) -> Result<String, LabelError> {
        let birthdate = self
            .birthdate
            .ok_or(LabelError::MissingBirthdate { person_id: self.id })?;
        Ok(format!(
            "{} {} {}, {} г.р.",
            self.lastname,
            self.firstname,
            self.middlename,
            birthdate.year()
        ))
    }

    /// Role this person takes in any marriage.
    pub fn spouse_role(&self) -> SpouseRole {
        SpouseRole::for_sex(self.sex)
    }

    /// Detail route, e.g. `person/12`.
    pub fn route(&self) -> String {
        format!("person/{}", self.id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text_fields(
            &self.lastname,
            &self.maidenname,
            &self.firstname,
            &self.middlename,
            &self.place_of_birth,
        )
    }
}

/// Creation draft for a person; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub lastname: String,
    pub maidenname: String,
    pub firstname: String,
    pub middlename: String,
    pub sex: Sex,
    pub birthdate: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub place_of_birth: String,
    pub birth_marriage_id: Option<MarriageId>,
}

impl NewPerson {
    /// Creates a draft with the three name parts set and everything else
    /// left empty.
    pub fn new(
        sex: Sex,
        lastname: impl Into<String>,
        firstname: impl Into<String>,
        middlename: impl Into<String>,
    ) -> Self {
        Self {
            sex,
            lastname: lastname.into(),
            firstname: firstname.into(),
            middlename: middlename.into(),
            ..Self::default()
        }
    }

    pub fn born(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    pub fn child_of(mut self, marriage_id: MarriageId) -> Self {
        self.birth_marriage_id = Some(marriage_id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text_fields(
            &self.lastname,
            &self.maidenname,
            &self.firstname,
            &self.middlename,
            &self.place_of_birth,
        )
    }

    /// Materializes the stored record once the id is known.
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            lastname: self.lastname,
            maidenname: self.maidenname,
            firstname: self.firstname,
            middlename: self.middlename,
            sex: self.sex,
            birthdate: self.birthdate,
            date_of_death: self.date_of_death,
            place_of_birth: self.place_of_birth,
            birth_marriage_id: self.birth_marriage_id,
        }
    }
}

fn validate_text_fields(
    lastname: &str,
    maidenname: &str,
    firstname: &str,
    middlename: &str,
    place_of_birth: &str,
) -> Result<(), ValidationError> {
    let fields = [
        ("lastname", lastname, NAME_MAX_CHARS),
        ("maidenname", maidenname, NAME_MAX_CHARS),
        ("firstname", firstname, NAME_MAX_CHARS),
        ("middlename", middlename, NAME_MAX_CHARS),
        ("place_of_birth", place_of_birth, PLACE_MAX_CHARS),
    ];
    for (field, value, max) in fields {
        let actual = value.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong { field, max, actual });
        }
    }
    Ok(())
}
