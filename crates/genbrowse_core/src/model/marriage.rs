//! Marriage domain model.
//!
//! # Responsibility
//! - Define the union record between one husband and one wife.
//! - Resolve the "other spouse" of a marriage through `SpouseRole`.
//! - Format the marriage display label.
//!
//! # Invariants
//! - `husband_id != wife_id`.
//! - The `(husband_id, wife_id)` pair is unique across the store.
//! - `date_of_divorce` is not earlier than `date` when both are set.

use crate::model::names::surname_with_initials;
use crate::model::person::{Person, PersonId, Sex};
use crate::model::{LabelError, ValidationError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned marriage identifier.
pub type MarriageId = i64;

/// Side a person takes in a marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpouseRole {
    Husband,
    Wife,
}

impl SpouseRole {
    /// Men are looked up as husbands, everyone else as wives.
    pub fn for_sex(sex: Sex) -> Self {
        match sex {
            Sex::Male => Self::Husband,
            Sex::Female => Self::Wife,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Husband => Self::Wife,
            Self::Wife => Self::Husband,
        }
    }

    /// Parent role this spouse takes for the children of the marriage.
    pub fn parent_role(self) -> ParentRole {
        match self {
            Self::Husband => ParentRole::Father,
            Self::Wife => ParentRole::Mother,
        }
    }
}

impl Display for SpouseRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Husband => f.write_str("husband"),
            Self::Wife => f.write_str("wife"),
        }
    }
}

/// Side a person takes for the children of their birth-marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRole {
    Father,
    Mother,
}

impl ParentRole {
    pub fn spouse_role(self) -> SpouseRole {
        match self {
            Self::Father => SpouseRole::Husband,
            Self::Mother => SpouseRole::Wife,
        }
    }
}

/// Stored union record (official, civil or church).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marriage {
    pub id: MarriageId,
    pub husband_id: PersonId,
    pub wife_id: PersonId,
    /// Start of the union.
    pub date: Option<NaiveDate>,
    pub date_of_divorce: Option<NaiveDate>,
}

impl Marriage {
    /// Person holding `role` in this marriage.
    pub fn spouse_id(&self, role: SpouseRole) -> PersonId {
        match role {
            SpouseRole::Husband => self.husband_id,
            SpouseRole::Wife => self.wife_id,
        }
    }

    /// Role `person_id` takes in this marriage, or `None` for outsiders.
    pub fn role_of(&self, person_id: PersonId) -> Option<SpouseRole> {
        if self.wife_id == person_id {
            Some(SpouseRole::Wife)
        } else if self.husband_id == person_id {
            Some(SpouseRole::Husband)
        } else {
            None
        }
    }

    /// The partner of `person_id`, or `None` when `person_id` is not a spouse.
    pub fn spouse_of(&self, person_id: PersonId) -> Option<PersonId> {
        self.role_of(person_id)
            .map(|role| self.spouse_id(role.other()))
    }

    /// Formats `"Иванов И.И. - Петрова (Сидорова) А.С., 1975"`.
    ///
    /// The maiden name is shown in parentheses only when present.
    ///
    /// # Errors
    /// - `LabelError::SpouseMismatch` when `husband`/`wife` are not the
    ///   spouses referenced by this marriage.
    /// - `LabelError::MissingMarriageDate` when the year is unknown.
    pub fn display_label(&self, husband: &Person, wife: &Person) -> Result<String, LabelError> {
        for (role, person) in [(SpouseRole::Husband, husband), (SpouseRole::Wife, wife)] {
            if self.spouse_id(role) != person.id {
                return Err(LabelError::SpouseMismatch {
                    marriage_id: self.id,
                    person_id: person.id,
                    role,
                });
            }
        }
        let date = self.date.ok_or(LabelError::MissingMarriageDate {
            marriage_id: self.id,
        })?;

        let husband_part =
            surname_with_initials(&husband.lastname, &husband.firstname, &husband.middlename);
        let wife_surname = if wife.maidenname.is_empty() {
            wife.lastname.clone()
        } else {
            format!("{} ({})", wife.lastname, wife.maidenname)
        };
        let wife_part = surname_with_initials(&wife_surname, &wife.firstname, &wife.middlename);

        Ok(format!("{husband_part} - {wife_part}, {}", date.year()))
    }

    /// Detail route, e.g. `marriage/3`.
    pub fn route(&self) -> String {
        format!("marriage/{}", self.id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_union(self.husband_id, self.wife_id, self.date, self.date_of_divorce)
    }
}

/// Creation draft for a marriage; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMarriage {
    pub husband_id: PersonId,
    pub wife_id: PersonId,
    pub date: Option<NaiveDate>,
    pub date_of_divorce: Option<NaiveDate>,
}

impl NewMarriage {
    pub fn new(husband_id: PersonId, wife_id: PersonId) -> Self {
        Self {
            husband_id,
            wife_id,
            date: None,
            date_of_divorce: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn divorced_on(mut self, date: NaiveDate) -> Self {
        self.date_of_divorce = Some(date);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_union(self.husband_id, self.wife_id, self.date, self.date_of_divorce)
    }

    pub fn into_marriage(self, id: MarriageId) -> Marriage {
        Marriage {
            id,
            husband_id: self.husband_id,
            wife_id: self.wife_id,
            date: self.date,
            date_of_divorce: self.date_of_divorce,
        }
    }
}

fn validate_union(
    husband_id: PersonId,
    wife_id: PersonId,
    date: Option<NaiveDate>,
    date_of_divorce: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if husband_id == wife_id {
        return Err(ValidationError::SelfMarriage(husband_id));
    }
    if let (Some(married), Some(divorced)) = (date, date_of_divorce) {
        if divorced < married {
            return Err(ValidationError::DivorceBeforeMarriage { married, divorced });
        }
    }
    Ok(())
}
