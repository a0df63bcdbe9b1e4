//! Relationship query service.
//!
//! # Responsibility
//! - Derive spouses, marriages, children and parents of stored records.
//! - Resolve person/marriage ids into records with `NotFound` semantics.
//!
//! # Invariants
//! - Every query is a pure read; nothing here mutates the store.
//! - `children(person)` preserves `marriages(person)` order, then child order.
//! - A dangling spouse/parent reference is reported as `InvalidData`.

use crate::model::marriage::{Marriage, MarriageId, ParentRole};
use crate::model::person::{Person, PersonId};
use crate::repo::marriage_repo::MarriageRepository;
use crate::repo::person_repo::PersonRepository;
use crate::repo::{RecordRef, RepoError, RepoResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// One marriage of a person together with the partner in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageWithSpouse {
    pub marriage: Marriage,
    pub spouse: Person,
}

/// Both parents of a person, resolved from the birth-marriage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parents {
    pub father: Person,
    pub mother: Person,
}

impl Parents {
    pub fn get(&self, role: ParentRole) -> &Person {
        match role {
            ParentRole::Father => &self.father,
            ParentRole::Mother => &self.mother,
        }
    }
}

/// Use-case service for relationship lookups.
pub struct RelationService<P, M> {
    persons: P,
    marriages: M,
}

impl<P: PersonRepository, M: MarriageRepository> RelationService<P, M> {
    /// Creates a service using the provided repository implementations.
    pub fn new(persons: P, marriages: M) -> Self {
        Self { persons, marriages }
    }

    /// Loads a person, failing with `NotFound` for unknown ids.
    pub fn person(&self, id: PersonId) -> RepoResult<Person> {
        self.persons
            .get_person(id)?
            .ok_or(RepoError::NotFound(RecordRef::Person(id)))
    }

    /// Loads a marriage, failing with `NotFound` for unknown ids.
    pub fn marriage(&self, id: MarriageId) -> RepoResult<Marriage> {
        self.marriages
            .get_marriage(id)?
            .ok_or(RepoError::NotFound(RecordRef::Marriage(id)))
    }

    /// Partners of `person`: wives for men, husbands otherwise.
    pub fn spouses(&self, person: &Person) -> RepoResult<Vec<Person>> {
        let spouses = self.persons.list_spouses(person.id, person.spouse_role())?;
        debug!(
            "event=relation_query module=service op=spouses person_id={} count={}",
            person.id,
            spouses.len()
        );
        Ok(spouses)
    }

    /// Marriages `person` takes part in, by date with undated ones last.
    pub fn marriages(&self, person: &Person) -> RepoResult<Vec<Marriage>> {
        let marriages = self.marriages.list_marriages_of(person.id)?;
        debug!(
            "event=relation_query module=service op=marriages person_id={} count={}",
            person.id,
            marriages.len()
        );
        Ok(marriages)
    }

    /// Marriages of `person`, each paired with the partner.
    pub fn marriages_with_spouses(&self, person: &Person) -> RepoResult<Vec<MarriageWithSpouse>> {
        self.marriages(person)?
            .into_iter()
            .map(|marriage| {
                let spouse_id = marriage.spouse_of(person.id).ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "marriage {} listed for non-spouse person {}",
                        marriage.id, person.id
                    ))
                })?;
                let spouse = self.referenced_person(spouse_id, &marriage)?;
                Ok(MarriageWithSpouse { marriage, spouse })
            })
            .collect()
    }

    /// Children of every marriage of `person`, flattened in marriage order.
    pub fn children(&self, person: &Person) -> RepoResult<Vec<Person>> {
        let mut children = Vec::new();
        for marriage in self.marriages(person)? {
            children.extend(self.persons.list_children(marriage.id)?);
        }
        Ok(children)
    }

    /// Persons born of `marriage`.
    pub fn marriage_children(&self, marriage: &Marriage) -> RepoResult<Vec<Person>> {
        self.persons.list_children(marriage.id)
    }

    /// Father and mother of `person`, or `None` without a birth-marriage.
    pub fn parents(&self, person: &Person) -> RepoResult<Option<Parents>> {
        let Some(marriage_id) = person.birth_marriage_id else {
            return Ok(None);
        };
        let marriage = self.marriages.get_marriage(marriage_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "person {} references missing birth marriage {marriage_id}",
                person.id
            ))
        })?;

        let father = self.parent(&marriage, ParentRole::Father)?;
        let mother = self.parent(&marriage, ParentRole::Mother)?;
        Ok(Some(Parents { father, mother }))
    }

    /// Husband and wife of `marriage`, in that order.
    pub fn spouses_of_marriage(&self, marriage: &Marriage) -> RepoResult<(Person, Person)> {
        let husband = self.referenced_person(marriage.husband_id, marriage)?;
        let wife = self.referenced_person(marriage.wife_id, marriage)?;
        Ok((husband, wife))
    }

    fn parent(&self, marriage: &Marriage, role: ParentRole) -> RepoResult<Person> {
        self.referenced_person(marriage.spouse_id(role.spouse_role()), marriage)
    }

    fn referenced_person(&self, id: PersonId, marriage: &Marriage) -> RepoResult<Person> {
        self.persons.get_person(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "marriage {} references missing person {id}",
                marriage.id
            ))
        })
    }
}
