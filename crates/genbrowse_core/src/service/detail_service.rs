//! Detail-view assembly for person and marriage pages.
//!
//! # Responsibility
//! - Load a record by id together with every relationship its detail page
//!   shows, fully materialized.
//!
//! # Invariants
//! - Unknown ids fail with `RepoError::NotFound`.
//! - Labels that cannot be formatted are `None` in a view; the view itself
//!   still loads.

use crate::model::marriage::{Marriage, MarriageId};
use crate::model::LabelError;
use crate::model::person::{Person, PersonId};
use crate::repo::marriage_repo::MarriageRepository;
use crate::repo::person_repo::PersonRepository;
use crate::repo::RepoResult;
use crate::service::relation_service::{Parents, RelationService};
use log::{debug, warn};
use serde::Serialize;

/// Context of a person detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetail {
    pub person: Person,
    pub label: Option<String>,
    pub parents: Option<Parents>,
    pub spouses: Vec<Person>,
    pub marriages: Vec<MarriageEntry>,
    pub children: Vec<Person>,
}

/// One marriage row on a person detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarriageEntry {
    pub marriage: Marriage,
    pub spouse: Person,
    pub label: Option<String>,
}

/// Context of a marriage detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarriageDetail {
    pub marriage: Marriage,
    pub label: Option<String>,
    pub husband: Person,
    pub wife: Person,
    pub children: Vec<Person>,
}

/// Builds detail-page contexts on top of `RelationService`.
pub struct DetailService<P, M> {
    relations: RelationService<P, M>,
}

impl<P: PersonRepository, M: MarriageRepository> DetailService<P, M> {
    pub fn new(relations: RelationService<P, M>) -> Self {
        Self { relations }
    }

    pub fn relations(&self) -> &RelationService<P, M> {
        &self.relations
    }

    pub fn person_detail(&self, id: PersonId) -> RepoResult<PersonDetail> {
        let person = self.relations.person(id)?;
        let label = person.display_label().map_or_else(skip_label, Some);

        let marriages = self
            .relations
            .marriages_with_spouses(&person)?
            .into_iter()
            .map(|entry| {
                let label = if entry.marriage.husband_id == person.id {
                    entry.marriage.display_label(&person, &entry.spouse)
                } else {
                    entry.marriage.display_label(&entry.spouse, &person)
                }
                .map_or_else(skip_label, Some);
                MarriageEntry {
                    marriage: entry.marriage,
                    spouse: entry.spouse,
                    label,
                }
            })
            .collect();

        let detail = PersonDetail {
            parents: self.relations.parents(&person)?,
            spouses: self.relations.spouses(&person)?,
            children: self.relations.children(&person)?,
            marriages,
            label,
            person,
        };
        debug!(
            "event=detail_view module=service kind=person id={id} marriages={} children={}",
            detail.marriages.len(),
            detail.children.len()
        );
        Ok(detail)
    }

    pub fn marriage_detail(&self, id: MarriageId) -> RepoResult<MarriageDetail> {
        let marriage = self.relations.marriage(id)?;
        let (husband, wife) = self.relations.spouses_of_marriage(&marriage)?;
        let label = marriage
            .display_label(&husband, &wife)
            .map_or_else(skip_label, Some);
        let children = self.relations.marriage_children(&marriage)?;

        debug!(
            "event=detail_view module=service kind=marriage id={id} children={}",
            children.len()
        );
        Ok(MarriageDetail {
            marriage,
            label,
            husband,
            wife,
            children,
        })
    }
}

fn skip_label(err: LabelError) -> Option<String> {
    warn!("event=label_skipped module=service code={} {err}", err.code());
    None
}
