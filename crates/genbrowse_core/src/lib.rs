//! Core domain logic for the genealogy browser.
//! This crate is the single source of truth for the person/marriage model
//! and the relationships derived from it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod routes;
pub mod service;

pub use config::{BrowserConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::marriage::{Marriage, MarriageId, NewMarriage, ParentRole, SpouseRole};
pub use model::names::initials;
pub use model::person::{NewPerson, Person, PersonId, Sex};
pub use model::{LabelError, ValidationError};
pub use repo::marriage_repo::{MarriageRepository, SqliteMarriageRepository};
pub use repo::person_repo::{PersonRepository, SqlitePersonRepository};
pub use repo::{IntegrityViolation, RecordRef, RepoError, RepoResult};
pub use routes::{Route, RouteError};
pub use service::detail_service::{DetailService, MarriageDetail, MarriageEntry, PersonDetail};
pub use service::relation_service::{MarriageWithSpouse, Parents, RelationService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
