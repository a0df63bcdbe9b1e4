//! Detail-page routes.
//!
//! Records are addressed as `person/<id>` and `marriage/<id>`; this module
//! parses and prints those paths.

use crate::model::marriage::MarriageId;
use crate::model::person::PersonId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use thiserror::Error;

static ROUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/?(person|marriage)/([0-9]+)/?$").expect("valid route regex")
});

/// Addressable detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Person(PersonId),
    Marriage(MarriageId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route `{0}`; expected person/<id> or marriage/<id>")]
    Unknown(String),
    #[error("record id `{0}` is out of range")]
    IdOutOfRange(String),
}

impl Route {
    /// Parses `person/<id>` or `marriage/<id>`, tolerating a leading or
    /// trailing slash.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let captures = ROUTE_RE
            .captures(trimmed)
            .ok_or_else(|| RouteError::Unknown(trimmed.to_string()))?;
        let digits = &captures[2];
        let id: i64 = digits
            .parse()
            .map_err(|_| RouteError::IdOutOfRange(digits.to_string()))?;

        match &captures[1] {
            "person" => Ok(Self::Person(id)),
            _ => Ok(Self::Marriage(id)),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person(id) => write!(f, "person/{id}"),
            Self::Marriage(id) => write!(f, "marriage/{id}"),
        }
    }
}
