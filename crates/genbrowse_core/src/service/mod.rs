//! Core use-case services.
//!
//! # Responsibility
//! - Compose repository lookups into relationship queries.
//! - Assemble detail-page contexts for callers such as the CLI.

pub mod detail_service;
pub mod relation_service;
