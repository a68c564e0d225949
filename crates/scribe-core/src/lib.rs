//! # Scribe Core
//!
//! The domain layer of the Scribe blogging backend.
//! This crate contains the validation rules, ownership policy, pagination and
//! search relevance logic, plus the ports implemented by `scribe-infra`.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod search;
pub mod validation;

pub use error::DomainError;
pub use validation::FieldErrors;
