//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! persistence, authentication and mail delivery.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM.
//!   Without it only [`InMemoryDatabase`] is available.

pub mod auth;
pub mod database;
pub mod mail;
pub mod masking;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryDatabase};
pub use mail::{LogMailer, MailConfig, MailTransport, WebhookMailer, build_mailer};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresBlogRepository, PostgresCommentRepository, PostgresTagRepository,
    PostgresUserRepository, connect,
};
