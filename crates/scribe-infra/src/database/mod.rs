//! Persistence: PostgreSQL via SeaORM, plus an in-memory store.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
pub use connections::connect;
pub use connections::DatabaseConfig;
pub use memory::InMemoryDatabase;

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresBlogRepository, PostgresCommentRepository, PostgresTagRepository,
    PostgresUserRepository,
};
