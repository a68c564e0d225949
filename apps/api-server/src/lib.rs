//! # Scribe API Server
//!
//! HTTP surface of the blogging backend: accounts, blogs, comments, tags
//! and sharing. The binary in `main.rs` wires configuration and telemetry
//! around [`startup::run`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod startup;
pub mod state;
pub mod telemetry;
