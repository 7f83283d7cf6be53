//! # Taskdeck Shared Library
//!
//! This crate contains shared types, utilities, and business logic used by
//! the Taskdeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `access`: Access-control rules for projects and tasks
//! - `auth`: Authentication utilities (passwords, JWT, middleware)
//! - `db`: Connection pool and migration helpers

pub mod access;
pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
