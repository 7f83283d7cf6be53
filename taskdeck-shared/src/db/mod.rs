/// Database utilities
///
/// This module provides the PostgreSQL connection pool and migration
/// helpers used by the API server and tests.

pub mod migrations;
pub mod pool;
