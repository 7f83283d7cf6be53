/// Authentication utilities
///
/// This module provides the authentication primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum middleware types for bearer-token authentication
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with 24 hour expiration
/// - **Constant-time Comparison**: Password verification uses constant-time operations

pub mod jwt;
pub mod middleware;
pub mod password;
