/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `users`: User listing and profile endpoints
/// - `projects`: Project CRUD and membership management
/// - `tasks`: Task CRUD, assignment, status, comments

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
