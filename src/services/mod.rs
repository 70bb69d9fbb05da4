//! Domain services used by the form workflows and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own identity, session, and backend-call concerns so
//! form workflows and route handlers stay focused on field state and
//! protocol translation.

pub mod auth;
pub mod employees;
pub mod session;
