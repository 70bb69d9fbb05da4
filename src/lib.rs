//! staffdesk — employee administration front office.
//!
//! ARCHITECTURE
//! ============
//! Form pages validate input locally, send one request to the employee
//! backend, and report the outcome through a per-session toast queue.
//! Authentication state lives in an explicit `AuthSession` handle that
//! only a `SessionStore` can hand out.

pub mod config;
pub mod forms;
pub mod routes;
pub mod services;
pub mod state;
pub mod toast;
pub mod validation;
