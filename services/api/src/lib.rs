//! User resource of the library-management backend
//!
//! Validation, lifecycle and persistence of user accounts, exposed over HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
