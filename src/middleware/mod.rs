//! Middleware
//!
//! CORS y el chequeo de credencial de los trackers.

pub mod auth;
pub mod cors;
