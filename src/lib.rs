//! NovaZone Academy Backend Library
//!
//! Session gate, academy catalog and the HTTP router, shared by the server
//! binary and the integration tests.

pub mod academy;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
