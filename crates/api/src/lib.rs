//! Carwash API library.
//!
//! Exposes the application building blocks so integration tests can
//! construct the router against their own database pool.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
