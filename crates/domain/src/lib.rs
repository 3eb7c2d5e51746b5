//! Domain layer for the carwash backend.
//!
//! This crate contains:
//! - Domain models (WashRequest, status flags, reporting periods)
//! - Business logic services (notification gateway, update publisher)

pub mod models;
pub mod services;
