//! Route handlers for the Carwash API.

pub mod health;
pub mod requests;
pub mod statistics;
pub mod updates;
