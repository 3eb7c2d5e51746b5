//! Domain models for the carwash backend.

pub mod statistics;
pub mod wash_request;

pub use statistics::{ReportingPeriods, StatisticsSummary};
pub use wash_request::{CreateWashRequest, StatusFlag, WashRequest};
