//! Business rules between the HTTP handlers and the DAOs.

pub mod duty;

pub use duty::{DutyService, DutyServiceImpl};
