//! Shared duty contract.
//!
//! Everything in here is pure: the `Duty` shape, the single definition of a
//! valid duty, and the error kinds every layer reports with. Both the API
//! server and the client depend on this crate so they agree on one contract.

pub mod duty;
pub mod error;
pub mod types;
