//! Request handlers.
//!
//! Handlers only translate between HTTP and the service layer: extract
//! parameters, call the service, pick the status code.

pub mod duty;
pub mod time;
