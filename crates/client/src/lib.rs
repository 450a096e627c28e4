//! Client side of the duty list: HTTP access to the REST API and the state
//! behind the list view and its forms.
//!
//! Rendering is left to the embedding UI; everything here is plain state
//! driven by async calls.

pub mod client;
pub mod error;
pub mod form;
pub mod request;
pub mod state;

pub use client::{DutiesApi, DutiesClient};
pub use error::ClientError;
pub use form::{AddDutyForm, DutyEditor, EMPTY_NAME_MESSAGE};
pub use request::{request, PendingRequest, RequestCanceller};
pub use state::DutiesState;
