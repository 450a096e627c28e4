//! The duty entity and its validation rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::DutyId;

/// Maximum length (in characters) of both `id` and `name`.
pub const MAX_FIELD_LEN: usize = 255;

/// Name used by [`create_duty`] when none is given.
pub const DEFAULT_DUTY_NAME: &str = "generic task";

/// Prefix of every versioned API route.
pub const API_PREFIX: &str = "/api/v1";

/// Base path of the duty REST resource.
pub const BASE_DUTIES_ROUTE: &str = "/api/v1/duties";

/// A named task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    pub id: DutyId,
    pub name: String,
}

/// A possibly incomplete duty, as received from a request body.
///
/// Length bounds are declared here; presence is checked by [`validate_duty`]
/// since `validator` skips absent optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DutyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub id: Option<DutyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

impl DutyInput {
    /// Input carrying only a name (the create payload).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

impl From<&Duty> for DutyInput {
    fn from(duty: &Duty) -> Self {
        Self {
            id: Some(duty.id.clone()),
            name: Some(duty.name.clone()),
        }
    }
}

impl Duty {
    /// Shorthand for `validate_duty(Some(&self.into()))`.
    pub fn is_valid(&self) -> bool {
        validate_duty(Some(&DutyInput::from(self)))
    }
}

/// Build a new duty with a fresh UUID.
///
/// An absent or empty `name` falls back to [`DEFAULT_DUTY_NAME`].
pub fn create_duty(name: Option<&str>) -> Duty {
    let name = match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_DUTY_NAME.to_string(),
    };
    Duty {
        id: Uuid::new_v4().to_string(),
        name,
    }
}

/// Check whether `candidate` is a complete, well-formed duty.
///
/// Returns `false` when the candidate is absent, when `id` or `name` is
/// missing or empty, or when either is longer than [`MAX_FIELD_LEN`]
/// characters.
pub fn validate_duty(candidate: Option<&DutyInput>) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };
    if is_blank(candidate.id.as_deref()) || is_blank(candidate.name.as_deref()) {
        return false;
    }
    candidate.validate().is_ok()
}

/// `true` when the identifier exceeds [`MAX_FIELD_LEN`] characters.
pub fn id_too_long(id: &str) -> bool {
    id.chars().count() > MAX_FIELD_LEN
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
