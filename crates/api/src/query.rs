//! Query-string parameter types for API handlers.

use serde::Deserialize;

use crate::error::AppError;

/// Pagination parameters (`?offset=&limit=`).
///
/// Kept as raw strings so a non-numeric value produces the regular JSON
/// error body instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl PaginationParams {
    /// Parse into `(offset, limit)`. Absent values become `0` (no clause).
    pub fn parse(&self) -> Result<(i64, i64), AppError> {
        Ok((
            parse_count("offset", self.offset.as_deref())?,
            parse_count("limit", self.limit.as_deref())?,
        ))
    }
}

fn parse_count(name: &str, raw: Option<&str>) -> Result<i64, AppError> {
    match raw {
        None => Ok(0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("{name} must be a number"))),
    }
}
