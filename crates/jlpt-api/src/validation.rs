use serde::Deserialize;

use crate::error::ApiError;

/// Default number of due items returned by the review queue
pub const DEFAULT_DUE_LIMIT: i64 = 20;
/// Largest review queue a client may request
pub const MAX_DUE_LIMIT: i64 = 100;

/// Validate a JLPT level, N5 (easiest) through N1
///
/// # Examples
/// ```
/// use jlpt_api::validation::validate_jlpt_level;
///
/// assert!(validate_jlpt_level(5).is_ok());
/// assert!(validate_jlpt_level(6).is_err());
/// ```
pub fn validate_jlpt_level(level: i32) -> Result<(), ApiError> {
    if !(1..=5).contains(&level) {
        return Err(ApiError::Validation(format!(
            "Invalid JLPT level: {level}. Must be between 1 and 5"
        )));
    }

    Ok(())
}

/// Resolve the `limit` query parameter of the review queue
pub fn resolve_due_limit(limit: Option<i64>) -> Result<i64, ApiError> {
    match limit {
        None => Ok(DEFAULT_DUE_LIMIT),
        Some(limit) if (1..=MAX_DUE_LIMIT).contains(&limit) => Ok(limit),
        Some(limit) => Err(ApiError::Validation(format!(
            "Invalid limit: {limit}. Must be between 1 and {MAX_DUE_LIMIT}"
        ))),
    }
}

/// `?jlpt_level=` filter shared by the content listings
#[derive(Debug, Default, Deserialize)]
pub struct LevelQuery {
    pub jlpt_level: Option<i32>,
}

impl LevelQuery {
    pub fn level(&self) -> Result<Option<i32>, ApiError> {
        if let Some(level) = self.jlpt_level {
            validate_jlpt_level(level)?;
        }
        Ok(self.jlpt_level)
    }
}
