//! Review API response
//!
//! The API answers with a JSON object of the form
//! `{"homeworks": [{"homework_name": ..., "status": ...}, ...], "current_date": 1000}`
//! where the list is ordered most recent first.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::homework::{Homework, StatusError};

/// Key holding the list of submission records
pub const HOMEWORKS_KEY: &str = "homeworks";
/// Key holding the server timestamp used as the next cursor
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Errors raised when the response body does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("API response is not a JSON object")]
    NotAnObject,

    #[error("missing key \"{0}\" in API response")]
    MissingKey(&'static str),

    #[error("API response \"homeworks\" is not a list")]
    NotAList,

    #[error("API response contains an empty homework list")]
    Empty,
}

impl ResponseError {
    /// True when the body was well-formed but listed no submissions
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseError::Empty)
    }
}

/// A validated response
///
/// Records stay raw: only the latest one is ever read, so a malformed
/// older record never blocks a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkStatuses {
    /// Records, most recent first; never empty
    pub homeworks: Vec<JsonValue>,
    /// Server timestamp to use as the next `from_date`
    pub current_date: Option<i64>,
}

impl HomeworkStatuses {
    /// Validates a raw response body
    pub fn from_json(body: &JsonValue) -> Result<Self, ResponseError> {
        let homeworks = check_response(body)?;
        let current_date = body.get(CURRENT_DATE_KEY).and_then(JsonValue::as_i64);

        Ok(Self {
            homeworks,
            current_date,
        })
    }

    /// The most recent submission
    pub fn latest(&self) -> Result<Homework, StatusError> {
        Homework::from_record(&self.homeworks[0])
    }
}

/// Checks that `body` carries a non-empty list under [`HOMEWORKS_KEY`] and
/// returns its records in order
///
/// Records themselves are not inspected here. An empty list is reported as
/// [`ResponseError::Empty`]; callers that treat "no new submissions" as a
/// normal state should match on it.
pub fn check_response(body: &JsonValue) -> Result<Vec<JsonValue>, ResponseError> {
    let result = validate(body);
    if let Err(e) = &result {
        if e.is_empty() {
            tracing::debug!("{}", e);
        } else {
            tracing::error!("{}", e);
        }
    }
    result
}

fn validate(body: &JsonValue) -> Result<Vec<JsonValue>, ResponseError> {
    let object = body.as_object().ok_or(ResponseError::NotAnObject)?;
    let list = object
        .get(HOMEWORKS_KEY)
        .ok_or(ResponseError::MissingKey(HOMEWORKS_KEY))?
        .as_array()
        .ok_or(ResponseError::NotAList)?;

    if list.is_empty() {
        return Err(ResponseError::Empty);
    }

    Ok(list.clone())
}
