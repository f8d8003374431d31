//! Data Transfer Objects
//!
//! Wire-level shapes returned by the review API, together with the checks
//! that turn a raw JSON body into domain records.

pub mod homework;

pub use homework::{HOMEWORKS_KEY, HomeworkStatuses, ResponseError, check_response};
