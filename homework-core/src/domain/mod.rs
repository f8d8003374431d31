//! Core domain types
//!
//! These types describe what the bot knows about a submission and the
//! secrets it needs to talk to the outside world. They are shared between
//! the API client (which produces them) and the bot (which acts on them).

pub mod credentials;
pub mod homework;

pub use credentials::{Credentials, CredentialsError, check_tokens};
pub use homework::{Homework, HomeworkStatus, StatusError, parse_status};
