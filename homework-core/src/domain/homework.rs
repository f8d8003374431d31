//! Homework domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Template of the notification sent when a review status changes
const STATUS_CHANGED_TEMPLATE: &str = "Изменился статус проверки работы";

/// One submission record as reported by the review API
///
/// Both fields are optional; their presence is checked by [`parse_status`]
/// so a record missing a field fails with a precise error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Homework {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

impl Homework {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    /// Reads a raw API record
    ///
    /// Only an object is accepted. Non-string field values are kept in
    /// their JSON text form, so `"status": 3` becomes the unknown status
    /// `"3"` instead of a shape error.
    pub fn from_record(record: &JsonValue) -> Result<Self, StatusError> {
        let object = record.as_object().ok_or(StatusError::NotAnObject)?;
        let text = |key: &str| match object.get(key) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            homework_name: text("homework_name"),
            status: text("status"),
        })
    }
}

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Status code as sent by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusError::UnknownStatus(s.to_string()))
    }
}

/// Errors raised while turning a record into a notification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("homework record is not a JSON object")]
    NotAnObject,

    #[error("missing key \"status\" in API response")]
    MissingStatus,

    #[error("missing key \"homework_name\" in API response")]
    MissingName,

    #[error("unknown homework status in API response: \"{0}\"")]
    UnknownStatus(String),
}

/// Builds the notification text for a single submission record
///
/// Fails if the record has no status, no name, or a status outside the
/// known set. Nothing is sent on failure; the caller decides what to do.
pub fn parse_status(homework: &Homework) -> Result<String, StatusError> {
    let result = format_record(homework);
    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    result
}

fn format_record(homework: &Homework) -> Result<String, StatusError> {
    let raw_status = homework
        .status
        .as_deref()
        .ok_or(StatusError::MissingStatus)?;
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(StatusError::MissingName)?;
    let status: HomeworkStatus = raw_status.parse()?;

    Ok(format!(
        "{} \"{}\". {}",
        STATUS_CHANGED_TEMPLATE,
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status_approved() {
        let message = parse_status(&Homework::new("hw1", "approved")).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_parse_status_reviewing() {
        let message = parse_status(&Homework::new("hw1", "reviewing")).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn test_parse_status_rejected() {
        let message = parse_status(&Homework::new("project_x", "rejected")).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"project_x\". Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn test_parse_status_unknown() {
        let err = parse_status(&Homework::new("hw1", "lost")).unwrap_err();
        assert_eq!(err, StatusError::UnknownStatus("lost".to_string()));
    }

    #[test]
    fn test_parse_status_is_case_sensitive() {
        assert!(parse_status(&Homework::new("hw1", "Approved")).is_err());
    }

    #[test]
    fn test_parse_status_missing_fields() {
        let no_status = Homework {
            homework_name: Some("hw1".to_string()),
            status: None,
        };
        assert_eq!(parse_status(&no_status), Err(StatusError::MissingStatus));

        let no_name = Homework {
            homework_name: None,
            status: Some("approved".to_string()),
        };
        assert_eq!(parse_status(&no_name), Err(StatusError::MissingName));
    }

    #[test]
    fn test_from_record_reads_fields() {
        let record = json!({"homework_name": "hw1", "status": "approved", "id": 7});
        assert_eq!(
            Homework::from_record(&record),
            Ok(Homework::new("hw1", "approved"))
        );
    }

    #[test]
    fn test_from_record_non_string_status_is_unknown() {
        let homework = Homework::from_record(&json!({"homework_name": "hw1", "status": 3})).unwrap();
        assert_eq!(
            parse_status(&homework),
            Err(StatusError::UnknownStatus("3".to_string()))
        );
    }

    #[test]
    fn test_from_record_non_string_name_is_kept() {
        let homework =
            Homework::from_record(&json!({"homework_name": 17, "status": "approved"})).unwrap();
        assert_eq!(homework.homework_name.as_deref(), Some("17"));
    }

    #[test]
    fn test_from_record_null_and_missing_fields() {
        let homework = Homework::from_record(&json!({"homework_name": null})).unwrap();
        assert_eq!(homework, Homework::default());
        assert_eq!(parse_status(&homework), Err(StatusError::MissingStatus));
    }

    #[test]
    fn test_from_record_rejects_non_object() {
        assert_eq!(
            Homework::from_record(&json!(7)),
            Err(StatusError::NotAnObject)
        );
    }

    #[test]
    fn test_status_serde_uses_api_codes() {
        let status: HomeworkStatus = serde_json::from_str("\"reviewing\"").unwrap();
        assert_eq!(status, HomeworkStatus::Reviewing);
        assert_eq!(
            serde_json::to_string(&HomeworkStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }
}
