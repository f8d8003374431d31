//! Poll cycle errors
//!
//! Every failure inside a cycle is tagged so the loop can tell a flaky
//! network from an API that changed its contract.

use homework_client::ClientError;
use homework_core::domain::StatusError;
use homework_core::dto::ResponseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("request to the homework API failed: {0}")]
    Network(#[from] ClientError),

    #[error("unexpected homework API response: {0}")]
    Schema(#[from] ResponseError),

    #[error("cannot build notification: {0}")]
    Status(#[from] StatusError),
}

/// Broad class of a cycle failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure or non-200 status
    Network,
    /// Body did not have the expected shape
    Schema,
    /// Record carried a status outside the known set
    UnknownStatus,
}

impl FailureKind {
    /// True for failures that point at an API contract change rather than
    /// a transient outage
    pub fn is_contract(&self) -> bool {
        matches!(self, FailureKind::Schema | FailureKind::UnknownStatus)
    }
}

impl CycleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CycleError::Network(e) if e.is_transport() || e.status().is_some() => {
                FailureKind::Network
            }
            CycleError::Network(_) => FailureKind::Schema,
            CycleError::Schema(_) => FailureKind::Schema,
            CycleError::Status(StatusError::UnknownStatus(_)) => FailureKind::UnknownStatus,
            CycleError::Status(_) => FailureKind::Schema,
        }
    }

    /// Short headline for the failure log line
    pub fn summary(&self) -> &'static str {
        match self {
            CycleError::Network(e) if e.is_timeout() => "Homework API timed out",
            CycleError::Network(e) if e.is_server_error() => "Homework API unavailable",
            CycleError::Network(e) if e.is_client_error() => {
                "Homework API rejected the request, check PRACTICUM_TOKEN"
            }
            _ => "Bot failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        let unavailable: CycleError = ClientError::api_error(503, "").into();
        assert_eq!(unavailable.kind(), FailureKind::Network);
        assert!(!unavailable.kind().is_contract());

        let bad_json: CycleError = ClientError::ParseError("eof".to_string()).into();
        assert_eq!(bad_json.kind(), FailureKind::Schema);

        let not_a_list: CycleError = ResponseError::NotAList.into();
        assert_eq!(not_a_list.kind(), FailureKind::Schema);

        let not_an_object: CycleError = StatusError::NotAnObject.into();
        assert_eq!(not_an_object.kind(), FailureKind::Schema);

        let missing_status: CycleError = StatusError::MissingStatus.into();
        assert_eq!(missing_status.kind(), FailureKind::Schema);

        let unknown: CycleError = StatusError::UnknownStatus("lost".to_string()).into();
        assert_eq!(unknown.kind(), FailureKind::UnknownStatus);
        assert!(unknown.kind().is_contract());
    }

    #[test]
    fn test_summary_by_status() {
        let unavailable: CycleError = ClientError::api_error(503, "").into();
        assert_eq!(unavailable.summary(), "Homework API unavailable");

        let unauthorized: CycleError = ClientError::api_error(401, "").into();
        assert_eq!(
            unauthorized.summary(),
            "Homework API rejected the request, check PRACTICUM_TOKEN"
        );

        let not_a_list: CycleError = ResponseError::NotAList.into();
        assert_eq!(not_a_list.summary(), "Bot failure");
    }

    #[test]
    fn test_message_embeds_cause() {
        let err: CycleError = ClientError::api_error(503, "down").into();
        assert_eq!(
            err.to_string(),
            "request to the homework API failed: API error (status 503): down"
        );
    }
}
