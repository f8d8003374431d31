//! Credential loading and validation
//!
//! The bot needs three secrets before it may start polling. They are read
//! once, through a lookup function so that tests never touch the process
//! environment.

use std::fmt;
use thiserror::Error;

/// Review API OAuth token
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Telegram bot token
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Telegram chat that receives notifications
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Required variables, in the order they are checked
pub const REQUIRED_VARIABLES: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("missing environment variable: \"{0}\"")]
    Missing(&'static str),
}

/// Secrets required by the bot
///
/// Immutable once loaded. `Debug` never prints the token values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Loads credentials through `lookup`, failing on the first missing or
    /// empty value
    pub fn load<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &'static str| -> Result<String, CredentialsError> {
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => {
                    tracing::error!("missing environment variable: \"{}\"", name);
                    Err(CredentialsError::Missing(name))
                }
            }
        };

        Ok(Self {
            practicum_token: fetch(PRACTICUM_TOKEN)?,
            telegram_token: fetch(TELEGRAM_TOKEN)?,
            telegram_chat_id: fetch(TELEGRAM_CHAT_ID)?,
        })
    }

    /// Loads credentials from the process environment
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::load(|name| std::env::var(name).ok())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Returns true only if every required variable is present and non-empty
///
/// Logs the first missing name.
pub fn check_tokens<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    Credentials::load(lookup).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_check_tokens_all_combinations() {
        for mask in 0u8..8 {
            let pairs: Vec<(&str, &str)> = REQUIRED_VARIABLES
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, name)| (*name, "value"))
                .collect();

            let expected = mask == 0b111;
            assert_eq!(
                check_tokens(lookup_from(&pairs)),
                expected,
                "mask {:03b}",
                mask
            );
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let lookup = lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, ""),
            (TELEGRAM_CHAT_ID, "42"),
        ]);
        assert!(!check_tokens(&lookup));
        assert_eq!(
            Credentials::load(&lookup),
            Err(CredentialsError::Missing(TELEGRAM_TOKEN))
        );
    }

    #[test]
    fn test_load_reports_first_missing() {
        let lookup = lookup_from(&[(TELEGRAM_TOKEN, "t")]);
        assert_eq!(
            Credentials::load(lookup),
            Err(CredentialsError::Missing(PRACTICUM_TOKEN))
        );
    }

    #[test]
    fn test_load_success() {
        let creds = Credentials::load(lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, "t"),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap();
        assert_eq!(creds.practicum_token, "p");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let creds = Credentials {
            practicum_token: "secret-p".to_string(),
            telegram_token: "secret-t".to_string(),
            telegram_chat_id: "42".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("42"));
    }
}
