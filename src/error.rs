use once_cell::sync::Lazy;
use regex::Regex;
use snowflake_driver::{DeserializeError, StatementError};

use crate::config::ConfigError;
use crate::context::CancelReason;
use crate::identifier::IdentifierError;
use crate::validation::ValidationErrors;

static NOT_EXIST_OR_NOT_AUTHORIZED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(does not exist or not authorized|does not exist|not authorized)")
        .expect("valid regex")
});

/// Every failure surfaced by the SDK.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("options must not be empty")]
    NilOptions,
    #[error(transparent)]
    InvalidObjectIdentifier(#[from] IdentifierError),
    #[error("object does not exist or not authorized: {message}")]
    ObjectNotExistOrAuthorized { message: String },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{}", remote_message(.code, .sql_state, .message))]
    Remote {
        code: String,
        sql_state: String,
        message: String,
    },
    #[error("network error: {0}")]
    Network(#[source] StatementError),
    #[error(transparent)]
    Cancelled(#[from] CancelReason),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Decode(#[from] DeserializeError),
}

fn remote_message(code: &str, sql_state: &str, message: &str) -> String {
    match (code.is_empty(), sql_state.is_empty()) {
        (true, _) => message.to_string(),
        (false, true) => format!("{code}: {message}"),
        (false, false) => format!("{code} ({sql_state}): {message}"),
    }
}

impl Error {
    pub(crate) fn object_not_found(what: impl std::fmt::Display) -> Self {
        Error::ObjectNotExistOrAuthorized {
            message: format!("{what} does not exist or not authorized"),
        }
    }

    pub fn is_object_not_exist_or_authorized(&self) -> bool {
        matches!(self, Error::ObjectNotExistOrAuthorized { .. })
    }

    pub fn is_invalid_identifier(&self) -> bool {
        match self {
            Error::InvalidObjectIdentifier(_) => true,
            Error::Validation(errors) => errors.has_invalid_identifier(),
            _ => false,
        }
    }

    pub fn is_different_database(&self) -> bool {
        matches!(self, Error::Validation(errors) if errors.has_different_database())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NilOptions)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl From<StatementError> for Error {
    fn from(error: StatementError) -> Self {
        match error {
            StatementError::Query(failure)
                if NOT_EXIST_OR_NOT_AUTHORIZED.is_match(failure.message()) =>
            {
                Error::ObjectNotExistOrAuthorized {
                    message: failure.message().to_string(),
                }
            }
            StatementError::Query(failure) => Error::Remote {
                code: failure.code().to_string(),
                sql_state: failure.sql_state().to_string(),
                message: failure.message().to_string(),
            },
            StatementError::Unknown { status, body } => Error::Remote {
                code: status.as_u16().to_string(),
                sql_state: String::new(),
                message: body,
            },
            // The server answered, so this is not worth a retry.
            StatementError::Decode(error) => Error::Remote {
                code: String::new(),
                sql_state: String::new(),
                message: format!("failed to decode the response: {error}"),
            },
            error => Error::Network(error),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use snowflake_driver::QueryFailureStatus;

    #[test]
    fn missing_objects_are_classified() {
        let error = Error::from(StatementError::Query(QueryFailureStatus::new(
            "002003",
            "02000",
            "SQL compilation error:\nDatabase role '\"DB1\".\"ROLE1\"' does not exist or not authorized.",
        )));
        assert!(error.is_object_not_exist_or_authorized());
    }

    #[test]
    fn other_failures_keep_code_and_state() {
        let error = Error::from(StatementError::Query(QueryFailureStatus::new(
            "001003",
            "42000",
            "SQL compilation error: syntax error",
        )));
        match error {
            Error::Remote {
                code,
                sql_state,
                message,
            } => {
                assert_eq!(code, "001003");
                assert_eq!(sql_state, "42000");
                assert!(message.contains("syntax error"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn remote_messages_skip_missing_parts() {
        let remote = |code: &str, sql_state: &str| Error::Remote {
            code: code.into(),
            sql_state: sql_state.into(),
            message: "boom".into(),
        };
        assert_eq!(remote("001003", "42000").to_string(), "001003 (42000): boom");
        assert_eq!(remote("503", "").to_string(), "503: boom");
        assert_eq!(remote("", "").to_string(), "boom");
    }

    #[test]
    fn predicates_look_inside_validation() {
        let mut errors = ValidationErrors::default();
        crate::validation::same_database(&mut errors, "S", "rename", "A", "B");
        let error = Error::from(errors);
        assert!(error.is_different_database());
        assert!(error.is_validation());
        assert!(!error.is_invalid_identifier());
        assert!(Error::from(IdentifierError::Empty).is_invalid_identifier());
        assert!(Error::from(CancelReason::DeadlineExceeded).is_cancelled());
    }
}
