use std::io;

use thiserror::Error;

use crate::domain::{RecordId, RecordKind};

/// Failures raised when a snapshot or a pending mutation breaks a table invariant.
///
/// Every variant is recoverable; callers decide whether to reload, keep the
/// user on the current form, or abort the pending transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{kind} table is invalid: {reason}")]
    TableInvalid {
        kind: RecordKind,
        reason: String,
        offending: Option<RecordId>,
    },
    #[error("invalid {kind} property `{property}` = `{value}`: {hint}")]
    InvalidRecordProperty {
        kind: RecordKind,
        property: &'static str,
        value: String,
        hint: String,
    },
    #[error("{kind} {id} not found")]
    RecordNotFound { kind: RecordKind, id: RecordId },
    #[error("cannot delete {kind} {id}: {reason}")]
    RecordDeletionUnsafe {
        kind: RecordKind,
        id: RecordId,
        reason: String,
    },
}

impl ValidationError {
    pub fn table(kind: RecordKind, reason: impl Into<String>, offending: Option<RecordId>) -> Self {
        ValidationError::TableInvalid {
            kind,
            reason: reason.into(),
            offending,
        }
    }

    pub fn property(
        kind: RecordKind,
        property: &'static str,
        value: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidRecordProperty {
            kind,
            property,
            value: value.to_string(),
            hint: hint.into(),
        }
    }

    pub fn not_found(kind: RecordKind, id: RecordId) -> Self {
        ValidationError::RecordNotFound { kind, id }
    }

    pub fn deletion(kind: RecordKind, id: RecordId, reason: impl Into<String>) -> Self {
        ValidationError::RecordDeletionUnsafe {
            kind,
            id,
            reason: reason.into(),
        }
    }

    /// Table the failure was raised for.
    pub fn kind(&self) -> RecordKind {
        match self {
            ValidationError::TableInvalid { kind, .. }
            | ValidationError::InvalidRecordProperty { kind, .. }
            | ValidationError::RecordNotFound { kind, .. }
            | ValidationError::RecordDeletionUnsafe { kind, .. } => *kind,
        }
    }
}

/// Errors raised while loading or saving [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}
