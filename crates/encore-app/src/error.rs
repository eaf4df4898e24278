// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Inquiry,
    Notification,
    Artist,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inquiry => "inquiry",
            Self::Notification => "notification",
            Self::Artist => "artist",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Failures a data-layer call can report back to a view.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("{context}: {source}")]
    TransientIo {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("{field}: {reason}")]
    ValidationRejected { field: &'static str, reason: String },
}

impl DataError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn transient(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::TransientIo {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn rejected(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationRejected {
            field,
            reason: reason.into(),
        }
    }

    pub fn rejected_field(&self) -> Option<&'static str> {
        match self {
            Self::ValidationRejected { field, .. } => Some(field),
            _ => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type DataResult<T> = std::result::Result<T, DataError>;
