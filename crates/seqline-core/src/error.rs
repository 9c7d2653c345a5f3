use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Closed set of failure kinds, for callers that match on the category only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    DuplicateKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A source (or a factory handed to a typed wrapper) had the wrong shape.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// A unique-key projection saw the same key twice.
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },
}

impl Error {
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    pub fn duplicate_key(key: impl std::fmt::Debug) -> Self {
        Error::DuplicateKey {
            key: format!("{:?}", key),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::DuplicateKey { .. } => ErrorKind::DuplicateKey,
        }
    }
}
