//! Store and storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// Failures of a store mutation.
///
/// A `Persist` error is reported after the in-memory state was already
/// updated; only the write to storage failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate id `{id}` in {collection}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("no entry with id `{id}` in {collection}")]
    UnknownId { collection: &'static str, id: String },

    #[error("failed to encode `{key}`")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to persist `{key}`")]
    Persist {
        key: &'static str,
        #[source]
        source: StorageError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_store_error_display() {
        let err = StoreError::DuplicateId {
            collection: "destinations",
            id: "2".into(),
        };
        assert_eq!(err.to_string(), "duplicate id `2` in destinations");

        let err = StoreError::Persist {
            key: "site_blogs",
            source: StorageError::Io(
                PathBuf::from("data/site_blogs.json"),
                Error::new(ErrorKind::PermissionDenied, "denied"),
            ),
        };
        assert!(err.to_string().contains("site_blogs"));
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("data/site_blogs.json"));
    }
}
