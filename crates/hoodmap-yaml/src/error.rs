//! Error types for manifest parsing and validation.

use hoodmap_core::{AliasError, DirectoryError};

/// Error type for map manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Neighbourhood table breaks a directory invariant
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
    /// Alias points at an unknown slug or re-points a display name
    #[error("Alias error: {0}")]
    Alias(#[from] AliasError),
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ManifestError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_manifest_error_display() {
        let err = ManifestError::MissingField("hoodmap".to_string());
        assert_eq!(err.to_string(), "Missing required field: hoodmap");

        let err = ManifestError::invalid("boundaries.target", "required in focused mode");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'boundaries.target': required in focused mode"
        );

        let err = ManifestError::from(DirectoryError::DuplicateSlug("oakridge".into()));
        assert_eq!(err.to_string(), "Directory error: duplicate slug 'oakridge'");
    }

    #[test]
    fn test_yaml_error_has_source() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        let err = ManifestError::from(yaml_err);
        assert!(err.source().is_some());
    }
}
