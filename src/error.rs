//! Custom error types for flashdeck
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for flashdeck operations
#[derive(Error, Debug)]
pub enum FlashdeckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(String),

    /// Generic validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// A card term was empty after trimming
    #[error("Card term cannot be empty")]
    EmptyTerm,

    /// A set name was empty after trimming
    #[error("Set name cannot be empty")]
    EmptySetName,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A study session was requested over no cards
    #[error("There are no cards to study")]
    EmptyDeck,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FlashdeckError {
    /// Create a "not found" error for sets
    pub fn set_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Set",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for a set name
    pub fn duplicate_set(name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Set",
            identifier: name.into(),
        }
    }

    /// Create a "duplicate" error for a card term
    pub fn duplicate_term(term: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Card",
            identifier: term.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (bad input, duplicates)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::EmptyTerm | Self::EmptySetName | Self::Duplicate { .. }
        )
    }

    /// Check if this error came from reading or writing persistent state
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Json(_) | Self::Database(_) | Self::Storage(_) | Self::Config(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FlashdeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FlashdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for FlashdeckError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias for flashdeck operations
pub type FlashdeckResult<T> = Result<T, FlashdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlashdeckError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FlashdeckError::set_not_found("Spanish");
        assert_eq!(err.to_string(), "Set not found: Spanish");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_is_validation() {
        let err = FlashdeckError::duplicate_term("Cat");
        assert_eq!(err.to_string(), "Card already exists: Cat");
        assert!(err.is_validation());
        assert!(FlashdeckError::EmptyTerm.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FlashdeckError = io_err.into();
        assert!(matches!(err, FlashdeckError::Io(_)));
        assert!(err.is_persistence());
    }
}
