//! Error types
//!
//! Queries never fail: unknown content, tags or context degrade to empty
//! results. Errors only surface where a caller hands the engine something it
//! cannot accept, namely an out-of-range configuration or an inconsistent
//! snapshot.

/// Errors produced by the memory engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    /// A tunable is outside its valid range
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A snapshot lists the same content more than once
    #[error("Duplicate content in snapshot at entry {index}")]
    DuplicateContent { index: usize },

    /// A snapshot lists the same ordered association pair more than once
    #[error("Duplicate association in snapshot at {index}")]
    DuplicateAssociation { index: usize },

    /// A snapshot association names content with no entry
    #[error("Association {index} references content with no entry")]
    DanglingAssociation { index: usize },

    /// A context value could not be converted
    #[error("Unsupported context value: {0}")]
    UnsupportedContextValue(String),
}

pub type Result<T> = std::result::Result<T, MemoryError>;
