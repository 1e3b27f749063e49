//! Error types

/// Error returned for a malformed field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path was the empty string.
    #[error("Path must not be empty")]
    Empty,

    /// The path contains an empty segment (`"a..b"`, `".a"`, `"a."`).
    #[error("Path '{path}' has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },
}

impl PathError {
    /// Creates a new empty segment error.
    pub fn empty_segment(path: impl Into<String>, index: usize) -> Self {
        Self::EmptySegment {
            path: path.into(),
            index,
        }
    }
}

/// Error converting between a typed model and a form [`Value`](crate::value::Value).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model could not be serialized or deserialized.
    #[error("Model conversion failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The model did not serialize to an object.
    #[error("Model must serialize to an object, got {actual}")]
    NotAnObject { actual: &'static str },
}
