//! Error types for filter operations

use thiserror::Error;

/// Errors that can occur while building, walking or (de)serializing documents
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// An element constructor was called with the wrong number of arguments
    #[error("{tag} expects {expected} arguments, but was given {actual}")]
    ArityMismatch {
        tag: String,
        expected: usize,
        actual: usize,
    },
    /// The input could not be read as a pandoc JSON document
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The rewritten document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A rewrite action reported a failure
    #[error("Action '{action}' failed: {message}")]
    Action { action: String, message: String },
}

impl FilterError {
    /// Convenience constructor for failures raised inside an [`crate::Action`].
    pub fn action(action: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::Action {
            action: action.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_mismatch_names_tag_and_counts() {
        let err = FilterError::ArityMismatch {
            tag: "Para".to_string(),
            expected: 1,
            actual: 0,
        };
        assert_eq!(err.to_string(), "Para expects 1 arguments, but was given 0");
    }

    #[test]
    fn action_error_carries_action_name() {
        let err = FilterError::action("code-listing", "bad attr");
        assert_eq!(err.to_string(), "Action 'code-listing' failed: bad attr");
    }
}
