//! Error types for content-model interpretation and code generation

use thiserror::Error;

/// Why a content-model expression could not be interpreted.
///
/// Offsets are byte offsets into the trimmed expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentModelError {
    #[error("empty content model")]
    Empty,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter { found: String, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("content model ends early at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("group opened at offset {offset} is never closed")]
    UnclosedGroup { offset: usize },

    #[error("',' and '|' mixed in one group at offset {offset}")]
    MixedConnectors { offset: usize },

    #[error("groups nested too deeply at offset {offset}")]
    TooDeep { offset: usize },
}

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Unknown target '{0}'")]
    EmitterNotFound(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::Serialization(err.to_string())
    }
}
