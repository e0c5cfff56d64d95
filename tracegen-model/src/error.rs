//! Configuration errors reported at declaration time.
//!
//! Every variant corresponds to a declaration mistake that would otherwise
//! surface as a cryptic C compile failure in the generated artifacts, so
//! all of them abort the generation run at registration time.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The generated code derives C symbol names from tracepoint names, so
    /// a collision means duplicate symbols downstream.
    #[error("duplicate tracepoint name \"{0}\"")]
    DuplicateTracepoint(String),

    #[error("\"{0}\" is not a valid C identifier")]
    InvalidName(String),

    #[error("tracepoint \"{tracepoint}\": argument \"{argument}\" is not a valid C identifier or has an empty capture expression")]
    InvalidArgument { tracepoint: String, argument: String },

    #[error("tracepoint \"{tracepoint}\": duplicate argument name \"{argument}\"")]
    DuplicateArgument { tracepoint: String, argument: String },

    #[error("tracepoint \"{tracepoint}\": argument \"{argument}\" has no format specifier")]
    MissingFormat { tracepoint: String, argument: String },

    /// Conversion expressions are opaque, but they must contain a `{}`
    /// placeholder for the stored value or the formatting code cannot be
    /// generated.
    #[error("tracepoint \"{tracepoint}\": conversion for argument \"{argument}\" has no {{}} placeholder")]
    MalformedConversion { tracepoint: String, argument: String },

    /// Inline arguments and a capture record are alternative capture
    /// strategies for the same payload.
    #[error("tracepoint \"{0}\": inline arguments and a capture record are mutually exclusive")]
    ConflictingCapture(String),

    #[error("tracepoint \"{0}\": signature parameters require a capture record")]
    DanglingParams(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tracepoint_display() {
        let err = ModelError::DuplicateTracepoint("end_blit".to_string());
        assert_eq!(err.to_string(), "duplicate tracepoint name \"end_blit\"");
    }

    #[test]
    fn test_malformed_conversion_display() {
        let err = ModelError::MalformedConversion {
            tracepoint: "end_gmem_clear".to_string(),
            argument: "format".to_string(),
        };
        assert!(err.to_string().contains("end_gmem_clear"));
        assert!(err.to_string().contains("{}"));
    }
}
