use thiserror::Error;

/// Errors that can occur when reading annotations through a type-erased symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The caller asserted a value type that the symbol does not declare
    #[error("symbol `{symbol}` declares values of type `{actual}`, not `{asserted}`")]
    TypeMismatch {
        /// Name of the symbol that was queried
        symbol: String,
        /// The value type the caller asserted
        asserted: &'static str,
        /// The value type the symbol actually declares
        actual: &'static str,
    },
}

/// Result type for annotation lookups that can fail.
pub type Result<T> = std::result::Result<T, AnnotationError>;
