//! Primary error enum for binding flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Boxed cause reported by a scalar parser or a factory closure.
pub type ParseFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A scalar string could not be converted into its target type.
///
/// Carries the target type and the failing raw string so callers can report
/// the offending configuration value. The parser's own error is kept as the
/// source.
#[derive(Debug, Error)]
#[error("cannot convert '{raw}' to {type_name}: {source}")]
pub struct ParseError {
    /// Name of the type the string was being converted into.
    pub type_name: &'static str,
    /// Raw configuration text that failed to parse.
    pub raw: String,
    /// Underlying parser failure.
    #[source]
    pub source: ParseFailure,
}

/// Errors that abort a conversion.
///
/// Recoverable structural mismatches (bad indices, missing add operations,
/// read-only properties without an instance) are logged and skipped instead
/// of surfacing here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A scalar value failed to parse.
    #[error("failed to convert configuration at '{path}': {source}")]
    Parse {
        /// Location of the offending value within the tree.
        path: String,
        /// Parser failure with type and raw value.
        #[source]
        source: ParseError,
    },

    /// An explicit null reached a type that cannot represent it.
    #[error("cannot assign null to non-nullable type {type_name}. Path: '{path}'")]
    NullNotAllowed {
        /// Name of the non-nullable target type.
        type_name: &'static str,
        /// Location of the null value within the tree.
        path: String,
    },

    /// A required instance could not be created.
    #[error("could not create an instance of type {type_name} at '{path}'")]
    Instantiation {
        /// Name of the type that could not be created.
        type_name: &'static str,
        /// Location of the section being converted.
        path: String,
    },

    /// A type routed through the factory creator has no registration.
    #[error("no factory registered for type {type_name}")]
    NotRegistered {
        /// Name of the unregistered type.
        type_name: &'static str,
    },

    /// A registered factory failed to produce an instance.
    #[error("factory for type {type_name} failed: {source}")]
    Factory {
        /// Name of the type the factory was asked to build.
        type_name: &'static str,
        /// Error returned by the factory closure.
        #[source]
        source: ParseFailure,
    },

    /// An instance creator produced a value of the wrong type.
    #[error("instance creator returned a value that is not a {expected} at '{path}'")]
    TypeMismatch {
        /// Name of the type the converter expected.
        expected: &'static str,
        /// Location of the section being converted.
        path: String,
    },

    /// The configuration could not be converted into the requested type.
    #[error("the configuration of type {type_name} could not be deserialized")]
    Unconvertible {
        /// Name of the requested type.
        type_name: &'static str,
    },

    /// The layered converter received no fragments.
    #[error("at least one configuration fragment is required")]
    NoFragments,

    /// Error while gathering configuration from figment providers.
    #[error("failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
