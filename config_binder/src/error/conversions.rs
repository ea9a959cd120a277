//! Trait-based conversions between external error types and `BindError`.

use figment::Error as FigmentError;

use super::BindError;

impl From<FigmentError> for BindError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<BindError> for FigmentError {
    /// Allow using `?` in tests that return `figment::Error`.
    fn from(e: BindError) -> Self {
        match e {
            BindError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
