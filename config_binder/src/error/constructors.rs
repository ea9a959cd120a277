//! Constructors for `BindError` and `ParseError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{BindError, ParseError, ParseFailure};

impl ParseError {
    /// Wrap a parser failure with the target type and the raw string.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::ParseError;
    /// let source = "abc".parse::<i32>().unwrap_err();
    /// let err = ParseError::new("i32", "abc", source);
    /// assert_eq!(err.raw, "abc");
    /// ```
    #[must_use]
    pub fn new(
        type_name: &'static str,
        raw: impl Into<String>,
        source: impl Into<ParseFailure>,
    ) -> Self {
        Self {
            type_name,
            raw: raw.into(),
            source: source.into(),
        }
    }
}

impl BindError {
    /// Attach a tree path to a parse failure.
    #[must_use]
    pub fn parse(path: impl Into<String>, source: ParseError) -> Arc<Self> {
        Arc::new(Self::Parse {
            path: path.into(),
            source,
        })
    }

    /// Null assigned to a type that cannot hold it.
    #[must_use]
    pub fn null_not_allowed(type_name: &'static str, path: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::NullNotAllowed {
            type_name,
            path: path.into(),
        })
    }

    /// Instance creation failed where an instance is required.
    #[must_use]
    pub fn instantiation(type_name: &'static str, path: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Instantiation {
            type_name,
            path: path.into(),
        })
    }

    /// A creator returned a value of an unexpected type.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, path: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::TypeMismatch {
            expected,
            path: path.into(),
        })
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::BindError;
    /// let fe = figment::Error::from("boom");
    /// let e = BindError::gathering(fe);
    /// assert!(matches!(e, BindError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }
}
