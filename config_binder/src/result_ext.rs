//! Extensions for mapping errors to `BindResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(BindError::…(e)))`
//! patterns when converting external error types into the crate's
//! `BindResult<T>` alias (`Result<T, Arc<BindError>>`).
//!
//! # Examples
//!
//! ```
//! use config_binder::{BindResult, BindResultExt};
//!
//! fn parse() -> BindResult<serde_json::Value> {
//!     serde_json::from_str("{\"a\": 1}").into_bind()
//! }
//! # assert!(parse().is_ok());
//! ```

use std::sync::Arc;

use crate::{BindError, BindResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<BindError>`
/// into a `BindResult<T>`.
pub trait BindResultExt<T, E> {
    /// Convert `Result<T, E>` into `BindResult<T>` using `Into<BindError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<BindError>`.
    fn into_bind(self) -> BindResult<T>;
}

impl<T, E> BindResultExt<T, E> for Result<T, E>
where
    E: Into<BindError>,
{
    fn into_bind(self) -> BindResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
