//! Pluggable instance creation.
//!
//! The converter never builds values itself. It asks an [`InstanceCreator`]
//! for a default instance, a parsed scalar, or a pre-sized array, and then
//! populates what it gets back. [`DefaultInstanceCreator`] uses the type's own
//! [`Configurable`](crate::Configurable) entry points;
//! [`FactoryInstanceCreator`] consults registered factories first, which is
//! how abstract targets and injected dependencies are supported.

use std::any::Any;
use std::fmt;

use crate::conversion::ConversionResult;
use crate::shape::TypeInfo;
use crate::{BindResult, ParseError};

mod default;
mod factory;

pub use default::DefaultInstanceCreator;
pub use factory::FactoryInstanceCreator;

#[cfg(test)]
mod tests;

/// Type-erased value handed back by a creator.
pub type Created = ConversionResult<Box<dyn Any>>;

/// Strategy for producing instances during conversion.
///
/// Implementations must be shareable across threads; converters hold them
/// behind an `Arc`.
pub trait InstanceCreator: Send + Sync + fmt::Debug {
    /// Produce a new, unpopulated instance of `info`.
    ///
    /// Returns [`ConversionResult::Invalid`] when the type cannot be built.
    ///
    /// # Errors
    ///
    /// Returns an error when a registered construction step fails or the
    /// type is required to be registered.
    fn create(&self, info: &TypeInfo) -> BindResult<Created>;

    /// Parse `raw` into an instance of `info`.
    ///
    /// Blank input for a nullable type is [`ConversionResult::Null`]. A type
    /// without a string form yields [`ConversionResult::Invalid`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the type and the raw input when the
    /// type's parser rejects it.
    fn create_from_str(&self, info: &TypeInfo, raw: &str) -> Result<Created, ParseError>;

    /// Produce a `Vec` of `len` default slots of `element`.
    ///
    /// The converter asks only for the slots no configuration entry fills,
    /// so `len` counts the gaps of a sparse array.
    ///
    /// Returns [`ConversionResult::Invalid`] when the element type cannot
    /// fill a slot without configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a registered construction step fails.
    fn create_array(&self, element: &TypeInfo, len: usize) -> BindResult<Created>;
}
