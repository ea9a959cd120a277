//! Traits implemented by configuration targets.
//!
//! [`Configurable`] is the entry point: it declares a type's [`Shape`], how
//! to construct and parse it, and which converter building block handles it.
//! Complex types additionally implement [`ConfigObject`] to bind their
//! properties, and container-like complex types implement
//! [`ConfigCollection`] or [`ConfigDictionary`] to expose an add operation.
//!
//! Implementations are provided for primitives, strings, paths, durations,
//! UUIDs, chrono date types, `Option`, `Vec`, and the standard collections
//! and maps. Structs usually derive both traits with
//! `#[derive(Configurable)]`.

mod containers;
mod scalar;
mod temporal;


pub use temporal::parse_duration;

use crate::conversion::{ConversionInstance, ConversionResult};
use crate::converter::Converter;
use crate::shape::Shape;
use crate::tree::ConfigSection;
use crate::{BindResult, Culture, ParseFailure};

/// A type that can be produced from a configuration tree.
pub trait Configurable: Sized + 'static {
    /// Shape used to dispatch conversion.
    fn shape() -> Shape;

    /// Name reported in diagnostics.
    #[must_use]
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the type can represent an explicit null itself.
    #[must_use]
    fn nullable() -> bool {
        false
    }

    /// Build an instance without configuration data.
    ///
    /// Returns `None` when the type cannot be built this way, for example a
    /// boxed trait object; such types need a factory-backed creator.
    fn construct() -> Option<Self>;

    /// The value an explicit null converts to, if the type has one.
    #[must_use]
    fn null() -> Option<Self> {
        None
    }

    /// Whether this value is the type's null.
    fn is_null(&self) -> bool {
        false
    }

    /// Value used for array slots that no configuration entry fills.
    #[must_use]
    fn default_slot() -> Option<Self> {
        Self::null().or_else(Self::construct)
    }

    /// Parse a scalar string.
    ///
    /// Returns `None` when the type has no string form; the converter then
    /// treats the scalar as carrying no information.
    fn parse(_raw: &str, _culture: &Culture) -> Option<Result<Self, ParseFailure>> {
        None
    }

    /// Convert `section`, reusing `instance` when one exists.
    ///
    /// Implementations delegate to one of the [`Converter`] building blocks
    /// matching their shape.
    ///
    /// # Errors
    ///
    /// Returns an error for fatal conditions such as parse failures or nulls
    /// assigned to non-nullable properties.
    fn convert(
        converter: &Converter,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, Self>,
    ) -> BindResult<ConversionResult<Self>>;
}

/// A complex type whose properties are bound from child sections.
///
/// The trait is object safe so abstract targets such as
/// `Box<dyn MyService>` can forward binding to the concrete value.
pub trait ConfigObject {
    /// Fill collection or dictionary items before properties are bound.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors from item conversion.
    fn populate_items(
        &mut self,
        _converter: &Converter,
        _section: &dyn ConfigSection,
    ) -> BindResult<()> {
        Ok(())
    }

    /// Bind every declared property whose key appears in `section`.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors from property conversion.
    fn bind_properties(
        &mut self,
        converter: &Converter,
        section: &dyn ConfigSection,
    ) -> BindResult<()>;
}

/// A complex type populated from indexed children through an add operation.
pub trait ConfigCollection {
    /// Element type.
    type Item: Configurable;

    /// The operation appending one element, `None` if the type has none.
    fn add_method() -> Option<fn(&mut Self, Self::Item)>;
}

/// A complex type populated from keyed children through an add operation.
pub trait ConfigDictionary {
    /// Key type, parsed from each child's key.
    type Key: Configurable;
    /// Value type, converted from each child's sub-tree.
    type Value: Configurable;

    /// The operation inserting one entry, `None` if the type has none.
    fn add_method() -> Option<fn(&mut Self, Self::Key, Self::Value)>;
}
