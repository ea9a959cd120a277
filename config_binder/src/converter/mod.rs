//! Tree-to-object conversion.
//!
//! [`Converter`] walks a [`ConfigSection`] and a target type together. Each
//! [`Configurable`] type routes its own conversion to the building block for
//! its shape: [`Converter::convert_simple`], [`Converter::convert_array`], or
//! [`Converter::convert_object`]. Collections and dictionaries are filled by
//! [`Converter::populate_collection`] and [`Converter::populate_dictionary`]
//! before their properties are bound.
//!
//! Fatal conditions (parse failures, nulls assigned to non-nullable
//! properties, required instances that cannot be created) abort the call.
//! Structural mismatches are logged with `tracing` and skipped.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::conversion::{ConversionInstance, ConversionResult};
use crate::creator::{DefaultInstanceCreator, InstanceCreator};
use crate::shape::{TypeInfo, downcast, typed_result};
use crate::tree::{ConfigSection, EmptyBranch, SectionKind};
use crate::{BindError, BindResult, Configurable, Culture};

mod array;
mod object;


/// Whether a property can be assigned or only populated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAccess {
    /// The property can be replaced.
    ReadWrite,
    /// The property has no setter; only its existing instance can be filled.
    ReadOnly,
}

/// Identifies a property being bound, for lookups and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Name of the owning type.
    pub owner: &'static str,
    /// Configuration key of the property.
    pub name: &'static str,
    /// Assignment rights.
    pub access: PropertyAccess,
}

impl PropertyInfo {
    /// A property with a setter.
    #[must_use]
    pub const fn read_write(owner: &'static str, name: &'static str) -> Self {
        Self {
            owner,
            name,
            access: PropertyAccess::ReadWrite,
        }
    }

    /// A property without a setter.
    #[must_use]
    pub const fn read_only(owner: &'static str, name: &'static str) -> Self {
        Self {
            owner,
            name,
            access: PropertyAccess::ReadOnly,
        }
    }
}

/// Converts configuration trees into typed values.
///
/// Cloning is cheap; the instance creator is shared.
///
/// # Examples
///
/// ```
/// use config_binder::{Converter, JsonSection};
/// use serde_json::json;
///
/// let doc = json!({"0": "42", "2": "43"});
/// let values: Vec<i32> = Converter::new().convert(&JsonSection::new(&doc))?;
/// assert_eq!(values, [42, 0, 43]);
/// # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
/// ```
#[derive(Clone)]
pub struct Converter {
    creator: Arc<dyn InstanceCreator>,
    strict: bool,
}

impl Converter {
    /// A converter using [`DefaultInstanceCreator`] with the invariant
    /// culture.
    #[must_use]
    pub fn new() -> Self {
        Self::with_creator(Arc::new(DefaultInstanceCreator::default()))
    }

    /// A converter using the default creator with `culture`.
    #[must_use]
    pub fn with_culture(culture: Culture) -> Self {
        Self::with_creator(Arc::new(DefaultInstanceCreator::new(culture)))
    }

    /// A converter delegating instantiation to `creator`.
    #[must_use]
    pub fn with_creator(creator: Arc<dyn InstanceCreator>) -> Self {
        Self {
            creator,
            strict: false,
        }
    }

    /// Treat any nested instance that cannot be created as a fatal error
    /// rather than leaving the property unset.
    #[must_use]
    pub const fn strict_instantiation(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether nested creation failures are fatal.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// The instance creator in use.
    #[must_use]
    pub fn creator(&self) -> &Arc<dyn InstanceCreator> {
        &self.creator
    }

    /// Convert `section` into a new `T`.
    ///
    /// An absent section is treated as an empty branch so complex targets are
    /// still instantiated.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NullNotAllowed`] when the result is null and `T`
    /// cannot hold null, [`BindError::Instantiation`] when a complex `T`
    /// cannot be created, [`BindError::Unconvertible`] when a simple `T` has
    /// no usable data, and any fatal error raised while converting nested
    /// values.
    pub fn convert<T: Configurable>(&self, section: &dyn ConfigSection) -> BindResult<T> {
        let empty;
        let root: &dyn ConfigSection = if section.kind() == SectionKind::Absent {
            empty = EmptyBranch::replacing(section);
            &empty
        } else {
            section
        };
        match self.convert_node::<T>(root, ConversionInstance::Empty)? {
            ConversionResult::Value(value) => Ok(value),
            ConversionResult::Null => Err(BindError::null_not_allowed(T::type_name(), root.path())),
            ConversionResult::Invalid | ConversionResult::Unchanged => {
                warn!(
                    type_name = T::type_name(),
                    path = %root.path(),
                    "configuration could not be deserialized"
                );
                if T::shape().populates_in_place() {
                    Err(BindError::instantiation(T::type_name(), root.path()))
                } else {
                    Err(Arc::new(BindError::Unconvertible {
                        type_name: T::type_name(),
                    }))
                }
            }
        }
    }

    /// Convert `section` into the type described by `info`.
    ///
    /// Returns `None` when the result is the type's null value.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert`].
    pub fn convert_untyped(
        &self,
        section: &dyn ConfigSection,
        info: &TypeInfo,
    ) -> BindResult<Option<Box<dyn Any>>> {
        info.convert(self, section)
    }

    /// Merge `section` into an existing value.
    ///
    /// Absent keys leave properties untouched, explicit nulls clear nullable
    /// properties, arrays are replaced, and collections and dictionaries are
    /// extended.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NullNotAllowed`] when `section` is null and `T`
    /// cannot hold null, plus any fatal nested error.
    pub fn populate<T: Configurable>(
        &self,
        target: &mut T,
        section: &dyn ConfigSection,
    ) -> BindResult<()> {
        self.assign(target, section)
    }

    /// Convert one node.
    ///
    /// Absent nodes produce [`ConversionResult::Invalid`]. Explicit nulls
    /// and null results from the type's own conversion are replaced by
    /// [`Configurable::null`] when the type has one.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors from the type's conversion.
    pub fn convert_node<T: Configurable>(
        &self,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, T>,
    ) -> BindResult<ConversionResult<T>> {
        let result = match section.kind() {
            SectionKind::Absent => return Ok(ConversionResult::Invalid),
            SectionKind::Null => ConversionResult::Null,
            SectionKind::Scalar | SectionKind::Branch => T::convert(self, section, instance)?,
        };
        Ok(match result {
            ConversionResult::Null => T::null().map_or(ConversionResult::Null, ConversionResult::Value),
            other => other,
        })
    }

    /// Parse the scalar of `section` through the instance creator.
    ///
    /// A node without a scalar keeps the existing instance, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Parse`] carrying the section path when the
    /// scalar cannot be parsed.
    pub fn convert_simple<T: Configurable>(
        &self,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, T>,
    ) -> BindResult<ConversionResult<T>> {
        let Some(raw) = section.value() else {
            return Ok(unchanged_or_invalid(&instance));
        };
        match self.parse_scalar::<T>(section, &raw)? {
            ConversionResult::Invalid => Ok(unchanged_or_invalid(&instance)),
            other => Ok(other),
        }
    }

    /// Bind one property of a complex object from the matching child of
    /// `parent`.
    ///
    /// Nothing happens when the key is absent. Read-only properties can only
    /// be populated in place: a null current value or a simple/array shape
    /// is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NullNotAllowed`] when an explicit null reaches a
    /// non-nullable read-write property, plus any fatal nested error.
    pub fn bind_property<T: Configurable>(
        &self,
        property: PropertyInfo,
        slot: &mut T,
        parent: &dyn ConfigSection,
    ) -> BindResult<()> {
        let Some(child) = parent.child(property.name) else {
            return Ok(());
        };
        if property.access == PropertyAccess::ReadWrite {
            return self.assign(slot, &*child);
        }
        if slot.is_null() {
            warn!(
                owner = property.owner,
                property = property.name,
                type_name = T::type_name(),
                "cannot set property because it has no setter and holds no instance"
            );
            return Ok(());
        }
        if !T::shape().populates_in_place() {
            warn!(
                owner = property.owner,
                property = property.name,
                shape = T::shape().label(),
                "cannot set property because it has no setter; values of this shape require one"
            );
            return Ok(());
        }
        let _populated = self.convert_node(&*child, ConversionInstance::Created(slot))?;
        Ok(())
    }

    fn assign<T: Configurable>(&self, slot: &mut T, section: &dyn ConfigSection) -> BindResult<()> {
        match self.convert_node(section, ConversionInstance::Created(&mut *slot))? {
            ConversionResult::Value(value) => {
                *slot = value;
                Ok(())
            }
            ConversionResult::Null => Err(BindError::null_not_allowed(T::type_name(), section.path())),
            ConversionResult::Invalid | ConversionResult::Unchanged => Ok(()),
        }
    }

    fn parse_scalar<T: Configurable>(
        &self,
        section: &dyn ConfigSection,
        raw: &str,
    ) -> BindResult<ConversionResult<T>> {
        let info = TypeInfo::of::<T>();
        let parsed = self
            .creator
            .create_from_str(&info, raw)
            .map_err(|source| BindError::parse(section.path(), source))?;
        typed_result::<T>(parsed).ok_or_else(|| BindError::type_mismatch(info.name(), section.path()))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("creator", &self.creator)
            .field("strict", &self.strict)
            .finish()
    }
}

const fn unchanged_or_invalid<T>(instance: &ConversionInstance<'_, T>) -> ConversionResult<T> {
    if instance.is_created() {
        ConversionResult::Unchanged
    } else {
        ConversionResult::Invalid
    }
}

fn unbox<T: Configurable>(value: Box<dyn Any>, section: &dyn ConfigSection) -> BindResult<T> {
    downcast::<T>(value).ok_or_else(|| BindError::type_mismatch(T::type_name(), section.path()))
}
