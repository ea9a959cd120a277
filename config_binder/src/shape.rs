//! Type shapes and runtime type descriptors.
//!
//! Every [`Configurable`] type declares one of five shapes. The converter
//! dispatches on the shape instead of inspecting types at runtime, and
//! instance creators receive a [`TypeInfo`] describing the type they must
//! build.

use std::any::{Any, TypeId};
use std::fmt;

use crate::conversion::ConversionResult;
use crate::converter::Converter;
use crate::tree::ConfigSection;
use crate::{BindResult, Configurable, Culture, ParseFailure};

/// Lazily evaluated descriptor of a related type.
///
/// Element, key, and value types are described through function pointers so
/// recursive type graphs do not recurse while building a descriptor.
pub type TypeRef = fn() -> TypeInfo;

/// The closed set of shapes a configuration target can take.
#[derive(Clone, Copy)]
pub enum Shape {
    /// Produced only by parsing a scalar string.
    Simple,
    /// A vector rebuilt from indexed children on every conversion.
    Array {
        /// Element descriptor.
        element: TypeRef,
    },
    /// A complex type extended in place through an add operation.
    Collection {
        /// Element descriptor.
        element: TypeRef,
    },
    /// A complex type keyed by converted child keys.
    Dictionary {
        /// Key descriptor.
        key: TypeRef,
        /// Value descriptor.
        value: TypeRef,
    },
    /// A complex type populated property by property.
    Complex,
}

impl Shape {
    /// Whether values of this shape can be populated in place without a
    /// setter.
    #[must_use]
    pub const fn populates_in_place(&self) -> bool {
        matches!(
            self,
            Self::Collection { .. } | Self::Dictionary { .. } | Self::Complex
        )
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Array { .. } => "array",
            Self::Collection { .. } => "collection",
            Self::Dictionary { .. } => "dictionary",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple | Self::Complex => f.write_str(self.label()),
            Self::Array { element } | Self::Collection { element } => {
                write!(f, "{}<{}>", self.label(), element().name())
            }
            Self::Dictionary { key, value } => {
                write!(f, "dictionary<{}, {}>", key().name(), value().name())
            }
        }
    }
}

type ErasedParse = fn(&str, &Culture) -> Option<Result<Box<dyn Any>, ParseFailure>>;
type ErasedConvert = fn(&Converter, &dyn ConfigSection) -> BindResult<Option<Box<dyn Any>>>;

/// Runtime descriptor of a [`Configurable`] type.
///
/// Carries type-erased entry points so object-safe collaborators such as
/// [`InstanceCreator`](crate::InstanceCreator) can build values without
/// being generic.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    name: &'static str,
    id: TypeId,
    shape: Shape,
    nullable: bool,
    construct: fn() -> Option<Box<dyn Any>>,
    parse: ErasedParse,
    alloc_array: fn(usize) -> Option<Box<dyn Any>>,
    assemble_array: fn(Vec<Box<dyn Any>>) -> Option<Box<dyn Any>>,
    convert: ErasedConvert,
}

impl TypeInfo {
    /// Describe `T`.
    #[must_use]
    pub fn of<T: Configurable>() -> Self {
        Self {
            name: T::type_name(),
            id: TypeId::of::<T>(),
            shape: T::shape(),
            nullable: T::nullable(),
            construct: construct_erased::<T>,
            parse: parse_erased::<T>,
            alloc_array: alloc_array_erased::<T>,
            assemble_array: assemble_array_erased::<T>,
            convert: convert_erased::<T>,
        }
    }

    /// Display name of the type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Shape of the type.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Whether an explicit null is representable by the type itself.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    /// Whether this descriptor is for `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Default-construct a boxed instance, `None` if the type has no
    /// configuration-free constructor.
    #[must_use]
    pub fn construct(&self) -> Option<Box<dyn Any>> {
        (self.construct)()
    }

    /// Parse `raw` into a boxed instance.
    ///
    /// Returns `None` when the type has no string form.
    #[must_use]
    pub fn parse(&self, raw: &str, culture: &Culture) -> Option<Result<Box<dyn Any>, ParseFailure>> {
        (self.parse)(raw, culture)
    }

    /// Allocate a boxed `Vec` of `len` default slots of this type.
    #[must_use]
    pub fn alloc_array(&self, len: usize) -> Option<Box<dyn Any>> {
        (self.alloc_array)(len)
    }

    /// Collect boxed elements of this type into a boxed `Vec`.
    ///
    /// Returns `None` if any element has a different type.
    #[must_use]
    pub fn assemble_array(&self, items: Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        (self.assemble_array)(items)
    }

    /// Convert `section` into a boxed instance; `None` means null.
    ///
    /// # Errors
    ///
    /// Propagates fatal conversion errors from [`Converter::convert`].
    pub fn convert(
        &self,
        converter: &Converter,
        section: &dyn ConfigSection,
    ) -> BindResult<Option<Box<dyn Any>>> {
        (self.convert)(converter, section)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

fn construct_erased<T: Configurable>() -> Option<Box<dyn Any>> {
    T::construct().map(|value| Box::new(value) as Box<dyn Any>)
}

fn parse_erased<T: Configurable>(
    raw: &str,
    culture: &Culture,
) -> Option<Result<Box<dyn Any>, ParseFailure>> {
    T::parse(raw, culture).map(|parsed| parsed.map(|value| Box::new(value) as Box<dyn Any>))
}

fn alloc_array_erased<T: Configurable>(len: usize) -> Option<Box<dyn Any>> {
    let slots = (0..len)
        .map(|_| T::default_slot())
        .collect::<Option<Vec<T>>>()?;
    Some(Box::new(slots))
}

fn assemble_array_erased<T: Configurable>(items: Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> {
    let typed = items
        .into_iter()
        .map(|item| item.downcast::<T>().ok().map(|value| *value))
        .collect::<Option<Vec<T>>>()?;
    Some(Box::new(typed))
}

fn convert_erased<T: Configurable>(
    converter: &Converter,
    section: &dyn ConfigSection,
) -> BindResult<Option<Box<dyn Any>>> {
    let value = converter.convert::<T>(section)?;
    Ok((!value.is_null()).then(|| Box::new(value) as Box<dyn Any>))
}

/// Whether `info` is produced only from scalar strings.
#[must_use]
pub fn is_simple(info: &TypeInfo) -> bool {
    matches!(info.shape(), Shape::Simple)
}

/// Element type of an array-shaped descriptor.
#[must_use]
pub fn array_element_type(info: &TypeInfo) -> Option<TypeInfo> {
    match info.shape() {
        Shape::Array { element } => Some(element()),
        _ => None,
    }
}

/// Element type of a collection-shaped descriptor.
///
/// Dictionaries are never reported as collections even though they can be
/// enumerated, matching the lookup order of [`dictionary_types`].
#[must_use]
pub fn collection_element_type(info: &TypeInfo) -> Option<TypeInfo> {
    match info.shape() {
        Shape::Collection { element } => Some(element()),
        _ => None,
    }
}

/// Key and value types of a dictionary-shaped descriptor.
#[must_use]
pub fn dictionary_types(info: &TypeInfo) -> Option<(TypeInfo, TypeInfo)> {
    match info.shape() {
        Shape::Dictionary { key, value } => Some((key(), value())),
        _ => None,
    }
}

/// Unbox a creator payload as `T`.
pub(crate) fn downcast<T: Configurable>(value: Box<dyn Any>) -> Option<T> {
    value.downcast::<T>().ok().map(|boxed| *boxed)
}

/// Map a creator result onto a typed one.
pub(crate) fn typed_result<T: Configurable>(
    result: ConversionResult<Box<dyn Any>>,
) -> Option<ConversionResult<T>> {
    match result {
        ConversionResult::Value(value) => downcast::<T>(value).map(ConversionResult::Value),
        ConversionResult::Null => Some(ConversionResult::Null),
        ConversionResult::Invalid => Some(ConversionResult::Invalid),
        ConversionResult::Unchanged => Some(ConversionResult::Unchanged),
    }
}
