//! Value carriers passed between conversion steps.

/// Outcome of converting one node.
///
/// `Invalid` and `Null` are deliberately separate: the first means "no
/// information, leave the target alone", the second is a legitimate null
/// that the target type could not represent itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ConversionResult<T> {
    /// Nothing usable was produced.
    Invalid,
    /// The node was an explicit null and `T` has no null value.
    Null,
    /// A value was produced.
    Value(T),
    /// The existing instance was populated in place.
    Unchanged,
}

impl<T> ConversionResult<T> {
    /// Whether the result carries information the caller should act on.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Transform a produced value, keeping the other states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionResult<U> {
        match self {
            Self::Invalid => ConversionResult::Invalid,
            Self::Null => ConversionResult::Null,
            Self::Value(value) => ConversionResult::Value(f(value)),
            Self::Unchanged => ConversionResult::Unchanged,
        }
    }

    /// The produced value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Invalid | Self::Null | Self::Unchanged => None,
        }
    }
}

/// Existing target handed to a conversion.
///
/// `Empty` asks the converter to create a new value; `Created` lends an
/// existing one that may be reused and populated in place.
#[derive(Debug)]
pub enum ConversionInstance<'a, T> {
    /// No instance exists yet.
    Empty,
    /// An instance exists and may be populated in place.
    Created(&'a mut T),
}

impl<'a, T> ConversionInstance<'a, T> {
    /// Whether an existing instance was supplied.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Borrow the existing instance.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Created(value) => Some(&**value),
            Self::Empty => None,
        }
    }

    /// Take the mutable borrow out of the carrier.
    #[must_use]
    pub fn into_inner(self) -> Option<&'a mut T> {
        match self {
            Self::Created(value) => Some(value),
            Self::Empty => None,
        }
    }
}

impl<'a, T> From<&'a mut T> for ConversionInstance<'a, T> {
    fn from(value: &'a mut T) -> Self {
        Self::Created(value)
    }
}
