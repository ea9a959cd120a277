//! Creator backed by each type's own constructors and parsers.

use super::{Created, InstanceCreator};
use crate::conversion::ConversionResult;
use crate::shape::TypeInfo;
use crate::{BindResult, Culture, ParseError};

/// Builds instances through [`Configurable`](crate::Configurable) and parses
/// scalars with a fixed [`Culture`].
#[derive(Debug, Clone, Default)]
pub struct DefaultInstanceCreator {
    culture: Culture,
}

impl DefaultInstanceCreator {
    /// A creator parsing scalars with `culture`.
    #[must_use]
    pub const fn new(culture: Culture) -> Self {
        Self { culture }
    }

    /// The culture applied to scalar parsing.
    #[must_use]
    pub const fn culture(&self) -> &Culture {
        &self.culture
    }
}

impl InstanceCreator for DefaultInstanceCreator {
    fn create(&self, info: &TypeInfo) -> BindResult<Created> {
        Ok(info
            .construct()
            .map_or(ConversionResult::Invalid, ConversionResult::Value))
    }

    fn create_from_str(&self, info: &TypeInfo, raw: &str) -> Result<Created, ParseError> {
        if info.nullable() && raw.trim().is_empty() {
            return Ok(ConversionResult::Null);
        }
        match info.parse(raw, &self.culture) {
            None => Ok(ConversionResult::Invalid),
            Some(Ok(value)) => Ok(ConversionResult::Value(value)),
            Some(Err(source)) => Err(ParseError::new(info.name(), raw, source)),
        }
    }

    fn create_array(&self, element: &TypeInfo, len: usize) -> BindResult<Created> {
        Ok(element
            .alloc_array(len)
            .map_or(ConversionResult::Invalid, ConversionResult::Value))
    }
}
