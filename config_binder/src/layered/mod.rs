//! Merging an ordered list of JSON fragments into one value.
//!
//! Fragments are ordered from lowest to highest precedence. A missing
//! fragment (`None`) is skipped; an explicit `null` discards itself and every
//! fragment before it. The first remaining fragment creates the value and the
//! rest are populated onto it.

mod stack;

pub use stack::FragmentStack;


use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::converter::Converter;
use crate::creator::InstanceCreator;
use crate::tree::JsonSection;
use crate::{BindError, BindResult, Configurable};

/// Converter over layered fragments.
///
/// Always runs in strict instantiation mode: a nested instance that cannot
/// be created aborts the merge rather than leaving a property unset.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use config_binder::LayeredConverter;
/// use serde_json::json;
///
/// let fragments = [Some(json!({"A": 1})), None, Some(json!({"B": 2}))];
/// let merged: Option<BTreeMap<String, i32>> = LayeredConverter::new().convert(&fragments)?;
/// assert_eq!(merged.map(|map| map.len()), Some(2));
/// # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayeredConverter {
    converter: Converter,
}

impl LayeredConverter {
    /// A layered converter using the default creator and the invariant
    /// culture.
    #[must_use]
    pub fn new() -> Self {
        Self::from_converter(Converter::new())
    }

    /// A layered converter delegating instantiation to `creator`.
    #[must_use]
    pub fn with_creator(creator: Arc<dyn InstanceCreator>) -> Self {
        Self::from_converter(Converter::with_creator(creator))
    }

    /// Wrap `converter`, forcing strict instantiation.
    #[must_use]
    pub const fn from_converter(converter: Converter) -> Self {
        Self {
            converter: converter.strict_instantiation(true),
        }
    }

    /// The underlying single-tree converter.
    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Merge `fragments` into a `T`.
    ///
    /// Returns `Ok(None)` when no fragment is present or the last present one
    /// is an explicit null.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::NoFragments`] for an empty slice, plus any error
    /// raised by [`Converter::convert`] or [`Converter::populate`].
    pub fn convert<T: Configurable>(&self, fragments: &[Option<Value>]) -> BindResult<Option<T>> {
        if fragments.is_empty() {
            return Err(Arc::new(BindError::NoFragments));
        }
        let present = || {
            fragments
                .iter()
                .enumerate()
                .filter_map(|(index, fragment)| fragment.as_ref().map(|value| (index, value)))
        };
        if matches!(present().last(), None | Some((_, Value::Null))) {
            return Ok(None);
        }
        let start = present()
            .filter(|(_, value)| value.is_null())
            .last()
            .map_or(0, |(index, _)| index.saturating_add(1));
        debug!(
            type_name = T::type_name(),
            fragments = fragments.len(),
            start,
            "merging configuration fragments"
        );
        let mut layers = present()
            .filter(|(index, _)| *index >= start)
            .map(|(_, value)| value);
        let Some(first) = layers.next() else {
            return Ok(None);
        };
        let mut merged = self.converter.convert::<T>(&JsonSection::new(first))?;
        for layer in layers {
            self.converter.populate(&mut merged, &JsonSection::new(layer))?;
        }
        Ok(Some(merged))
    }
}

impl Default for LayeredConverter {
    fn default() -> Self {
        Self::new()
    }
}
