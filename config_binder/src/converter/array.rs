//! Arrays and collections built from indexed children.

use tracing::warn;

use super::{Converter, unbox};
use crate::conversion::{ConversionInstance, ConversionResult};
use crate::shape::TypeInfo;
use crate::tree::ConfigSection;
use crate::{BindError, BindResult, ConfigCollection, Configurable};

type Indexed<'s> = Vec<(usize, Box<dyn ConfigSection + 's>)>;

impl Converter {
    /// Rebuild a vector from the indexed children of `section`.
    ///
    /// The vector is sized to the largest index plus one; gaps are filled by
    /// the instance creator. Keys that are not non-negative `i32` values are
    /// logged and skipped. A node with no usable children and no scalar is a
    /// null array.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Instantiation`] if the creator cannot allocate the
    /// vector, plus any fatal error from element conversion.
    pub fn convert_array<E: Configurable>(
        &self,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, Vec<E>>,
    ) -> BindResult<ConversionResult<Vec<E>>> {
        if let Some(len) = instance.get().map(Vec::len).filter(|len| *len > 0) {
            warn!(
                element = E::type_name(),
                size = len,
                path = %section.path(),
                "existing array is discarded before deserialization"
            );
        }
        let items = self.indexed_children::<E>(section);
        if items.is_empty() {
            let has_scalar = section.value().is_some_and(|raw| !raw.is_empty());
            return Ok(if has_scalar {
                ConversionResult::Value(Vec::new())
            } else {
                ConversionResult::Null
            });
        }
        self.build_array(section, items).map(ConversionResult::Value)
    }

    /// Append the indexed children of `section` to `target` through its add
    /// operation.
    ///
    /// A collection without an add operation is logged and left untouched.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors from element conversion.
    pub fn populate_collection<C: ConfigCollection>(
        &self,
        target: &mut C,
        section: &dyn ConfigSection,
    ) -> BindResult<()> {
        let Some(add) = C::add_method() else {
            warn!(
                type_name = std::any::type_name::<C>(),
                element = C::Item::type_name(),
                path = %section.path(),
                "collection has no add operation; skipping population"
            );
            return Ok(());
        };
        let items = self.indexed_children::<C::Item>(section);
        if items.is_empty() {
            return Ok(());
        }
        for item in self.build_array(section, items)? {
            add(target, item);
        }
        Ok(())
    }

    fn indexed_children<'s, E: Configurable>(&self, section: &'s dyn ConfigSection) -> Indexed<'s> {
        section
            .children()
            .into_iter()
            .filter_map(|child| match parse_index(child.key()) {
                Some(index) => Some((index, child)),
                None => {
                    warn!(
                        element = E::type_name(),
                        key = child.key(),
                        path = %child.path(),
                        "collection index is not a non-negative 32-bit integer; skipping entry"
                    );
                    None
                }
            })
            .collect()
    }

    fn build_array<E: Configurable>(
        &self,
        section: &dyn ConfigSection,
        items: Indexed<'_>,
    ) -> BindResult<Vec<E>> {
        let len = items
            .iter()
            .map(|(index, _)| *index)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let mut slots: Vec<Option<E>> = std::iter::repeat_with(|| None).take(len).collect();
        for (index, child) in items {
            if let ConversionResult::Value(value) =
                self.convert_node::<E>(&*child, ConversionInstance::Empty)?
                && let Some(slot) = slots.get_mut(index)
            {
                *slot = Some(value);
            }
        }
        let gaps = slots.iter().filter(|slot| slot.is_none()).count();
        let instantiation =
            || BindError::instantiation(<Vec<E> as Configurable>::type_name(), section.path());
        let ConversionResult::Value(boxed) = self.creator.create_array(&TypeInfo::of::<E>(), gaps)?
        else {
            return Err(instantiation());
        };
        let mut fillers = unbox::<Vec<E>>(boxed, section)?.into_iter();
        slots
            .into_iter()
            .map(|slot| slot.or_else(|| fillers.next()).ok_or_else(&instantiation))
            .collect()
    }
}

/// Parse an array index the way configuration keys are numbered: a
/// non-negative `i32`.
fn parse_index(key: &str) -> Option<usize> {
    key.parse::<i32>()
        .ok()
        .and_then(|index| usize::try_from(index).ok())
}
