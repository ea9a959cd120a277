//! Complex objects and dictionaries.

use tracing::warn;

use super::{Converter, unbox};
use crate::conversion::{ConversionInstance, ConversionResult};
use crate::shape::{TypeInfo, downcast};
use crate::tree::ConfigSection;
use crate::{BindError, BindResult, ConfigDictionary, ConfigObject, Configurable};

impl Converter {
    /// Convert a complex object, creating it when no instance exists.
    ///
    /// A scalar is first offered to the type's string parser; a type without
    /// one ignores the scalar and is built from its (empty) children. An
    /// existing instance is populated in place and reported as
    /// [`ConversionResult::Unchanged`].
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Instantiation`] in strict mode when the instance
    /// creator cannot build `T`, plus any fatal error from populating it.
    pub fn convert_object<T: Configurable + ConfigObject>(
        &self,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, T>,
    ) -> BindResult<ConversionResult<T>> {
        if let Some(raw) = section.value() {
            match self.parse_scalar::<T>(section, &raw)? {
                ConversionResult::Invalid => {}
                parsed => return Ok(parsed),
            }
        }
        if let ConversionInstance::Created(existing) = instance {
            populate_object(self, existing, section)?;
            return Ok(ConversionResult::Unchanged);
        }
        let Some(mut created) = self.create_instance::<T>(section)? else {
            return Ok(ConversionResult::Invalid);
        };
        populate_object(self, &mut created, section)?;
        Ok(ConversionResult::Value(created))
    }

    /// Insert every keyed child of `section` into `target`.
    ///
    /// Each value is converted before its key. Null values, unconvertible
    /// values, and keys whose type has no string form are logged and skipped.
    /// Existing entries with an equal key are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Parse`] carrying the entry path when a key does
    /// not parse into the key type, plus fatal errors from value conversion.
    pub fn populate_dictionary<D: ConfigDictionary>(
        &self,
        target: &mut D,
        section: &dyn ConfigSection,
    ) -> BindResult<()> {
        let Some(add) = D::add_method() else {
            warn!(
                type_name = std::any::type_name::<D>(),
                path = %section.path(),
                "dictionary has no add operation; skipping population"
            );
            return Ok(());
        };
        let key_info = TypeInfo::of::<D::Key>();
        for child in section.children() {
            let value = match self.convert_node::<D::Value>(&*child, ConversionInstance::Empty)? {
                ConversionResult::Value(value) => value,
                ConversionResult::Null => {
                    warn!(
                        key = child.key(),
                        value_type = D::Value::type_name(),
                        path = %child.path(),
                        "dictionary value is null and the value type cannot hold null; skipping entry"
                    );
                    continue;
                }
                ConversionResult::Invalid | ConversionResult::Unchanged => continue,
            };
            let Some(key) = self.dictionary_key::<D::Key>(&key_info, &*child)? else {
                continue;
            };
            add(target, key, value);
        }
        Ok(())
    }

    fn dictionary_key<K: Configurable>(
        &self,
        info: &TypeInfo,
        child: &dyn ConfigSection,
    ) -> BindResult<Option<K>> {
        let parsed = match self.creator.create_from_str(info, child.key()) {
            Ok(ConversionResult::Value(parsed)) => parsed,
            Ok(_) => {
                warn!(
                    key = child.key(),
                    key_type = info.name(),
                    path = %child.path(),
                    "dictionary key has no value of the key type; skipping entry"
                );
                return Ok(None);
            }
            Err(source) => return Err(BindError::parse(child.path(), source)),
        };
        downcast::<K>(parsed)
            .map(Some)
            .ok_or_else(|| BindError::type_mismatch(info.name(), child.path()))
    }

    fn create_instance<T: Configurable>(&self, section: &dyn ConfigSection) -> BindResult<Option<T>> {
        let info = TypeInfo::of::<T>();
        if let ConversionResult::Value(created) = self.creator.create(&info)? {
            return unbox::<T>(created, section).map(Some);
        }
        if self.strict {
            return Err(BindError::instantiation(info.name(), section.path()));
        }
        warn!(
            type_name = info.name(),
            path = %section.path(),
            "no instance could be created; leaving the value unset"
        );
        Ok(None)
    }
}

fn populate_object<T: ConfigObject + ?Sized>(
    converter: &Converter,
    target: &mut T,
    section: &dyn ConfigSection,
) -> BindResult<()> {
    target.populate_items(converter, section)?;
    target.bind_properties(converter, section)
}
