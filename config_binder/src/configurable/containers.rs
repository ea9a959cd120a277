//! `Option`, `Vec`, and the standard collections and maps.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::{ConfigCollection, ConfigDictionary, ConfigObject, Configurable};
use crate::conversion::{ConversionInstance, ConversionResult};
use crate::converter::Converter;
use crate::shape::{Shape, TypeInfo};
use crate::tree::ConfigSection;
use crate::{BindResult, Culture, ParseFailure};

/// `Option<T>` is transparent: it takes the shape of `T` and adds a null.
impl<T: Configurable> Configurable for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn nullable() -> bool {
        true
    }

    fn construct() -> Option<Self> {
        T::construct().map(Some)
    }

    fn null() -> Option<Self> {
        Some(None)
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn parse(raw: &str, culture: &Culture) -> Option<Result<Self, ParseFailure>> {
        T::parse(raw, culture).map(|parsed| parsed.map(Some))
    }

    fn convert(
        converter: &Converter,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, Self>,
    ) -> BindResult<ConversionResult<Self>> {
        if matches!(T::shape(), Shape::Simple) {
            return converter.convert_simple(section, instance);
        }
        let inner = match instance {
            ConversionInstance::Created(Some(existing)) => {
                T::convert(converter, section, ConversionInstance::Created(existing))?
            }
            ConversionInstance::Created(None) | ConversionInstance::Empty => {
                T::convert(converter, section, ConversionInstance::Empty)?
            }
        };
        Ok(match inner {
            ConversionResult::Value(value) => ConversionResult::Value(Some(value)),
            ConversionResult::Null => ConversionResult::Value(None),
            ConversionResult::Invalid => ConversionResult::Invalid,
            ConversionResult::Unchanged => ConversionResult::Unchanged,
        })
    }
}

/// Vectors are arrays: rebuilt from indexed children, never appended to.
/// A null clears them.
impl<E: Configurable> Configurable for Vec<E> {
    fn shape() -> Shape {
        Shape::Array {
            element: TypeInfo::of::<E>,
        }
    }

    fn construct() -> Option<Self> {
        Some(Self::new())
    }

    fn null() -> Option<Self> {
        Some(Self::new())
    }

    fn convert(
        converter: &Converter,
        section: &dyn ConfigSection,
        instance: ConversionInstance<'_, Self>,
    ) -> BindResult<ConversionResult<Self>> {
        converter.convert_array(section, instance)
    }
}

/// Implement the collection facet for a container with an append method.
macro_rules! collection_configurable {
    (
        impl<$elem:ident $(, $extra:ident)*> for $ty:ty
        where [$($bounds:tt)*],
        add = |$target:ident, $item:ident| $add:expr
    ) => {
        impl<$elem $(, $extra)*> Configurable for $ty
        where
            $($bounds)*
        {
            fn shape() -> Shape {
                Shape::Collection {
                    element: TypeInfo::of::<$elem>,
                }
            }

            fn construct() -> Option<Self> {
                Some(Self::default())
            }

            fn null() -> Option<Self> {
                Some(Self::default())
            }

            fn convert(
                converter: &Converter,
                section: &dyn ConfigSection,
                instance: ConversionInstance<'_, Self>,
            ) -> BindResult<ConversionResult<Self>> {
                converter.convert_object(section, instance)
            }
        }

        impl<$elem $(, $extra)*> ConfigObject for $ty
        where
            $($bounds)*
        {
            fn populate_items(
                &mut self,
                converter: &Converter,
                section: &dyn ConfigSection,
            ) -> BindResult<()> {
                converter.populate_collection(self, section)
            }

            fn bind_properties(
                &mut self,
                _converter: &Converter,
                _section: &dyn ConfigSection,
            ) -> BindResult<()> {
                Ok(())
            }
        }

        impl<$elem $(, $extra)*> ConfigCollection for $ty
        where
            $($bounds)*
        {
            type Item = $elem;

            fn add_method() -> Option<fn(&mut Self, Self::Item)> {
                Some(|$target: &mut Self, $item: $elem| {
                    $add;
                })
            }
        }
    };
}

collection_configurable! {
    impl<E> for VecDeque<E>
    where [E: Configurable],
    add = |target, item| target.push_back(item)
}

collection_configurable! {
    impl<E> for BTreeSet<E>
    where [E: Configurable + Ord],
    add = |target, item| target.insert(item)
}

collection_configurable! {
    impl<E, S> for HashSet<E, S>
    where [E: Configurable + Eq + Hash, S: BuildHasher + Default + 'static],
    add = |target, item| target.insert(item)
}

/// Implement the dictionary facet for a map with an insert method.
///
/// Insertion overwrites, so later layers replace entries with equal keys.
macro_rules! dictionary_configurable {
    (
        impl<$key:ident, $value:ident $(, $extra:ident)*> for $ty:ty
        where [$($bounds:tt)*]
    ) => {
        impl<$key, $value $(, $extra)*> Configurable for $ty
        where
            $($bounds)*
        {
            fn shape() -> Shape {
                Shape::Dictionary {
                    key: TypeInfo::of::<$key>,
                    value: TypeInfo::of::<$value>,
                }
            }

            fn construct() -> Option<Self> {
                Some(Self::default())
            }

            fn null() -> Option<Self> {
                Some(Self::default())
            }

            fn convert(
                converter: &Converter,
                section: &dyn ConfigSection,
                instance: ConversionInstance<'_, Self>,
            ) -> BindResult<ConversionResult<Self>> {
                converter.convert_object(section, instance)
            }
        }

        impl<$key, $value $(, $extra)*> ConfigObject for $ty
        where
            $($bounds)*
        {
            fn populate_items(
                &mut self,
                converter: &Converter,
                section: &dyn ConfigSection,
            ) -> BindResult<()> {
                converter.populate_dictionary(self, section)
            }

            fn bind_properties(
                &mut self,
                _converter: &Converter,
                _section: &dyn ConfigSection,
            ) -> BindResult<()> {
                Ok(())
            }
        }

        impl<$key, $value $(, $extra)*> ConfigDictionary for $ty
        where
            $($bounds)*
        {
            type Key = $key;
            type Value = $value;

            fn add_method() -> Option<fn(&mut Self, Self::Key, Self::Value)> {
                Some(|map: &mut Self, key: $key, value: $value| {
                    map.insert(key, value);
                })
            }
        }
    };
}

dictionary_configurable! {
    impl<K, V> for BTreeMap<K, V>
    where [K: Configurable + Ord, V: Configurable]
}

dictionary_configurable! {
    impl<K, V, S> for HashMap<K, V, S>
    where [K: Configurable + Eq + Hash, V: Configurable, S: BuildHasher + Default + 'static]
}
