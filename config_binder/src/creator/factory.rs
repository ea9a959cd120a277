//! Creator consulting registered factory closures.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{Created, DefaultInstanceCreator, InstanceCreator};
use crate::conversion::ConversionResult;
use crate::shape::{Shape, TypeInfo};
use crate::{BindError, BindResult, Configurable, Culture, ParseError, ParseFailure};

type Factory = Arc<dyn Fn() -> Result<Box<dyn Any>, ParseFailure> + Send + Sync>;

/// Instance creator that builds registered types through factory closures.
///
/// Factories let configuration objects capture services they depend on, and
/// let abstract targets such as `Box<dyn Trait>` resolve to a concrete type.
/// Everything else falls back to [`DefaultInstanceCreator`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use config_binder::{Converter, FactoryInstanceCreator, JsonSection};
/// use serde_json::json;
///
/// let creator = FactoryInstanceCreator::new()
///     .register(|| std::collections::BTreeMap::from([(String::from("seed"), 1_i32)]));
/// let converter = Converter::with_creator(Arc::new(creator));
/// let doc = json!({"extra": 2});
/// let map: std::collections::BTreeMap<String, i32> = converter.convert(&JsonSection::new(&doc))?;
/// assert_eq!(map.len(), 2);
/// # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
/// ```
#[derive(Clone, Default)]
pub struct FactoryInstanceCreator {
    factories: HashMap<TypeId, (&'static str, Factory)>,
    routed: HashSet<TypeId>,
    route_all: bool,
    fallback: DefaultInstanceCreator,
}

impl FactoryInstanceCreator {
    /// An empty registry using the invariant culture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse scalars with `culture`.
    #[must_use]
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.fallback = DefaultInstanceCreator::new(culture);
        self
    }

    /// Build `T` by calling `factory`. Registering a type also routes it.
    #[must_use]
    pub fn register<T, F>(self, factory: F) -> Self
    where
        T: Configurable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_fallible(move || Ok::<T, std::convert::Infallible>(factory()))
    }

    /// Build `T` by calling a factory that can fail.
    ///
    /// A failure surfaces as [`BindError::Factory`].
    #[must_use]
    pub fn register_fallible<T, E, F>(mut self, factory: F) -> Self
    where
        T: Configurable,
        E: Into<ParseFailure>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: Factory = Arc::new(move || {
            factory()
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        });
        let id = TypeId::of::<T>();
        self.routed.insert(id);
        self.factories.insert(id, (T::type_name(), erased));
        self
    }

    /// Require `T` to be built by a factory.
    ///
    /// Creating an unregistered routed type fails with
    /// [`BindError::NotRegistered`].
    #[must_use]
    pub fn route<T: Configurable>(mut self) -> Self {
        self.routed.insert(TypeId::of::<T>());
        self
    }

    /// Require every complex, collection, and dictionary type to be built by
    /// a factory.
    #[must_use]
    pub const fn route_all(mut self) -> Self {
        self.route_all = true;
        self
    }

    /// Whether a factory is registered for `T`.
    #[must_use]
    pub fn is_registered<T: Configurable>(&self) -> bool {
        self.factories.contains_key(&TypeId::of::<T>())
    }

    fn is_routed(&self, info: &TypeInfo) -> bool {
        self.routed.contains(&info.type_id())
            || (self.route_all && !matches!(info.shape(), Shape::Simple | Shape::Array { .. }))
    }

    fn build(&self, info: &TypeInfo) -> Option<BindResult<Box<dyn Any>>> {
        let (name, factory) = self.factories.get(&info.type_id())?;
        debug!(type_name = *name, "creating instance through registered factory");
        Some(factory().map_err(|source| {
            Arc::new(BindError::Factory {
                type_name: *name,
                source,
            })
        }))
    }
}

impl InstanceCreator for FactoryInstanceCreator {
    fn create(&self, info: &TypeInfo) -> BindResult<Created> {
        if let Some(built) = self.build(info) {
            return built.map(ConversionResult::Value);
        }
        if self.is_routed(info) {
            return Err(Arc::new(BindError::NotRegistered {
                type_name: info.name(),
            }));
        }
        self.fallback.create(info)
    }

    fn create_from_str(&self, info: &TypeInfo, raw: &str) -> Result<Created, ParseError> {
        self.fallback.create_from_str(info, raw)
    }

    fn create_array(&self, element: &TypeInfo, len: usize) -> BindResult<Created> {
        if !self.factories.contains_key(&element.type_id()) {
            return self.fallback.create_array(element, len);
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            if let Some(built) = self.build(element) {
                items.push(built?);
            }
        }
        Ok(element
            .assemble_array(items)
            .map_or(ConversionResult::Invalid, ConversionResult::Value))
    }
}

impl fmt::Debug for FactoryInstanceCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&str> = self.factories.values().map(|(name, _)| *name).collect();
        registered.sort_unstable();
        f.debug_struct("FactoryInstanceCreator")
            .field("registered", &registered)
            .field("routed", &self.routed.len())
            .field("route_all", &self.route_all)
            .field("fallback", &self.fallback)
            .finish()
    }
}
