//! Lazily loaded, invalidatable configuration values.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

use crate::BindResult;

type Loader<T> = Box<dyn Fn() -> BindResult<T> + Send + Sync>;

/// Caches the result of a configuration loader until invalidated.
///
/// Concurrent callers of [`current`](Self::current) share one load: the
/// first reader to find the cache empty takes an upgradable lock, and
/// everyone else waits for its result. Failed loads are not cached.
///
/// # Examples
///
/// ```
/// use config_binder::{ConfigurationCache, Converter, JsonSection};
/// use serde_json::json;
///
/// let cache = ConfigurationCache::new(|| {
///     let doc = json!({"0": 1, "1": 2});
///     Converter::new().convert::<Vec<i32>>(&JsonSection::new(&doc))
/// });
/// let first = cache.current()?;
/// let second = cache.current()?;
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// cache.invalidate();
/// assert!(!std::sync::Arc::ptr_eq(&first, &cache.current()?));
/// # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
/// ```
pub struct ConfigurationCache<T> {
    slot: RwLock<Option<Arc<T>>>,
    loader: Loader<T>,
}

impl<T> ConfigurationCache<T> {
    /// Cache the values produced by `loader`.
    #[must_use]
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> BindResult<T> + Send + Sync + 'static,
    {
        Self {
            slot: RwLock::new(None),
            loader: Box::new(loader),
        }
    }

    /// The cached value, loading it first if needed.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; the cache stays empty so the next call
    /// retries.
    pub fn current(&self) -> BindResult<Arc<T>> {
        if let Some(cached) = self.slot.read().as_ref() {
            return Ok(Arc::clone(cached));
        }
        let guard = self.slot.upgradable_read();
        if let Some(cached) = guard.as_ref() {
            return Ok(Arc::clone(cached));
        }
        debug!(type_name = std::any::type_name::<T>(), "loading configuration");
        let loaded = Arc::new((self.loader)()?);
        let mut slot = RwLockUpgradableReadGuard::upgrade(guard);
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop the cached value so the next [`current`](Self::current) reloads.
    ///
    /// Call this when the underlying source reports a change.
    pub fn invalidate(&self) {
        if self.slot.write().take().is_some() {
            debug!(type_name = std::any::type_name::<T>(), "configuration invalidated");
        }
    }

    /// Whether a value is currently cached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for ConfigurationCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationCache")
            .field("cached", &*self.slot.read())
            .finish_non_exhaustive()
    }
}
