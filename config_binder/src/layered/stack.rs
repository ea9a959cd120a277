//! Builder for ordered fragment lists.

use figment::{Figment, Provider};
use serde_json::Value;

use crate::{BindResult, BindResultExt};

/// Accumulates fragments from lowest to highest precedence.
///
/// ```
/// use config_binder::{FragmentStack, LayeredConverter};
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let mut stack = FragmentStack::new();
/// stack.push_main(json!({"Greeting": "Hello"}));
/// stack.push_missing();
/// stack.push_override(json!({"Greeting": "Hi"}));
///
/// let merged: Option<BTreeMap<String, String>> =
///     LayeredConverter::new().convert(stack.fragments())?;
/// assert_eq!(
///     merged.and_then(|map| map.get("Greeting").cloned()),
///     Some(String::from("Hi"))
/// );
/// # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FragmentStack {
    fragments: Vec<Option<Value>>,
}

impl FragmentStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Create a stack with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fragments: Vec::with_capacity(capacity),
        }
    }

    /// Push the base configuration.
    pub fn push_main(&mut self, value: Value) {
        self.fragments.push(Some(value));
    }

    /// Push a fragment that takes precedence over everything pushed so far.
    pub fn push_override(&mut self, value: Value) {
        self.fragments.push(Some(value));
    }

    /// Push a placeholder for a source that supplied nothing.
    pub fn push_missing(&mut self) {
        self.fragments.push(None);
    }

    /// Push an explicit null, discarding every earlier fragment.
    pub fn push_null(&mut self) {
        self.fragments.push(Some(Value::Null));
    }

    /// Gather `provider` into JSON and push it as an override.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Gathering`](crate::BindError::Gathering) when the
    /// provider fails.
    pub fn push_provider(&mut self, provider: impl Provider) -> BindResult<()> {
        let value = Figment::from(provider).extract::<Value>().into_bind()?;
        self.fragments.push(Some(value));
        Ok(())
    }

    /// Borrow the fragments in push order.
    #[must_use]
    pub fn fragments(&self) -> &[Option<Value>] {
        &self.fragments
    }

    /// Consume the stack and return the fragments.
    #[must_use]
    pub fn into_fragments(self) -> Vec<Option<Value>> {
        self.fragments
    }
}

impl IntoIterator for FragmentStack {
    type Item = Option<Value>;
    type IntoIter = std::vec::IntoIter<Option<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}
