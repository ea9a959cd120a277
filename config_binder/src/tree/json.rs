//! `ConfigSection` view over `serde_json::Value`.

use std::borrow::Cow;

use serde_json::Value;

use super::{ConfigSection, SectionKind, child_path, names_match};

/// Borrowed section of a JSON document.
///
/// Objects and arrays are branches, `null` is [`SectionKind::Null`], and
/// numbers and booleans are scalars rendered in their invariant form.
///
/// # Examples
///
/// ```
/// use config_binder::{ConfigSection, JsonSection, SectionKind};
/// use serde_json::json;
///
/// let doc = json!({"Inner": {"Values": [1, 2]}});
/// let root = JsonSection::new(&doc);
/// let second = root.select("inner.values.1");
/// assert_eq!(second.kind(), SectionKind::Scalar);
/// assert_eq!(second.path(), "Inner.Values[1]");
/// ```
#[derive(Debug, Clone)]
pub struct JsonSection<'a> {
    node: Option<&'a Value>,
    key: Cow<'a, str>,
    path: String,
}

impl<'a> JsonSection<'a> {
    /// Root section of `doc`.
    #[must_use]
    pub const fn new(doc: &'a Value) -> Self {
        Self {
            node: Some(doc),
            key: Cow::Borrowed(""),
            path: String::new(),
        }
    }

    /// The JSON value behind this section, `None` when absent.
    #[must_use]
    pub const fn json(&self) -> Option<&'a Value> {
        self.node
    }

    /// Walk a dot-separated path of keys, ignoring ASCII case.
    ///
    /// Empty segments are skipped. A missing segment yields an absent section
    /// that still reports the requested path.
    #[must_use]
    pub fn select(&self, path: &str) -> Self {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self.clone(), |section, segment| {
                section.lookup(segment).unwrap_or_else(|| Self {
                    node: None,
                    path: child_path(&section.path, segment),
                    key: Cow::Owned(segment.to_owned()),
                })
            })
    }

    fn lookup(&self, key: &str) -> Option<Self> {
        match self.node? {
            Value::Object(map) => {
                let (name, node) = map
                    .get_key_value(key)
                    .or_else(|| map.iter().find(|(name, _)| names_match(name, key)))?;
                Some(self.descend(Cow::Borrowed(name.as_str()), node))
            }
            Value::Array(items) => {
                let index = key.parse::<usize>().ok()?;
                let node = items.get(index)?;
                Some(self.descend(Cow::Owned(index.to_string()), node))
            }
            _ => None,
        }
    }

    fn descend(&self, key: Cow<'a, str>, node: &'a Value) -> Self {
        Self {
            node: Some(node),
            path: child_path(&self.path, &key),
            key,
        }
    }
}

impl ConfigSection for JsonSection<'_> {
    fn kind(&self) -> SectionKind {
        match self.node {
            None => SectionKind::Absent,
            Some(Value::Null) => SectionKind::Null,
            Some(Value::Object(_) | Value::Array(_)) => SectionKind::Branch,
            Some(_) => SectionKind::Scalar,
        }
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        match self.node? {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn child(&self, key: &str) -> Option<Box<dyn ConfigSection + '_>> {
        self.lookup(key)
            .map(|section| Box::new(section) as Box<dyn ConfigSection + '_>)
    }

    fn children(&self) -> Vec<Box<dyn ConfigSection + '_>> {
        match self.node {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(name, node)| {
                    Box::new(self.descend(Cow::Borrowed(name.as_str()), node))
                        as Box<dyn ConfigSection + '_>
                })
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, node)| {
                    Box::new(self.descend(Cow::Owned(index.to_string()), node))
                        as Box<dyn ConfigSection + '_>
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
