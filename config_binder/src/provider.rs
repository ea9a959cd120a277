//! Named sub-tree selection over single and layered JSON sources.

use serde_json::Value;

use crate::converter::Converter;
use crate::layered::LayeredConverter;
use crate::tree::{JsonSection, names_match};
use crate::{BindResult, BindResultExt, Configurable};

/// Pick the value at a dot-separated `path`, matching keys case-insensitively.
///
/// Returns `None` when a segment is missing or an intermediate node is not
/// an object. A final explicit null is returned as `Some(Value::Null)` so
/// layered callers can tell it apart from a missing key.
///
/// # Examples
///
/// ```
/// use config_binder::select_fragment;
/// use serde_json::{Value, json};
///
/// let doc = json!({"Logging": {"Level": "debug", "File": null}});
/// assert_eq!(select_fragment(&doc, "logging.level"), Some(json!("debug")));
/// assert_eq!(select_fragment(&doc, "logging.file"), Some(Value::Null));
/// assert_eq!(select_fragment(&doc, "logging.format"), None);
/// ```
#[must_use]
pub fn select_fragment(root: &Value, path: &str) -> Option<Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| {
            let map = node.as_object()?;
            map.get(segment)
                .or_else(|| map.iter().find_map(|(name, value)| names_match(name, segment).then_some(value)))
        })
        .cloned()
}

/// A single JSON document bound through a [`Converter`].
#[derive(Debug, Clone)]
pub struct JsonProvider {
    root: Value,
    converter: Converter,
}

impl JsonProvider {
    /// Bind `root` with the default converter.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self::with_converter(root, Converter::new())
    }

    /// Bind `root` with `converter`.
    #[must_use]
    pub const fn with_converter(root: Value, converter: Converter) -> Self {
        Self { root, converter }
    }

    /// Parse `text` as JSON and bind it with the default converter.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Json`](crate::BindError::Json) when `text` is not
    /// valid JSON.
    pub fn from_json_str(text: &str) -> BindResult<Self> {
        let root: Value = serde_json::from_str(text).into_bind()?;
        Ok(Self::new(root))
    }

    /// The wrapped document.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Convert the whole document, or the sub-tree at `selector`, into `T`.
    ///
    /// A selector naming a missing key converts an empty tree.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Converter::convert`].
    pub fn get<T: Configurable>(&self, selector: Option<&str>) -> BindResult<T> {
        let root = JsonSection::new(&self.root);
        match selector {
            Some(path) => self.converter.convert(&root.select(path)),
            None => self.converter.convert(&root),
        }
    }
}

/// An ordered list of fragments bound through a [`LayeredConverter`].
#[derive(Debug, Clone)]
pub struct LayeredProvider {
    fragments: Vec<Option<Value>>,
    converter: LayeredConverter,
}

impl LayeredProvider {
    /// Bind `fragments` with the default layered converter.
    #[must_use]
    pub fn new(fragments: Vec<Option<Value>>) -> Self {
        Self::with_converter(fragments, LayeredConverter::new())
    }

    /// Bind `fragments` with `converter`.
    #[must_use]
    pub const fn with_converter(fragments: Vec<Option<Value>>, converter: LayeredConverter) -> Self {
        Self {
            fragments,
            converter,
        }
    }

    /// Merge the fragments, or their sub-trees at `selector`, into `T`.
    ///
    /// Missing fragments stay missing and null fragments stay null. A
    /// fragment without the selected key counts as missing.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`LayeredConverter::convert`].
    pub fn get<T: Configurable>(&self, selector: Option<&str>) -> BindResult<Option<T>> {
        let Some(path) = selector else {
            return self.converter.convert(&self.fragments);
        };
        let selected: Vec<Option<Value>> = self
            .fragments
            .iter()
            .map(|fragment| match fragment {
                Some(Value::Null) => Some(Value::Null),
                Some(value) => select_fragment(value, path),
                None => None,
            })
            .collect();
        self.converter.convert(&selected)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{JsonProvider, LayeredProvider, select_fragment};
    use crate::BindError;

    #[rstest]
    #[case::nested("a.b", Some(json!(1)))]
    #[case::case_insensitive("A.B", Some(json!(1)))]
    #[case::null_leaf("a.c", Some(Value::Null))]
    #[case::through_scalar("a.b.c", None)]
    #[case::through_null("a.c.d", None)]
    #[case::missing("z", None)]
    fn selects_fragments(#[case] path: &str, #[case] expected: Option<Value>) -> Result<()> {
        let doc = json!({"A": {"B": 1, "C": null}});
        let selected = select_fragment(&doc, path);
        ensure!(selected == expected, "{path}: got {selected:?}");
        Ok(())
    }

    #[rstest]
    fn json_provider_selects_before_converting() -> Result<()> {
        let provider = JsonProvider::new(json!({"Server": {"Port": "8080"}}));
        let port: u16 = provider
            .get(Some("server.port"))
            .map_err(|err| anyhow!("{err}"))?;
        ensure!(port == 8080);
        Ok(())
    }

    #[rstest]
    fn json_provider_parses_text() -> Result<()> {
        let provider = JsonProvider::from_json_str(r#"{"Name": "api"}"#)
            .map_err(|err| anyhow!("{err}"))?;
        let name: String = provider.get(Some("name")).map_err(|err| anyhow!("{err}"))?;
        ensure!(name == "api");

        let Err(err) = JsonProvider::from_json_str("{not json") else {
            return Err(anyhow!("expected a JSON error"));
        };
        ensure!(matches!(err.as_ref(), BindError::Json(_)), "{err}");
        Ok(())
    }

    #[rstest]
    fn layered_provider_keeps_null_and_missing_states() -> Result<()> {
        let provider = LayeredProvider::new(vec![
            Some(json!({"Port": 1})),
            Some(json!({"Other": 2})),
            None,
            Some(json!({"Port": 3})),
        ]);
        let port: Option<i32> = provider.get(Some("port")).map_err(|err| anyhow!("{err}"))?;
        ensure!(port == Some(3));

        let cut = LayeredProvider::new(vec![Some(json!({"Port": 1})), Some(Value::Null)]);
        let none: Option<i32> = cut.get(Some("port")).map_err(|err| anyhow!("{err}"))?;
        ensure!(none.is_none());
        Ok(())
    }
}
