//! In-memory tree built from flat colon-delimited keys.

use std::borrow::Cow;

use super::{ConfigSection, SectionKind, child_path, names_match};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Slot {
    #[default]
    Unset,
    Null,
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct Node {
    key: String,
    slot: Slot,
    children: Vec<Node>,
}

impl Node {
    fn named(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            ..Self::default()
        }
    }
}

/// Configuration tree assembled from `("Inner:Values:0", "42")` pairs.
///
/// Keys are split on `:` and merged ignoring ASCII case; the first spelling
/// seen is kept. A key set to null is an explicit null rather than absent.
/// Insertion order is preserved.
///
/// # Examples
///
/// ```
/// use config_binder::{ConfigSection, MemoryTree, SectionKind};
///
/// let tree = MemoryTree::new()
///     .with("Inner:Values:0", "42")
///     .with_null("Inner:Name");
/// let root = tree.root();
/// let inner = root.child("inner").expect("inner exists");
/// assert_eq!(inner.kind(), SectionKind::Branch);
/// assert_eq!(inner.child("NAME").map(|c| c.kind()), Some(SectionKind::Null));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    root: Node,
}

impl MemoryTree {
    /// An empty tree whose root is a branch without children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scalar at `path`, creating intermediate branches.
    pub fn set(&mut self, path: &str, value: impl Into<String>) -> &mut Self {
        self.insert(path, Slot::Text(value.into()));
        self
    }

    /// Mark `path` as an explicit null.
    pub fn set_null(&mut self, path: &str) -> &mut Self {
        self.insert(path, Slot::Null);
        self
    }

    /// Builder form of [`MemoryTree::set`].
    #[must_use]
    pub fn with(mut self, path: &str, value: impl Into<String>) -> Self {
        self.set(path, value);
        self
    }

    /// Builder form of [`MemoryTree::set_null`].
    #[must_use]
    pub fn with_null(mut self, path: &str) -> Self {
        self.set_null(path);
        self
    }

    /// Root section of the tree.
    #[must_use]
    pub fn root(&self) -> MemorySection<'_> {
        MemorySection {
            node: &self.root,
            path: String::new(),
        }
    }

    fn insert(&mut self, path: &str, slot: Slot) {
        let mut node = &mut self.root;
        for segment in path.split(':').filter(|segment| !segment.is_empty()) {
            let position = node
                .children
                .iter()
                .position(|child| names_match(&child.key, segment));
            let found = match position {
                Some(index) => node.children.get_mut(index),
                None => {
                    node.children.push(Node::named(segment));
                    node.children.last_mut()
                }
            };
            let Some(child) = found else {
                return;
            };
            node = child;
        }
        node.slot = slot;
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for MemoryTree
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            match value {
                Some(text) => tree.set(key.as_ref(), text),
                None => tree.set_null(key.as_ref()),
            };
        }
        tree
    }
}

/// Borrowed section of a [`MemoryTree`].
#[derive(Debug, Clone)]
pub struct MemorySection<'a> {
    node: &'a Node,
    path: String,
}

impl<'a> MemorySection<'a> {
    fn descend(&self, node: &'a Node) -> Self {
        Self {
            node,
            path: child_path(&self.path, &node.key),
        }
    }
}

impl ConfigSection for MemorySection<'_> {
    fn kind(&self) -> SectionKind {
        if !self.node.children.is_empty() {
            return SectionKind::Branch;
        }
        match self.node.slot {
            Slot::Null => SectionKind::Null,
            Slot::Text(_) => SectionKind::Scalar,
            Slot::Unset => SectionKind::Branch,
        }
    }

    fn key(&self) -> &str {
        &self.node.key
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        match &self.node.slot {
            Slot::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Slot::Null | Slot::Unset => None,
        }
    }

    fn child(&self, key: &str) -> Option<Box<dyn ConfigSection + '_>> {
        self.node
            .children
            .iter()
            .find(|child| names_match(&child.key, key))
            .map(|child| Box::new(self.descend(child)) as Box<dyn ConfigSection + '_>)
    }

    fn children(&self) -> Vec<Box<dyn ConfigSection + '_>> {
        self.node
            .children
            .iter()
            .map(|child| Box::new(self.descend(child)) as Box<dyn ConfigSection + '_>)
            .collect()
    }
}
