//! Hierarchical configuration trees.
//!
//! The converter walks any implementation of [`ConfigSection`]. Two are
//! provided: [`JsonSection`], a borrowed view over a `serde_json::Value`, and
//! [`MemoryTree`], built from flat `Section:Key:0` pairs. Figment providers
//! are bound by first gathering them into JSON with [`gather`].

use std::borrow::Cow;

use uncased::UncasedStr;

mod gathered;
mod json;
mod memory;

pub use gathered::gather;
pub use json::JsonSection;
pub use memory::{MemorySection, MemoryTree};


/// The four states a node can be in.
///
/// These stay distinct throughout conversion: an absent key leaves a target
/// untouched while an explicit null clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// No node exists at this location.
    Absent,
    /// The node exists and is explicitly null.
    Null,
    /// The node holds a scalar string and no children.
    Scalar,
    /// The node has zero or more named or indexed children.
    Branch,
}

/// One node of a configuration tree.
///
/// Child lookup is ASCII case-insensitive. Indexed children use their decimal
/// index as key.
pub trait ConfigSection {
    /// Which of the four node states this section is in.
    fn kind(&self) -> SectionKind;

    /// Key of this node within its parent. Empty for the root.
    fn key(&self) -> &str;

    /// Dot/bracket location of this node, e.g. `inner.values[2]`.
    fn path(&self) -> String;

    /// Scalar text carried by the node, if any.
    fn value(&self) -> Option<Cow<'_, str>>;

    /// Look up a direct child by key, ignoring ASCII case.
    fn child(&self, key: &str) -> Option<Box<dyn ConfigSection + '_>>;

    /// Direct children in source order.
    fn children(&self) -> Vec<Box<dyn ConfigSection + '_>>;
}

/// Compare two keys the way configuration keys are matched: ordinal and
/// ASCII case-insensitive.
#[must_use]
pub fn names_match(left: &str, right: &str) -> bool {
    UncasedStr::new(left) == UncasedStr::new(right)
}

/// Append `key` to `parent` using dots for names and brackets for indices.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        format!("{parent}[{key}]")
    } else if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

/// Stand-in for a missing root so a top-level conversion can still
/// instantiate its target.
pub(crate) struct EmptyBranch {
    key: String,
    path: String,
}

impl EmptyBranch {
    pub(crate) fn replacing(section: &dyn ConfigSection) -> Self {
        Self {
            key: section.key().to_owned(),
            path: section.path(),
        }
    }
}

impl ConfigSection for EmptyBranch {
    fn kind(&self) -> SectionKind {
        SectionKind::Branch
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn child(&self, _key: &str) -> Option<Box<dyn ConfigSection + '_>> {
        None
    }

    fn children(&self) -> Vec<Box<dyn ConfigSection + '_>> {
        Vec::new()
    }
}
