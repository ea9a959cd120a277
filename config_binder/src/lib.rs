//! Binds hierarchical configuration trees onto typed Rust values.
//!
//! A tree is anything implementing [`ConfigSection`]: a JSON document viewed
//! through [`JsonSection`], flat `Section:Key` pairs collected in a
//! [`MemoryTree`], or figment providers gathered with [`gather`]. Targets
//! implement [`Configurable`], usually through `#[derive(Configurable)]`.
//!
//! [`Converter`] binds one tree. [`LayeredConverter`] merges an ordered list
//! of JSON fragments where later fragments override earlier ones, an
//! explicit `null` discards everything before it, and a missing fragment is
//! skipped.
//!
//! ```
//! use config_binder::{Configurable, Converter, JsonSection};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Configurable)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     aliases: Vec<String>,
//! }
//!
//! let doc = json!({"Host": "localhost", "port": "8080", "Aliases": ["a", "b"]});
//! let server: Server = Converter::new().convert(&JsonSection::new(&doc))?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.aliases, ["a", "b"]);
//! # Ok::<(), std::sync::Arc<config_binder::BindError>>(())
//! ```

extern crate self as config_binder;

use std::sync::Arc;

pub use config_binder_macros::Configurable;

mod cache;
mod configurable;
mod conversion;
mod converter;
mod creator;
mod culture;
mod error;
mod layered;
mod provider;
mod result_ext;
mod shape;
mod tree;

pub use cache::ConfigurationCache;
pub use configurable::{
    ConfigCollection, ConfigDictionary, ConfigObject, Configurable, parse_duration,
};
pub use conversion::{ConversionInstance, ConversionResult};
pub use converter::{Converter, PropertyAccess, PropertyInfo};
pub use creator::{Created, DefaultInstanceCreator, FactoryInstanceCreator, InstanceCreator};
pub use culture::Culture;
pub use error::{BindError, ParseError, ParseFailure};
pub use layered::{FragmentStack, LayeredConverter};
pub use provider::{JsonProvider, LayeredProvider, select_fragment};
pub use result_ext::BindResultExt;
pub use shape::{
    Shape, TypeInfo, TypeRef, array_element_type, collection_element_type, dictionary_types,
    is_simple,
};
pub use tree::{
    ConfigSection, JsonSection, MemorySection, MemoryTree, SectionKind, gather, names_match,
};

pub use figment;
pub use serde_json;
pub use uncased;

/// Result type used throughout the crate.
pub type BindResult<T> = Result<T, Arc<BindError>>;
