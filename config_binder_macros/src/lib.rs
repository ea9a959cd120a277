//! Procedural macros for `config_binder`.
//!
//! `#[derive(Configurable)]` implements `config_binder::Configurable` and
//! `config_binder::ConfigObject` for a struct with named fields. Each field is
//! bound from the child section whose key matches the field name, converted
//! to `PascalCase` by default and matched case-insensitively at runtime.
//!
//! Struct attributes, inside `#[configurable(...)]`:
//!
//! - `collection` / `dictionary`: the struct is populated from indexed or
//!   keyed children through a hand-written `ConfigCollection` or
//!   `ConfigDictionary` implementation, then has its properties bound.
//! - `no_default`: the struct has no `Default` implementation and can only be
//!   created by a registered factory.
//! - `from_str`: scalar values are parsed through `FromStr`.
//! - `rename_all = "..."`: key style for every field.
//! - `crate = "..."`: path of the `config_binder` crate when it is renamed.
//!
//! Field attributes: `rename = "..."`, `skip`, `read_only`, and `flatten`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `Configurable` and `ConfigObject` for a struct with named fields.
#[proc_macro_derive(Configurable, attributes(configurable))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
