//! Expansion of `#[derive(Configurable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub(crate) mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

use generate::{configurable_impl, object_impl};
use parse::parse_input;

/// Parse `input` and emit both trait implementations.
///
/// # Errors
///
/// Returns a spanned error for enums, tuple structs, conflicting facets, and
/// malformed attribute values.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let configurable = configurable_impl(&parsed, &krate);
    let object = object_impl(&parsed, &krate);
    Ok(quote! {
        #configurable
        #object
    })
}
