//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitBool, LitStr, Token};

/// Parses a string literal from an attribute.
///
/// # Examples
///
/// ```rust,ignore
/// use syn::Attribute;
/// let attr: Attribute = syn::parse_quote!(#[configurable(rename = "Name")]);
/// attr.parse_nested_meta(|meta| {
///     let s = lit_str(&meta, "rename")?;
///     assert_eq!(s.value(), "Name");
///     Ok(())
/// }).unwrap();
/// ```
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a marker attribute.
///
/// Accepts both the bare form (`skip`) and an explicit boolean
/// (`skip = false`).
pub(crate) fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}
