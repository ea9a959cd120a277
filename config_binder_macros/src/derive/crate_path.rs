//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[configurable(crate = "...")]` attribute value
//! into a `TokenStream` that replaces hardcoded `config_binder::` paths in
//! generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `config_binder` when no override is present.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), "config_binder");
///
/// let path: syn::Path = syn::parse_str("my_alias").unwrap();
/// let aliased = resolve(Some(&path));
/// assert_eq!(aliased.to_string(), "my_alias");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { config_binder }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    #[rstest]
    #[case::default(None, "config_binder")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("deps::config_binder"), "deps :: config_binder")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .map_err(|err| anyhow!("invalid path: {err}"))?;
        let tokens = resolve(parsed.as_ref());
        ensure!(tokens.to_string() == expected, "got {tokens}");
        Ok(())
    }
}
