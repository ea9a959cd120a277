//! Per-field binding statements.

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use crate::derive::parse::ParsedInput;

/// Configuration key for a field, after `rename` and `rename_all`.
pub(crate) fn field_key(parsed: &ParsedInput, field: &syn::Field, rename: Option<&str>) -> String {
    rename.map_or_else(
        || {
            let name = field
                .ident
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            parsed.struct_attrs.rename_all.apply(&name)
        },
        ToOwned::to_owned,
    )
}

/// One statement per bound field, in declaration order.
pub(crate) fn property_bindings(parsed: &ParsedInput, krate: &TokenStream) -> Vec<TokenStream> {
    let owner = LitStr::new(&parsed.ident.to_string(), parsed.ident.span());
    parsed
        .iter_fields()
        .filter(|(_, attrs)| !attrs.skip)
        .filter_map(|(field, attrs)| {
            let member = field.ident.as_ref()?;
            if attrs.flatten {
                return Some(quote! {
                    #krate::ConfigObject::bind_properties(&mut self.#member, converter, section)?;
                });
            }
            let key = LitStr::new(
                &field_key(parsed, field, attrs.rename.as_deref()),
                member.span(),
            );
            let info = if attrs.read_only {
                quote! { #krate::PropertyInfo::read_only(#owner, #key) }
            } else {
                quote! { #krate::PropertyInfo::read_write(#owner, #key) }
            };
            Some(quote! {
                converter.bind_property(#info, &mut self.#member, section)?;
            })
        })
        .collect()
}
