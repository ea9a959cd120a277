//! Parsing utilities for the `Configurable` derive macro.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
mod rename;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ParsedInput, parse_input};
use literals::{flag, lit_str};
pub(crate) use rename::RenameAll;
pub(crate) use type_utils::option_inner;

/// How the struct is populated before its properties are bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Facet {
    /// Properties only.
    #[default]
    Object,
    /// Indexed children through `ConfigCollection`.
    Collection,
    /// Keyed children through `ConfigDictionary`.
    Dictionary,
}

/// Struct-level `#[configurable(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub facet: Facet,
    pub no_default: bool,
    pub from_str: bool,
    pub rename_all: RenameAll,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[configurable(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `config_binder::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Configurable)]`.
///
/// - `rename` replaces the generated key.
/// - `skip` leaves the field out of binding.
/// - `read_only` binds the field as a property without a setter.
/// - `flatten` binds the field's own properties from the parent section.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub read_only: bool,
    pub flatten: bool,
}

/// Iterate all `#[configurable(...)]` attributes once and apply a callback.
fn parse_configurable<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("configurable")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn set_facet(out: &mut StructAttrs, meta: &ParseNestedMeta, facet: Facet) -> syn::Result<()> {
    if !flag(meta)? {
        return Ok(());
    }
    if out.facet != Facet::Object && out.facet != facet {
        return Err(meta.error("`collection` and `dictionary` cannot be combined"));
    }
    out.facet = facet;
    Ok(())
}

/// Extracts `#[configurable(...)]` metadata applied to a struct.
///
/// Unknown keys are ignored so callers keep compiling when new attributes
/// appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_configurable(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("collection") => set_facet(&mut out, meta, Facet::Collection),
            Some("dictionary") => set_facet(&mut out, meta, Facet::Dictionary),
            Some("no_default") => {
                out.no_default = flag(meta)?;
                Ok(())
            }
            Some("from_str") => {
                out.from_str = flag(meta)?;
                Ok(())
            }
            Some("rename_all") => {
                out.rename_all = RenameAll::parse(&lit_str(meta, "rename_all")?)?;
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[configurable(...)]` attributes.
///
/// `flatten` cannot be combined with `rename` or `read_only`, and a
/// flattened field cannot be optional because its properties are bound in
/// place.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_configurable(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename") => {
                out.rename = Some(lit_str(meta, "rename")?.value());
                Ok(())
            }
            Some("skip") => {
                out.skip = flag(meta)?;
                Ok(())
            }
            Some("read_only") => {
                out.read_only = flag(meta)?;
                Ok(())
            }
            Some("flatten") => {
                out.flatten = flag(meta)?;
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    if out.flatten && (out.rename.is_some() || out.read_only) {
        return Err(syn::Error::new_spanned(
            field,
            "`flatten` cannot be combined with `rename` or `read_only`",
        ));
    }
    if out.flatten && option_inner(&field.ty).is_some() {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "flattened fields must hold the value directly, not an `Option`",
        ));
    }
    Ok(out)
}
