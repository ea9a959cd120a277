//! Input parsing for the `Configurable` derive macro.
//!
//! This module gathers the struct identifier, fields, and relevant attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything the generators need from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub fields: Vec<syn::Field>,
    pub struct_attrs: StructAttrs,
    pub field_attrs: Vec<FieldAttrs>,
}

impl ParsedInput {
    /// Fields paired with their attributes.
    pub(crate) fn iter_fields(&self) -> impl Iterator<Item = (&syn::Field, &FieldAttrs)> {
        self.fields.iter().zip(&self.field_attrs)
    }
}

/// Gathers information from the user-provided struct.
///
/// Attribute metadata is validated eagerly so expansion can fail fast.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let ident = input.ident.clone();
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configurable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident.clone(),
                "Configurable can only be derived for structs",
            ));
        }
    };

    let mut field_attrs = Vec::new();
    for f in &fields {
        field_attrs.push(parse_field_attrs(f)?);
    }
    Ok(ParsedInput {
        ident,
        generics: input.generics.clone(),
        fields,
        struct_attrs,
        field_attrs,
    })
}
