//! Token generation for the `Configurable` and `ConfigObject` impls.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{LitStr, parse_quote};

use super::parse::{Facet, ParsedInput};

mod properties;

use properties::property_bindings;

/// Generics with a `Configurable` bound on every type parameter.
///
/// Generic structs also get a `Default` bound on `Self` when instances are
/// default-constructed, since a derived `Default` may require more of the
/// parameters than `Configurable` does.
fn bounded_generics(parsed: &ParsedInput, krate: &TokenStream) -> syn::Generics {
    let mut generics = parsed.generics.clone();
    let params: Vec<syn::Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause
            .predicates
            .push(parse_quote!(#param: #krate::Configurable));
    }
    if !parsed.struct_attrs.no_default {
        where_clause
            .predicates
            .push(parse_quote!(Self: ::core::default::Default));
    }
    generics
}

fn shape_tokens(facet: Facet, krate: &TokenStream) -> TokenStream {
    match facet {
        Facet::Object => quote! { #krate::Shape::Complex },
        Facet::Collection => quote! {
            #krate::Shape::Collection {
                element: #krate::TypeInfo::of::<<Self as #krate::ConfigCollection>::Item>,
            }
        },
        Facet::Dictionary => quote! {
            #krate::Shape::Dictionary {
                key: #krate::TypeInfo::of::<<Self as #krate::ConfigDictionary>::Key>,
                value: #krate::TypeInfo::of::<<Self as #krate::ConfigDictionary>::Value>,
            }
        },
    }
}

/// Generate `impl Configurable for T`.
pub(crate) fn configurable_impl(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let generics = bounded_generics(parsed, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let shape = shape_tokens(parsed.struct_attrs.facet, krate);
    let type_name = LitStr::new(&ident.to_string(), ident.span());
    let construct = if parsed.struct_attrs.no_default {
        quote! { ::core::option::Option::None }
    } else {
        quote! { ::core::option::Option::Some(<Self as ::core::default::Default>::default()) }
    };
    let parse_fn = parsed.struct_attrs.from_str.then(|| {
        quote! {
            fn parse(
                raw: &str,
                _culture: &#krate::Culture,
            ) -> ::core::option::Option<::core::result::Result<Self, #krate::ParseFailure>> {
                ::core::option::Option::Some(
                    <Self as ::core::str::FromStr>::from_str(raw)
                        .map_err(::core::convert::Into::into),
                )
            }
        }
    });
    quote! {
        impl #impl_generics #krate::Configurable for #ident #ty_generics #where_clause {
            fn shape() -> #krate::Shape {
                #shape
            }

            fn type_name() -> &'static str {
                #type_name
            }

            fn construct() -> ::core::option::Option<Self> {
                #construct
            }

            #parse_fn

            fn convert(
                converter: &#krate::Converter,
                section: &dyn #krate::ConfigSection,
                instance: #krate::ConversionInstance<'_, Self>,
            ) -> #krate::BindResult<#krate::ConversionResult<Self>> {
                converter.convert_object(section, instance)
            }
        }
    }
}

/// Generate `impl ConfigObject for T`.
pub(crate) fn object_impl(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let generics = bounded_generics(parsed, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let populate_items = match parsed.struct_attrs.facet {
        Facet::Object => None,
        Facet::Collection => Some(quote! { converter.populate_collection(self, section) }),
        Facet::Dictionary => Some(quote! { converter.populate_dictionary(self, section) }),
    }
    .map(|body| {
        quote! {
            fn populate_items(
                &mut self,
                converter: &#krate::Converter,
                section: &dyn #krate::ConfigSection,
            ) -> #krate::BindResult<()> {
                #body
            }
        }
    });
    let bindings = property_bindings(parsed, krate);
    let (converter, section) = if bindings.is_empty() {
        (quote! { _converter }, quote! { _section })
    } else {
        (quote! { converter }, quote! { section })
    };
    quote! {
        impl #impl_generics #krate::ConfigObject for #ident #ty_generics #where_clause {
            #populate_items

            fn bind_properties(
                &mut self,
                #converter: &#krate::Converter,
                #section: &dyn #krate::ConfigSection,
            ) -> #krate::BindResult<()> {
                #( #bindings )*
                ::core::result::Result::Ok(())
            }
        }
    }
}
