//! Tests for `#[configurable(...)]` parsing behaviour.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, LitStr, Type, parse_quote};

use super::{Facet, RenameAll, option_inner, parse_input};

#[rstest]
fn parses_struct_and_field_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[configurable(collection, rename_all = "snake_case", crate = "my_cfg")]
        struct Demo {
            #[configurable(rename = "Label")]
            name: String,
            #[configurable(read_only)]
            tags: Vec<String>,
            #[configurable(skip)]
            cache: u32,
            #[configurable(flatten)]
            base: Base,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.ident == "Demo");
    ensure!(parsed.struct_attrs.facet == Facet::Collection);
    ensure!(parsed.struct_attrs.rename_all == RenameAll::Snake);
    ensure!(parsed.struct_attrs.crate_path.is_some());
    let flags: Vec<(Option<&str>, bool, bool, bool)> = parsed
        .field_attrs
        .iter()
        .map(|attrs| (attrs.rename.as_deref(), attrs.read_only, attrs.skip, attrs.flatten))
        .collect();
    ensure!(
        flags
            == [
                (Some("Label"), false, false, false),
                (None, true, false, false),
                (None, false, true, false),
                (None, false, false, true),
            ],
        "unexpected field attributes {flags:?}"
    );
    Ok(())
}

#[rstest]
fn explicit_false_flags_are_respected() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[configurable(no_default = false, from_str)]
        struct Demo {
            #[configurable(skip = false)]
            name: String,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(!parsed.struct_attrs.no_default);
    ensure!(parsed.struct_attrs.from_str);
    ensure!(parsed.field_attrs.first().is_some_and(|attrs| !attrs.skip));
    Ok(())
}

#[rstest]
fn unknown_keys_are_ignored() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[configurable(future_key = "x", other(nested))]
        struct Demo {
            #[configurable(unknown = 1)]
            name: String,
        }
    };
    ensure!(parse_input(&input).is_ok());
    Ok(())
}

#[rstest]
#[case::facets(
    parse_quote! {
        #[configurable(collection, dictionary)]
        struct Demo { name: String }
    },
    "cannot be combined"
)]
#[case::rename_rule(
    parse_quote! {
        #[configurable(rename_all = "Title Case")]
        struct Demo { name: String }
    },
    "unsupported rename_all"
)]
#[case::flatten_rename(
    parse_quote! {
        struct Demo {
            #[configurable(flatten, rename = "X")]
            base: Base,
        }
    },
    "cannot be combined"
)]
#[case::flatten_option(
    parse_quote! {
        struct Demo {
            #[configurable(flatten)]
            base: Option<Base>,
        }
    },
    "not an `Option`"
)]
#[case::tuple(parse_quote! { struct Demo(u32); }, "named fields")]
#[case::enumeration(parse_quote! { enum Demo { A } }, "only be derived for structs")]
#[case::non_string(
    parse_quote! {
        struct Demo {
            #[configurable(rename = 5)]
            name: String,
        }
    },
    "rename must be a string"
)]
fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error containing '{message}'"));
    };
    ensure!(err.to_string().contains(message), "unexpected error: {err}");
    Ok(())
}

#[rstest]
#[case::pascal("PascalCase", "max_retry_count", "MaxRetryCount")]
#[case::camel("camelCase", "max_retry_count", "maxRetryCount")]
#[case::snake("snake_case", "max_retry_count", "max_retry_count")]
#[case::screaming("SCREAMING_SNAKE_CASE", "max_retry_count", "MAX_RETRY_COUNT")]
#[case::kebab("kebab-case", "max_retry_count", "max-retry-count")]
#[case::lower("lowercase", "max_retry_count", "maxretrycount")]
#[case::raw_ident("PascalCase", "r#type", "Type")]
fn rename_rules_apply(#[case] rule: &str, #[case] field: &str, #[case] expected: &str) -> Result<()> {
    let lit = LitStr::new(rule, proc_macro2::Span::call_site());
    let key = RenameAll::parse(&lit).map_err(|err| anyhow!(err))?.apply(field);
    ensure!(key == expected, "{rule}: {key}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(Option<u32>), true)]
#[case(parse_quote!(std::option::Option<u32>), true)]
#[case(parse_quote!(core::option::Option<Vec<u8>>), true)]
#[case(parse_quote!(Vec<u32>), false)]
#[case(parse_quote!(u32), false)]
fn option_inner_matches_wrappers(#[case] ty: Type, #[case] expected: bool) -> Result<()> {
    ensure!(option_inner(&ty).is_some() == expected);
    Ok(())
}
