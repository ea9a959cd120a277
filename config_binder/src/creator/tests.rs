//! Unit tests for the default and factory-backed creators.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::{DefaultInstanceCreator, FactoryInstanceCreator, InstanceCreator};
use crate::conversion::ConversionResult;
use crate::shape::TypeInfo;
use crate::{BindError, Culture};

fn value_of<T: 'static + Clone>(created: ConversionResult<Box<dyn Any>>) -> Result<T> {
    let ConversionResult::Value(boxed) = created else {
        return Err(anyhow!("expected a value"));
    };
    boxed
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| anyhow!("unexpected payload type"))
}

#[rstest]
fn default_creator_builds_from_construct() -> Result<()> {
    let creator = DefaultInstanceCreator::default();
    let created = creator.create(&TypeInfo::of::<String>()).map_err(|e| anyhow!("{e}"))?;
    ensure!(value_of::<String>(created)?.is_empty());
    Ok(())
}

#[rstest]
#[case::blank("   ")]
#[case::empty("")]
fn blank_input_is_null_for_nullable_types(#[case] raw: &str) -> Result<()> {
    let creator = DefaultInstanceCreator::default();
    let created = creator.create_from_str(&TypeInfo::of::<Option<i32>>(), raw)?;
    ensure!(matches!(created, ConversionResult::Null));
    Ok(())
}

#[rstest]
fn parse_failure_names_type_and_raw() -> Result<()> {
    let creator = DefaultInstanceCreator::default();
    let Err(err) = creator.create_from_str(&TypeInfo::of::<i32>(), "4x2") else {
        return Err(anyhow!("expected parse failure"));
    };
    ensure!(err.type_name == "i32");
    ensure!(err.raw == "4x2");
    Ok(())
}

#[rstest]
fn types_without_string_form_are_invalid() -> Result<()> {
    let creator = DefaultInstanceCreator::default();
    let created = creator.create_from_str(&TypeInfo::of::<Vec<i32>>(), "1")?;
    ensure!(matches!(created, ConversionResult::Invalid));
    Ok(())
}

#[rstest]
fn culture_drives_decimal_parsing() -> Result<()> {
    let creator = DefaultInstanceCreator::new("de-DE".parse::<Culture>()?);
    let parsed = value_of::<f64>(creator.create_from_str(&TypeInfo::of::<f64>(), "42,1")?)?;
    ensure!(parsed.to_string() == "42.1", "parsed {parsed}");
    Ok(())
}

#[rstest]
#[case::empty(0)]
#[case::three(3)]
fn arrays_have_exact_length(#[case] len: usize) -> Result<()> {
    let creator = DefaultInstanceCreator::default();
    let created = creator
        .create_array(&TypeInfo::of::<i32>(), len)
        .map_err(|e| anyhow!("{e}"))?;
    let array = value_of::<Vec<i32>>(created)?;
    ensure!(array.len() == len, "expected {len}, got {}", array.len());
    ensure!(array.iter().all(|item| *item == 0));
    Ok(())
}

#[rstest]
fn factories_take_precedence_and_are_called_per_instance() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let creator = FactoryInstanceCreator::new().register(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        BTreeMap::from([(String::from("seed"), 1_i32)])
    });
    let info = TypeInfo::of::<BTreeMap<String, i32>>();
    let first = value_of::<BTreeMap<String, i32>>(creator.create(&info).map_err(|e| anyhow!("{e}"))?)?;
    ensure!(first.get("seed") == Some(&1));
    let _second = creator.create(&info).map_err(|e| anyhow!("{e}"))?;
    ensure!(calls.load(Ordering::SeqCst) == 2);
    Ok(())
}

#[rstest]
fn routed_types_require_registration() -> Result<()> {
    let creator = FactoryInstanceCreator::new().route::<BTreeMap<String, i32>>();
    let err = creator
        .create(&TypeInfo::of::<BTreeMap<String, i32>>())
        .err()
        .ok_or_else(|| anyhow!("expected NotRegistered"))?;
    ensure!(matches!(&*err, BindError::NotRegistered { .. }), "unexpected error {err}");
    Ok(())
}

#[rstest]
fn route_all_leaves_simple_types_to_the_fallback() -> Result<()> {
    let creator = FactoryInstanceCreator::new().route_all();
    let simple = creator.create(&TypeInfo::of::<i32>()).map_err(|e| anyhow!("{e}"))?;
    ensure!(value_of::<i32>(simple)? == 0);
    let complex = creator.create(&TypeInfo::of::<BTreeMap<String, i32>>());
    ensure!(complex.is_err(), "complex types must be registered");
    Ok(())
}

#[rstest]
fn factory_failures_are_reported() -> Result<()> {
    let creator = FactoryInstanceCreator::new()
        .register_fallible(|| Err::<BTreeMap<String, i32>, _>("database unavailable"));
    let err = creator
        .create(&TypeInfo::of::<BTreeMap<String, i32>>())
        .err()
        .ok_or_else(|| anyhow!("expected factory failure"))?;
    ensure!(matches!(&*err, BindError::Factory { .. }));
    ensure!(err.to_string().contains("database unavailable"));
    Ok(())
}

#[rstest]
fn factory_arrays_fill_every_slot() -> Result<()> {
    let creator = FactoryInstanceCreator::new().register(|| String::from("slot"));
    let created = creator
        .create_array(&TypeInfo::of::<String>(), 2)
        .map_err(|e| anyhow!("{e}"))?;
    let array = value_of::<Vec<String>>(created)?;
    ensure!(array == ["slot", "slot"]);
    Ok(())
}
