//! Ensures the re-exported dependency crates are reachable.

use config_binder::{figment::Figment, serde_json, uncased::UncasedStr};

#[test]
fn reexports_are_public() {
    let _figment = Figment::default();
    let _uncased = UncasedStr::new("key");
    let _value = serde_json::Value::Null;
}
