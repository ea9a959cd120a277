//! Trybuild fixture checking `#[configurable(crate = "...")]` against a
//! `use ... as` rename of the crate.

use config_binder as my_cfg;
use my_cfg::{Configurable, Converter, JsonSection};
use serde_json::json;

#[derive(Debug, Default, Configurable)]
#[configurable(crate = "my_cfg", rename_all = "camelCase")]
struct AliasedConfig {
    value: String,
    retry_count: u32,
    #[configurable(flatten)]
    nested: Nested,
}

#[derive(Debug, Default, Configurable)]
#[configurable(crate = "my_cfg")]
struct Nested {
    label: Option<String>,
}

fn main() {
    let doc = json!({"value": "hello", "retryCount": 1, "Label": "x"});
    let result = Converter::new().convert::<AliasedConfig>(&JsonSection::new(&doc));
    let _: my_cfg::BindResult<AliasedConfig> = result;
}
