//! Trybuild fixture checking `#[configurable(crate = "...")]` with the real
//! crate name.

use config_binder::{Configurable, Converter, JsonSection};
use serde_json::json;

#[derive(Debug, Default, Configurable)]
#[configurable(crate = "config_binder")]
struct CratePathConfig {
    value: String,
    count: u32,
}

fn main() {
    let doc = json!({"Value": "hello", "Count": 1});
    let result = Converter::new().convert::<CratePathConfig>(&JsonSection::new(&doc));
    let _: config_binder::BindResult<CratePathConfig> = result;
}
