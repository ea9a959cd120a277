//! Bridge from figment providers to a bindable JSON tree.

use figment::Figment;
use serde_json::Value;

use crate::{BindResult, BindResultExt};

/// Extract the merged data of `figment` as a JSON document.
///
/// The result can be bound through [`JsonSection`](super::JsonSection) or
/// pushed as one fragment of a layered conversion. Figment's own merge rules
/// apply before binding; the binder only sees the merged tree.
///
/// # Errors
///
/// Returns [`BindError::Gathering`](crate::BindError::Gathering) when a
/// provider fails to load.
///
/// # Examples
///
/// ```
/// use config_binder::gather;
/// use figment::{Figment, providers::Serialized};
///
/// let figment = Figment::from(Serialized::defaults(serde_json::json!({"Port": 8080})));
/// let tree = gather(&figment).expect("serialized data is valid");
/// assert_eq!(tree["Port"], 8080);
/// ```
pub fn gather(figment: &Figment) -> BindResult<Value> {
    figment.extract::<Value>().into_bind()
}
