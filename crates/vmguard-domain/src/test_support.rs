use crate::model::Resource;
use crate::value::{AttrPath, AttrValue};
use serde_json::Value;

/// Build a resource from a flat JSON record: `id` plus attributes.
pub fn resource(record: Value) -> Resource {
    let Value::Object(mut map) = record else {
        panic!("resource record must be a JSON object");
    };
    let id = match map.remove("id") {
        Some(Value::String(id)) => id,
        other => panic!("resource record needs a string id, got {other:?}"),
    };
    let attributes = map
        .into_iter()
        .map(|(k, v)| (k, AttrValue::from(v)))
        .collect();
    Resource::with_attributes(id, attributes)
}

pub fn path(s: &str) -> AttrPath {
    AttrPath::parse(s).expect("test path is valid")
}
