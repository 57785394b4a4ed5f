use anyhow::Context;
use serde_json::{Map, Value};
use vmguard_domain::{AttrValue, Resource};

/// Parse one inventory document: a bare array of records, or an object with a
/// `resources` array.
pub fn parse_records(text: &str) -> anyhow::Result<Vec<Resource>> {
    let doc: Value = serde_json::from_str(text).context("parse inventory JSON")?;

    let records = match doc {
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("resources") {
            Some(Value::Array(records)) => records,
            Some(_) => anyhow::bail!("`resources` must be an array"),
            None => anyhow::bail!("expected an array of records or an object with `resources`"),
        },
        _ => anyhow::bail!("expected an array of records or an object with `resources`"),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            parse_record(record).with_context(|| format!("invalid record at index {index}"))
        })
        .collect()
}

fn parse_record(record: Value) -> anyhow::Result<Resource> {
    let Value::Object(mut fields) = record else {
        anyhow::bail!("record must be a JSON object");
    };

    let id = match fields.remove("id") {
        Some(Value::String(id)) => id,
        Some(other) => anyhow::bail!("`id` must be a string, got {other}"),
        None => anyhow::bail!("record has no `id`"),
    };

    Ok(Resource::with_attributes(id, attributes(fields)))
}

fn attributes(fields: Map<String, Value>) -> vmguard_domain::Attributes {
    fields
        .into_iter()
        .map(|(k, v)| (k, AttrValue::from(v)))
        .collect()
}
