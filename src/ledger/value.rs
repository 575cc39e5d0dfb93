// Ledger value accessors
// Handler objects arrive as JSON trees of `{fields: {...}}` wrappers. The
// associative maps inside them are sequences of `{fields: {key, value}}`
// entries. These helpers peel that structure without ever failing: a missing
// or mis-shaped layer yields `None` or a default, never an error.

use serde_json::Value;

/// The `fields` object of a wrapped ledger struct, if present.
pub fn fields_of(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    value.get("fields")?.as_object()
}

/// The entries of an embedded associative map stored under `name`:
/// `fields.<name>.fields.contents` as an array.
pub fn map_entries<'a>(fields: &'a serde_json::Map<String, Value>, name: &str) -> &'a [Value] {
    fields
        .get(name)
        .and_then(fields_of)
        .and_then(|inner| inner.get("contents"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A map entry's key, if the entry is well formed.
pub fn entry_key(entry: &Value) -> Option<&str> {
    fields_of(entry)?.get("key")?.as_str()
}

/// A map entry's value fields, if the entry is well formed.
pub fn entry_value_fields(entry: &Value) -> Option<&serde_json::Map<String, Value>> {
    fields_of(entry)?.get("value").and_then(fields_of)
}

/// A string field, or `default` when absent or not a string.
pub fn str_field<'a>(
    fields: &'a serde_json::Map<String, Value>,
    name: &str,
    default: &'a str,
) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or(default)
}

/// An unsigned integer field. The ledger serializes u64 values either as
/// JSON numbers or as decimal strings; both are accepted. Defaults to 0.
pub fn u64_field(fields: &serde_json::Map<String, Value>, name: &str) -> u64 {
    fields.get(name).map(coerce_u64).unwrap_or(0)
}

/// A floating-point field, accepting numbers or numeric strings. Defaults
/// to 0.0.
pub fn f64_field(fields: &serde_json::Map<String, Value>, name: &str) -> f64 {
    fields
        .get(name)
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0)
}

/// An object identifier field. Identifiers appear either as plain strings or
/// as `{id: "0x.."}` wrappers.
pub fn id_field<'a>(fields: &'a serde_json::Map<String, Value>, name: &str) -> Option<&'a str> {
    match fields.get(name)? {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str),
        _ => None,
    }
}

/// Coerce a JSON value to u64: numbers directly, decimal strings by parsing,
/// anything else to 0.
pub fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Unwrap a full RPC object response down to its content value. Accepts
/// either the outer `{data: {content: ...}}` envelope or the bare content.
pub fn object_content(response: &Value) -> &Value {
    response
        .get("data")
        .and_then(|d| d.get("content"))
        .unwrap_or(response)
}
