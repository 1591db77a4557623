//! Extended-JSON reader: plain JSON plus the `$oid` / `$date` / `$numberLong` ...
//! wrappers document stores use when exporting typed values.
use base64::Engine;
use serde_json::{Map, Number, Value};

use super::{Document, RawValue};

/// Wrappers we recognize but do not model; they tag as `Other`.
const OPAQUE_WRAPPERS: &[&str] = &[
    "$numberDecimal",
    "$regularExpression",
    "$minKey",
    "$maxKey",
    "$symbol",
    "$code",
    "$undefined",
    "$dbPointer",
];

pub fn from_json(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Boolean(b),
        Value::Number(n) => from_number(&n),
        Value::String(s) => RawValue::String(s),
        Value::Array(xs) => RawValue::Array(xs.into_iter().map(from_json).collect()),
        Value::Object(map) => from_object(map),
    }
}

fn from_number(n: &Number) -> RawValue {
    if let Some(i) = n.as_i64() {
        match i32::try_from(i) {
            Ok(small) => RawValue::Int32(small),
            Err(_) => RawValue::Int64(i),
        }
    } else {
        // u64 beyond i64::MAX, or a float
        RawValue::Double(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn from_object(map: Map<String, Value>) -> RawValue {
    if map.len() == 1 {
        if let Some(key) = map.keys().next() {
            if let Some(wrapped) = single_key_wrapper(key, &map[key.as_str()]) {
                return wrapped;
            }
        }
    }
    // `$binary` also has a legacy two-key form: {"$binary": "<b64>", "$type": "00"}
    if map.len() == 2 && map.contains_key("$binary") && map.contains_key("$type") {
        return legacy_binary(&map["$binary"]);
    }
    let doc: Document = map.into_iter().map(|(k, v)| (k, from_json(v))).collect();
    RawValue::Document(doc)
}

fn single_key_wrapper(key: &str, payload: &Value) -> Option<RawValue> {
    let out = match key {
        "$oid" => payload.as_str().and_then(parse_object_id).map(RawValue::ObjectId),
        "$date" => parse_date(payload).map(RawValue::DateTime),
        "$timestamp" => parse_timestamp(payload),
        "$binary" => parse_binary(payload),
        "$numberInt" => payload.as_str().and_then(|s| s.parse().ok()).map(RawValue::Int32),
        "$numberLong" => payload.as_str().and_then(|s| s.parse().ok()).map(RawValue::Int64),
        "$numberDouble" => payload.as_str().and_then(parse_double).map(RawValue::Double),
        k if OPAQUE_WRAPPERS.contains(&k) => return Some(RawValue::Other(k.to_string())),
        _ => return None,
    };
    Some(out.unwrap_or_else(|| RawValue::Other(format!("malformed {key}"))))
}

fn parse_object_id(hex: &str) -> Option<[u8; 12]> {
    if hex.len() != 24 || !hex.is_ascii() {
        return None;
    }
    let mut out = [0u8; 12];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}

fn parse_date(payload: &Value) -> Option<i64> {
    match payload {
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.timestamp_millis()),
        Value::Number(n) => n.as_i64(),
        Value::Object(inner) => inner
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        _ => None,
    }
}

fn parse_timestamp(payload: &Value) -> Option<RawValue> {
    let time = payload.get("t")?.as_u64()?;
    let increment = payload.get("i")?.as_u64()?;
    Some(RawValue::Timestamp {
        time: u32::try_from(time).ok()?,
        increment: u32::try_from(increment).ok()?,
    })
}

fn parse_binary(payload: &Value) -> Option<RawValue> {
    let b64 = payload.get("base64")?.as_str()?;
    decode_b64(b64)
}

fn legacy_binary(payload: &Value) -> RawValue {
    payload
        .as_str()
        .and_then(decode_b64)
        .unwrap_or_else(|| RawValue::Other("malformed $binary".to_string()))
}

fn decode_b64(s: &str) -> Option<RawValue> {
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .ok()
        .map(RawValue::Binary)
}

fn parse_double(s: &str) -> Option<f64> {
    match s {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => s.parse().ok(),
    }
}
