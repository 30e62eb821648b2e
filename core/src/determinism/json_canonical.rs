use crate::error::CoreResult;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// Canonical form used for output fingerprints:
// - UTF-8 JSON, no insignificant whitespace
// - object keys sorted lexicographically at every depth
// - array order preserved
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    let s = serde_json::to_string(&sort_keys(v))?;
    Ok(s.into_bytes())
}

fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, vv)| (k, sort_keys(vv))).collect();
            // serde_json::Map may preserve insertion order; rebuild from the sorted map.
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_does_not_matter() {
        let a = serde_json::json!({"b": "1", "a": {"y": "2", "x": "3"}});
        let b = serde_json::json!({"a": {"x": "3", "y": "2"}, "b": "1"});
        assert_eq!(to_canonical_bytes(&a).unwrap(), to_canonical_bytes(&b).unwrap());
    }

    #[test]
    fn test_compact_output() {
        let v = serde_json::json!({"channel": "Direct", "list": ["b", "a"]});
        let s = String::from_utf8(to_canonical_bytes(&v).unwrap()).unwrap();
        assert_eq!(s, r#"{"channel":"Direct","list":["b","a"]}"#);
    }
}
