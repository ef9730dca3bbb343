use serde_json::{Map, Value};

/// Deep-merge `overlay` into `base`.
/// Objects merge per key, arrays and scalars in the overlay replace the base value.
/// `null` in the overlay means "not provided" and leaves the base untouched.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(over_map)) => {
            for (key, over_val) in over_map {
                if over_val.is_null() {
                    continue;
                }
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, over_val),
                    None => {
                        base_map.insert(key.clone(), over_val.clone());
                    }
                }
            }
        }
        (slot, over) => *slot = over.clone(),
    }
}

/// Fold an ordered list of partial configs left-to-right. Later layers win.
/// Layers that are not JSON objects are ignored.
pub fn resolve_layers(layers: &[&Value]) -> Value {
    let mut merged = Value::Object(Map::new());
    for layer in layers {
        if layer.is_object() {
            deep_merge(&mut merged, layer);
        } else if !layer.is_null() {
            log::warn!("Ignoring non-object config layer: {}", type_name(layer));
        }
    }
    merged
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
