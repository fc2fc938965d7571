//! Final cleanup of the serialized root object.

use serde_json::Value;

use super::GLB_BUFFER_URI;

/// One non-recursive pass over the root object: resolve the container-mode
/// URI rewrite, then drop top-level keys holding an empty array, `null`, or
/// an empty string. Nested objects are the emitters' responsibility.
pub(crate) fn clean_root(root: &mut Value) {
    let Value::Object(map) = root else {
        return;
    };
    if let Some(Value::Array(buffers)) = map.get_mut("buffers") {
        for buffer in buffers {
            let Value::Object(def) = buffer else {
                continue;
            };
            if def.get("uri").and_then(Value::as_str) == Some(GLB_BUFFER_URI) {
                def.remove("uri");
            }
        }
    }
    map.retain(|_, value| match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    });
}
