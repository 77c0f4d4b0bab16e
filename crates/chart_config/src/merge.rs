//! Deep merge of user overrides onto defaults.
//!
//! Object-valued fields merge recursively; sequences are always replaced
//! wholesale by the override, never spliced or concatenated. Each config
//! section states the policy per field in its [`Merge`] impl.

use serde_json::Value;

/// Merges a partial override into `self`, which owns the result.
pub trait Merge {
    type Patch;

    fn merge(&mut self, patch: Self::Patch) -> &mut Self;
}

/// Writes `patch` into `slot` when present.
pub(crate) fn replace<T>(slot: &mut T, patch: Option<T>) {
    if let Some(v) = patch {
        *slot = v;
    }
}

/// Recursively merges a nested section when present.
pub(crate) fn merge_section<T: Merge>(slot: &mut T, patch: Option<T::Patch>) {
    if let Some(p) = patch {
        slot.merge(p);
    }
}

/// Untyped variant of [`Merge`] for raw JSON trees, with the same policy:
/// objects merge key by key, everything else (arrays included) is replaced.
pub fn merge_json<'a>(base: &'a mut Value, overrides: &Value) -> &'a mut Value {
    match (&mut *base, overrides) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, src_value) in src {
                match dst.get_mut(key) {
                    Some(dst_value) if dst_value.is_object() && src_value.is_object() => {
                        merge_json(dst_value, src_value);
                    }
                    _ => {
                        dst.insert(key.clone(), src_value.clone());
                    }
                }
            }
        }
        (dst, src) => *dst = src.clone(),
    }
    base
}
