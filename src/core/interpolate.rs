//! Interpolation of deferred values
//!
//! Walks a request document and produces an independent copy in which every
//! [`DeferredValue`](crate::core::entities::DeferredValue) has been replaced by
//! its expression. Container kinds, key order and element order are kept; the
//! input document is never modified. Sets are deduplicated again once their
//! elements are resolved.

use crate::core::entities::{Expressible, RequestValue, SequenceKind};

/// Replace every deferred value in `value` with its workflow expression
pub fn interpolate(value: &RequestValue) -> RequestValue {
    match value {
        // expressions are terminal, never walk into them
        RequestValue::Deferred(deferred) => deferred.expr().into_json().into(),
        RequestValue::Object(map) => RequestValue::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), interpolate(value)))
                .collect(),
        ),
        // distinct deferred values may resolve to the same expression
        RequestValue::Sequence(SequenceKind::Set, items) => {
            RequestValue::set(items.iter().map(interpolate).collect())
        }
        RequestValue::Sequence(kind, items) => {
            RequestValue::Sequence(*kind, items.iter().map(interpolate).collect())
        }
        scalar => scalar.clone(),
    }
}
