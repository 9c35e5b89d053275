//! Hard/soft UI bounds for numeric attributes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::options::AttributeOptions;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub soft_min: f64,
    pub soft_max: f64,
}

/// Resolve option hints into bounds.
///
/// Nothing is applied unless `ui_min < ui_max`, soft hints included. When the
/// hard range holds, soft bounds come from the soft hints if
/// `ui_soft_min < ui_soft_max` and otherwise repeat the hard bounds.
pub fn resolve_range(options: &AttributeOptions) -> Option<NumericRange> {
    if !strictly_less(options.ui_min, options.ui_max) {
        log::trace!(
            "range [{}, {}] is degenerate, leaving attribute unbounded",
            options.ui_min,
            options.ui_max
        );
        return None;
    }

    let (soft_min, soft_max) = if strictly_less(options.ui_soft_min, options.ui_soft_max) {
        (options.ui_soft_min, options.ui_soft_max)
    } else {
        (options.ui_min, options.ui_max)
    };

    Some(NumericRange {
        min: options.ui_min,
        max: options.ui_max,
        soft_min,
        soft_max,
    })
}

// NaN on either side never counts as ordered.
#[inline]
fn strictly_less(a: f64, b: f64) -> bool {
    a.partial_cmp(&b) == Some(Ordering::Less)
}
