//! Dimension normalization.
//!
//! Many providers have no native aspect-ratio parameter, so an `aspectRatio`
//! directive is resolved into concrete `width`/`height` pixels right before a
//! URL is generated. Precedence:
//!
//! 1. Explicit `width` and `height` win; `aspectRatio` is dropped.
//! 2. One explicit dimension plus `aspectRatio` derives the other.
//! 3. Intrinsic dimensions anchor the width when neither is set.
//!
//! With no anchor at all, `aspectRatio` is passed through untouched so the
//! adapter can encode it natively or ignore it.

use crate::types::{Directives, YootState};
use crate::validate::{has_intrinsic_dimensions, is_dimension, is_number};

/// Resolve `aspectRatio` against explicit and intrinsic dimensions.
///
/// Works on a copy; `input` is never modified.
pub fn normalize_directives(input: &YootState) -> Directives {
    let mut directives = input.directives;
    let width = directives.width.filter(|w| is_number(*w));
    let height = directives.height.filter(|h| is_number(*h));

    let aspect_ratio = match directives.aspect_ratio {
        Some(ar) if is_dimension(ar) && !(width.is_some() && height.is_some()) => ar,
        _ => {
            directives.aspect_ratio = None;
            return directives;
        }
    };

    if let Some(width) = width {
        directives.height = Some(round_half_up(width / aspect_ratio));
    } else if let Some(height) = height {
        directives.width = Some(round_half_up(height * aspect_ratio));
    } else if let Some(intrinsic_width) = input.width.filter(|_| has_intrinsic_dimensions(input)) {
        directives.width = Some(intrinsic_width);
        directives.height = Some(round_half_up(intrinsic_width / aspect_ratio));
    } else {
        return directives;
    }

    directives.aspect_ratio = None;
    directives
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
