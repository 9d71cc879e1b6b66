//! Type predicates and precondition checks for directive values.

use crate::error::ValidationError;
use crate::types::YootState;
use url::Url;

/// Parse an absolute URL, returning `None` for anything else.
pub fn parse_url(value: &str) -> Option<Url> {
    Url::parse(value).ok()
}

/// True if `value` parses as an absolute URL.
pub fn is_url(value: &str) -> bool {
    parse_url(value).is_some()
}

/// True if `value` is a finite number.
pub fn is_number(value: f64) -> bool {
    value.is_finite()
}

/// True if `value` is a usable dimension: finite and strictly positive.
pub fn is_dimension(value: f64) -> bool {
    is_number(value) && value > 0.0
}

/// True if both intrinsic dimensions are known.
pub fn has_intrinsic_dimensions(state: &YootState) -> bool {
    matches!((state.width, state.height), (Some(w), Some(h)) if is_number(w) && is_number(h))
}

/// Check that `value` is finite and within `[min, max]`.
pub fn must_be_in_range(
    directive: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !is_number(value) {
        return Err(ValidationError::NotFinite { directive });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            directive,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Check that `value` is finite and strictly greater than zero.
pub fn must_be_positive(directive: &'static str, value: f64) -> Result<(), ValidationError> {
    if !is_number(value) {
        return Err(ValidationError::NotFinite { directive });
    }
    if value <= 0.0 {
        return Err(ValidationError::OutOfRange {
            directive,
            min: 0.0,
            max: f64::INFINITY,
            value,
        });
    }
    Ok(())
}

/// Check that `value` is a member of `allowed`.
pub fn must_be_one_of(
    directive: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::NotOneOf {
            directive,
            allowed,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://cdn.example.com/a.jpg"));
        assert!(is_url("data:image/png;base64,AAAA"));
        assert!(!is_url("oops"));
        assert!(!is_url("/relative/path.jpg"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_is_dimension() {
        assert!(is_dimension(1.0));
        assert!(!is_dimension(0.0));
        assert!(!is_dimension(-3.0));
        assert!(!is_dimension(f64::NAN));
        assert!(!is_dimension(f64::INFINITY));
    }

    #[test]
    fn test_has_intrinsic_dimensions() {
        let mut state = YootState {
            width: Some(100.0),
            ..Default::default()
        };
        assert!(!has_intrinsic_dimensions(&state));
        state.height = Some(50.0);
        assert!(has_intrinsic_dimensions(&state));
    }

    #[test]
    fn test_must_be_in_range_bounds_are_inclusive() {
        assert!(must_be_in_range("quality", 0.0, 0.0, 100.0).is_ok());
        assert!(must_be_in_range("quality", 100.0, 0.0, 100.0).is_ok());
        assert!(matches!(
            must_be_in_range("quality", -1.0, 0.0, 100.0),
            Err(ValidationError::OutOfRange { value, .. }) if value == -1.0
        ));
        assert!(must_be_in_range("quality", 101.0, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_must_be_in_range_rejects_non_finite() {
        let err = must_be_in_range("width", f64::NAN, 1.0, f64::INFINITY).unwrap_err();
        assert_eq!(err, ValidationError::NotFinite { directive: "width" });
        let err = must_be_in_range("width", f64::INFINITY, 1.0, f64::INFINITY).unwrap_err();
        assert_eq!(err, ValidationError::NotFinite { directive: "width" });
    }

    #[test]
    fn test_must_be_positive() {
        assert!(must_be_positive("aspectRatio", 0.5).is_ok());
        assert!(must_be_positive("aspectRatio", 0.0).is_err());
        assert!(must_be_positive("aspectRatio", -1.0).is_err());
    }

    #[test]
    fn test_must_be_one_of() {
        const FITS: &[&str] = &["contain", "cover"];
        assert!(must_be_one_of("fit", "cover", FITS).is_ok());
        let err = must_be_one_of("fit", "fill", FITS).unwrap_err();
        assert!(err.to_string().contains("contain, cover"));
    }
}
