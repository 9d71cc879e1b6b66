//! The reserved identity adapter.

use super::provider::{Adapter, GenerateUrlInput};
use once_cell::sync::Lazy;
use std::sync::Arc;
use url::Url;

/// Adapter that matches every URL and never transforms it.
///
/// Both the generated and the base URL are the source string as stored,
/// not the re-serialized parsed form.
///
/// Use it as the value returned from an `on_missing_adapter` hook. When
/// registered directly it must be registered last, since matching is
/// first-match-wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughAdapter;

impl Adapter for PassThroughAdapter {
    fn name(&self) -> &str {
        "pass-through"
    }

    fn supports(&self, _url: &Url) -> bool {
        true
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        input.raw_src.clone()
    }

    fn normalize_url(&self, url: &Url) -> String {
        url.to_string()
    }

    fn normalize_source(&self, raw_src: &str, _url: &Url) -> String {
        raw_src.to_string()
    }
}

static PASS_THROUGH: Lazy<Arc<dyn Adapter>> = Lazy::new(|| Arc::new(PassThroughAdapter));

/// The shared pass-through adapter instance.
///
/// Always the same `Arc`, so registering it twice is deduplicated.
pub fn pass_through_adapter() -> Arc<dyn Adapter> {
    Arc::clone(&PASS_THROUGH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Directives, Format};

    #[test]
    fn test_pass_through_returns_source_unchanged() {
        let adapter = pass_through_adapter();
        let src = Url::parse("https://anything.test/img.jpg?v=1").unwrap();
        let out = adapter.generate_url(&GenerateUrlInput {
            src: src.clone(),
            raw_src: src.to_string(),
            directives: Directives {
                width: Some(100.0),
                format: Some(Format::Webp),
                ..Default::default()
            },
        });
        assert_eq!(out, "https://anything.test/img.jpg?v=1");
        assert_eq!(adapter.normalize_url(&src), "https://anything.test/img.jpg?v=1");
        assert!(adapter.supports(&src));
    }

    #[test]
    fn test_pass_through_keeps_source_string_verbatim() {
        let adapter = pass_through_adapter();
        for raw in ["https://example.com", "https://EXAMPLE.com/a b.jpg"] {
            let src = Url::parse(raw).unwrap();
            assert_ne!(src.as_str(), raw);

            let out = adapter.generate_url(&GenerateUrlInput {
                src: src.clone(),
                raw_src: raw.to_string(),
                directives: Directives::default(),
            });
            assert_eq!(out, raw);
            assert_eq!(adapter.normalize_source(raw, &src), raw);
        }
    }

    #[test]
    fn test_pass_through_identity_is_stable() {
        assert!(Arc::ptr_eq(&pass_through_adapter(), &pass_through_adapter()));
    }
}
