//! Provider adapters for yoot-core.
//!
//! Each module exposes a unit adapter type and a shared instance:
//!
//! | Module         | Hosts                                              | Encoding              |
//! |----------------|----------------------------------------------------|-----------------------|
//! | [`imgix`]      | `*.imgix.net`                                      | query parameters      |
//! | [`shopify`]    | `cdn.shopify.com`                                  | file-name segments    |
//! | [`cloudinary`] | `res.cloudinary.com`, `cloudinary-a.akamaihd.net`  | path segment          |
//! | [`sanity`]     | `cdn.sanity.io`                                    | query parameters      |
//!
//! ```rust,ignore
//! yoot_adapters::register_all();
//! let url = yoot_core::yoot("https://demo.imgix.net/a.jpg").width(300.0)?.url()?;
//! ```

pub mod cloudinary;
pub mod imgix;
mod params;
pub mod sanity;
pub mod shopify;

pub use cloudinary::CloudinaryAdapter;
pub use imgix::ImgixAdapter;
pub use sanity::SanityAdapter;
pub use shopify::ShopifyAdapter;

use std::sync::Arc;
use yoot_core::{Adapter, AdapterRegistry};

/// The shared instances of every built-in adapter.
pub fn adapters() -> Vec<Arc<dyn Adapter>> {
    vec![
        imgix::adapter(),
        shopify::adapter(),
        cloudinary::adapter(),
        sanity::adapter(),
    ]
}

/// Register every built-in adapter on the process-wide registry.
///
/// Idempotent: the shared instances are only added once.
pub fn register_all() {
    register_all_in(&AdapterRegistry::global());
}

/// Register every built-in adapter on `registry`.
pub fn register_all_in(registry: &AdapterRegistry) {
    registry.register(adapters());
    tracing::debug!(adapters = registry.len(), "Registered built-in adapters");
}


#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_register_all_in_is_idempotent() {
        let registry = AdapterRegistry::new();
        register_all_in(&registry);
        register_all_in(&registry);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_dispatch_by_hostname() {
        let registry = AdapterRegistry::new();
        register_all_in(&registry);
        for (src, name) in [
            ("https://demo.imgix.net/a.jpg", "imgix"),
            ("https://cdn.shopify.com/s/files/a.jpg", "shopify"),
            ("https://res.cloudinary.com/demo/image/upload/a.jpg", "cloudinary"),
            ("https://cdn.sanity.io/images/p/d/a-10x10.jpg", "sanity"),
        ] {
            let adapter = registry.resolve(&Url::parse(src).unwrap()).unwrap();
            assert_eq!(adapter.name(), name);
        }
        assert!(registry
            .resolve(&Url::parse("https://example.com/a.jpg").unwrap())
            .is_err());
    }

    #[test]
    fn test_register_all_global() {
        register_all();
        register_all();
        let image = yoot_core::yoot("https://demo.imgix.net/a.jpg")
            .width(300.0)
            .unwrap();
        assert_eq!(image.url().unwrap(), "https://demo.imgix.net/a.jpg?w=300");
    }

    #[test]
    fn test_base_url_with_builtin_adapters() {
        let image = test_support::bound("https://demo.imgix.net/a.jpg?w=300&h=200");
        assert_eq!(image.base_url().as_deref(), Some("https://demo.imgix.net/a.jpg"));
    }
}
