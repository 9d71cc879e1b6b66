//! Yoot Core - Adapter-based image URL transformation.
//!
//! Yoot turns an image source URL plus a set of high-level directives
//! (width, height, aspect ratio, crop, fit, format, quality, dpr) into the
//! URL a specific image CDN understands. It never fetches anything.
//!
//! # Architecture
//!
//! A transformation is an immutable [`Yoot`] value. Resolving its URL runs a
//! short pipeline:
//!
//! ```text
//! src → AdapterRegistry (hostname lookup) → prime_state → normalize_directives → generate_url
//! ```
//!
//! Provider adapters implement [`Adapter`] and are registered once at
//! startup, either on the process-wide registry or on an explicit
//! [`AdapterRegistry`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use yoot_core::{yoot, Format};
//!
//! yoot_adapters::register_all();
//!
//! let hero = yoot("https://cdn.sanity.io/images/p/d/image-1024x768.jpg")
//!     .width(600.0)?
//!     .aspect_ratio(16.0 / 9.0)?
//!     .format(Format::Webp)?;
//!
//! println!("{}", hero.url()?);
//! ```

// Module declarations
pub mod adapter;
pub mod config;
pub mod error;
pub mod helpers;
pub mod normalize;
pub mod types;
pub mod validate;
pub mod yoot;

// Re-exports for convenient access
pub use adapter::{
    define_adapter, define_config, merge_config, pass_through_adapter, register_adapters, Adapter,
    AdapterOptions, AdapterRegistry, GenerateUrlInput, PrimeStateInput,
};
pub use config::{
    Config, ConfigFile, FallbackConfig, LoggingConfig, MissingAdapterHook, MissingAdapterPolicy,
};
pub use error::{ConfigError, Result, ValidationError, YootError};
pub use helpers::{build_srcset, define_srcset_builder, SrcSetBuilder, SrcSetOptions};
pub use normalize::normalize_directives;
pub use types::{Crop, Directive, Directives, Fit, Format, YootState};
pub use yoot::{yoot, Yoot, YootInput};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
