//! Adapter trait and request types.
//!
//! Defines the interface every image provider implements, plus
//! [`define_adapter`], which builds an adapter from closures and rejects
//! definitions missing a mandatory function.

use crate::error::{Result, YootError};
use crate::types::{Directives, YootState};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Input handed to [`Adapter::generate_url`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateUrlInput {
    /// The source image URL
    pub src: Url,
    /// The source exactly as stored, before URL parsing rewrote it
    pub raw_src: String,
    /// Normalized transformation directives
    pub directives: Directives,
}

/// Input handed to [`Adapter::prime_state`]: a state whose source is known
/// to be present and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeStateInput {
    pub src: Url,
    pub alt: Option<String>,
    /// Intrinsic width, if known
    pub width: Option<f64>,
    /// Intrinsic height, if known
    pub height: Option<f64>,
    pub directives: Directives,
}

impl From<PrimeStateInput> for YootState {
    fn from(input: PrimeStateInput) -> Self {
        Self {
            src: Some(input.src.into()),
            alt: input.alt,
            width: input.width,
            height: input.height,
            directives: input.directives,
        }
    }
}

/// Trait that all image provider adapters implement.
///
/// Adapters live for the whole process and are shared between threads
/// through `Arc<dyn Adapter>`.
pub trait Adapter: Send + Sync {
    /// Adapter name for logging (e.g., "imgix", "shopify").
    fn name(&self) -> &str;

    /// Whether this adapter handles the given URL.
    fn supports(&self, url: &Url) -> bool;

    /// Produce the transformed URL.
    ///
    /// Directives the provider cannot express must be ignored.
    fn generate_url(&self, input: &GenerateUrlInput) -> String;

    /// Strip this adapter's own transformation encoding from `url`.
    fn normalize_url(&self, url: &Url) -> String;

    /// Base URL for a stored source string and its parsed form.
    ///
    /// Defaults to [`normalize_url`](Self::normalize_url) on the parsed form.
    fn normalize_source(&self, _raw_src: &str, url: &Url) -> String {
        self.normalize_url(url)
    }

    /// Adjust the state before directives are normalized.
    fn prime_state(&self, input: PrimeStateInput) -> YootState {
        input.into()
    }
}

impl fmt::Debug for dyn Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter").field("name", &self.name()).finish()
    }
}

pub type SupportsFn = Arc<dyn Fn(&Url) -> bool + Send + Sync>;
pub type GenerateUrlFn = Arc<dyn Fn(&GenerateUrlInput) -> String + Send + Sync>;
pub type NormalizeUrlFn = Arc<dyn Fn(&Url) -> String + Send + Sync>;
pub type PrimeStateFn = Arc<dyn Fn(PrimeStateInput) -> YootState + Send + Sync>;

/// Closure-based adapter definition for [`define_adapter`].
#[derive(Clone, Default)]
pub struct AdapterOptions {
    name: Option<String>,
    supports: Option<SupportsFn>,
    generate_url: Option<GenerateUrlFn>,
    normalize_url: Option<NormalizeUrlFn>,
    prime_state: Option<PrimeStateFn>,
}

impl AdapterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn supports(mut self, f: impl Fn(&Url) -> bool + Send + Sync + 'static) -> Self {
        self.supports = Some(Arc::new(f));
        self
    }

    pub fn generate_url(
        mut self,
        f: impl Fn(&GenerateUrlInput) -> String + Send + Sync + 'static,
    ) -> Self {
        self.generate_url = Some(Arc::new(f));
        self
    }

    pub fn normalize_url(mut self, f: impl Fn(&Url) -> String + Send + Sync + 'static) -> Self {
        self.normalize_url = Some(Arc::new(f));
        self
    }

    pub fn prime_state(
        mut self,
        f: impl Fn(PrimeStateInput) -> YootState + Send + Sync + 'static,
    ) -> Self {
        self.prime_state = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for AdapterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("name", &self.name)
            .field("supports", &self.supports.is_some())
            .field("generate_url", &self.generate_url.is_some())
            .field("normalize_url", &self.normalize_url.is_some())
            .field("prime_state", &self.prime_state.is_some())
            .finish()
    }
}

/// An adapter assembled from closures.
struct FnAdapter {
    name: String,
    supports: SupportsFn,
    generate_url: GenerateUrlFn,
    normalize_url: NormalizeUrlFn,
    prime_state: Option<PrimeStateFn>,
}

impl Adapter for FnAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, url: &Url) -> bool {
        (self.supports)(url)
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        (self.generate_url)(input)
    }

    fn normalize_url(&self, url: &Url) -> String {
        (self.normalize_url)(url)
    }

    fn prime_state(&self, input: PrimeStateInput) -> YootState {
        match &self.prime_state {
            Some(prime) => prime(input),
            None => input.into(),
        }
    }
}

/// Build an adapter from closures.
///
/// `supports`, `generate_url` and `normalize_url` are mandatory; a missing
/// one is rejected here rather than at resolution time.
pub fn define_adapter(options: AdapterOptions) -> Result<Arc<dyn Adapter>> {
    let name = options.name.unwrap_or_else(|| "custom".to_string());
    let missing = |function: &str| {
        YootError::MalformedAdapter(format!(
            "adapter '{name}' must implement `{function}` function"
        ))
    };

    let supports = options.supports.ok_or_else(|| missing("supports"))?;
    let generate_url = options.generate_url.ok_or_else(|| missing("generate_url"))?;
    let normalize_url = options
        .normalize_url
        .ok_or_else(|| missing("normalize_url"))?;

    tracing::trace!(adapter = %name, "Defined adapter");

    Ok(Arc::new(FnAdapter {
        name,
        supports,
        generate_url,
        normalize_url,
        prime_state: options.prime_state,
    }))
}
