//! Provider adapters: the trait every image service implements, the
//! reserved pass-through adapter, and the registry that maps URLs to
//! adapters.

mod pass_through;
mod provider;
mod registry;

pub use pass_through::{pass_through_adapter, PassThroughAdapter};
pub use provider::{
    define_adapter, Adapter, AdapterOptions, GenerateUrlFn, GenerateUrlInput, NormalizeUrlFn,
    PrimeStateFn, PrimeStateInput, SupportsFn,
};
pub use registry::{define_config, merge_config, register_adapters, AdapterRegistry};
