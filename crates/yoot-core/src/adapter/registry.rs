//! Adapter registration and hostname-based resolution.
//!
//! Registered adapters are tried in registration order and the first whose
//! `supports` returns true wins. The winner is cached under the URL's
//! hostname and every later lookup for that hostname returns it without
//! consulting `supports` again. The cache is only cleared by [`reset`].
//!
//! [`reset`]: AdapterRegistry::reset

use super::provider::Adapter;
use crate::config::Config;
use crate::error::{Result, YootError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

static GLOBAL: Lazy<Arc<AdapterRegistry>> = Lazy::new(|| Arc::new(AdapterRegistry::new()));

/// A set of adapters plus the hostname lookup cache.
///
/// Locks only make the registry shareable as a static; registration and
/// lookup are expected to come from one logical thread of control.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<Vec<Arc<dyn Adapter>>>,
    cache: RwLock<HashMap<String, Arc<dyn Adapter>>>,
    config: RwLock<Config>,
}

impl AdapterRegistry {
    /// Create an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            ..Self::default()
        }
    }

    /// The process-wide default registry.
    pub fn global() -> Arc<AdapterRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register adapters. Instances already registered are skipped.
    pub fn register<I>(&self, adapters: I)
    where
        I: IntoIterator<Item = Arc<dyn Adapter>>,
    {
        let mut registered = write(&self.adapters);
        for adapter in adapters {
            if registered.iter().any(|a| Arc::ptr_eq(a, &adapter)) {
                tracing::trace!(adapter = adapter.name(), "Adapter already registered");
                continue;
            }
            tracing::debug!(adapter = adapter.name(), "Registered adapter");
            registered.push(adapter);
        }
    }

    /// Find the adapter for `url` among registered adapters, without
    /// consulting the missing-adapter hook.
    pub fn lookup(&self, url: &Url) -> Option<Arc<dyn Adapter>> {
        let host = hostname(url);

        if let Some(adapter) = read(&self.cache).get(host) {
            tracing::trace!(host, adapter = adapter.name(), "Adapter cache hit");
            return Some(Arc::clone(adapter));
        }

        // Snapshot so `supports` runs without holding the lock.
        let candidates = read(&self.adapters).clone();
        let adapter = candidates.into_iter().find(|a| a.supports(url))?;

        tracing::debug!(host, adapter = adapter.name(), "Resolved adapter");
        write(&self.cache).insert(host.to_string(), Arc::clone(&adapter));
        Some(adapter)
    }

    /// Resolve the adapter responsible for `url`.
    ///
    /// Falls back to the configured `on_missing_adapter` hook. Adapters
    /// supplied by the hook are not cached.
    pub fn resolve(&self, url: &Url) -> Result<Arc<dyn Adapter>> {
        if let Some(adapter) = self.lookup(url) {
            return Ok(adapter);
        }

        let hook = read(&self.config).on_missing_adapter.clone();
        if let Some(adapter) = hook.and_then(|hook| hook(url)) {
            tracing::debug!(url = %url, adapter = adapter.name(), "Using fallback adapter");
            return Ok(adapter);
        }

        Err(YootError::NoAdapterFound {
            url: url.to_string(),
        })
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        read(&self.adapters).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all adapters and clear the hostname cache.
    ///
    /// Intended for debugging and tests; configuration is kept.
    pub fn reset(&self) {
        write(&self.adapters).clear();
        write(&self.cache).clear();
    }

    /// Replace the configuration.
    pub fn define_config(&self, config: Config) {
        *write(&self.config) = config;
    }

    /// Merge `config` into the current configuration.
    pub fn merge_config(&self, config: Config) {
        let mut current = write(&self.config);
        *current = current.merge(&config);
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> Config {
        read(&self.config).clone()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = read(&self.adapters)
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        f.debug_struct("AdapterRegistry")
            .field("adapters", &names)
            .field("cached_hosts", &read(&self.cache).len())
            .finish()
    }
}

/// Register adapters in the process-wide registry.
pub fn register_adapters<I>(adapters: I)
where
    I: IntoIterator<Item = Arc<dyn Adapter>>,
{
    GLOBAL.register(adapters);
}

/// Replace the process-wide configuration.
pub fn define_config(config: Config) {
    GLOBAL.define_config(config);
}

/// Merge into the process-wide configuration.
pub fn merge_config(config: Config) {
    GLOBAL.merge_config(config);
}

fn hostname(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
