//! Imgix adapter.
//!
//! Directives are encoded as query parameters on any `*.imgix.net` source.

use crate::params::{strip_query_and_hash, with_query};
use once_cell::sync::Lazy;
use std::sync::Arc;
use url::Url;
use yoot_core::{Adapter, Crop, Directive, Fit, Format, GenerateUrlInput};

/// Imgix rendering API adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImgixAdapter;

static ADAPTER: Lazy<Arc<dyn Adapter>> = Lazy::new(|| Arc::new(ImgixAdapter));

/// The shared Imgix adapter instance.
pub fn adapter() -> Arc<dyn Adapter> {
    Arc::clone(&ADAPTER)
}

fn param(directive: Directive) -> Option<(&'static str, String)> {
    Some(match directive {
        Directive::Width(v) => ("w", v.to_string()),
        Directive::Height(v) => ("h", v.to_string()),
        Directive::AspectRatio(v) => ("ar", v.to_string()),
        // Imgix crops from the center by default
        Directive::Crop(Crop::Center) => return None,
        Directive::Crop(crop) => ("crop", crop.to_string()),
        Directive::Fit(Fit::Cover) => ("fit", "crop".into()),
        Directive::Fit(Fit::Contain) => ("fit", "clip".into()),
        Directive::Format(Format::Auto) => ("auto", "format".into()),
        Directive::Format(format) => ("fm", format.to_string()),
        Directive::Quality(v) => ("q", v.to_string()),
        Directive::Dpr(v) => ("dpr", v.to_string()),
    })
}

impl Adapter for ImgixAdapter {
    fn name(&self) -> &str {
        "imgix"
    }

    fn supports(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| host.ends_with(".imgix.net"))
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        let params = input.directives.iter().filter_map(param).collect();
        with_query(&input.src, params)
    }

    fn normalize_url(&self, url: &Url) -> String {
        strip_query_and_hash(url).into()
    }
}
