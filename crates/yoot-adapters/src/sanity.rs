//! Sanity image pipeline adapter.
//!
//! Directives are query parameters. Sanity has no aspect-ratio parameter,
//! so when one is requested the intrinsic size is read from the asset file
//! name (`image-1024x768.jpg`) and the ratio is resolved into dimensions.

use crate::params::{strip_query_and_hash, with_query};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use url::Url;
use yoot_core::validate::{has_intrinsic_dimensions, is_dimension};
use yoot_core::{Adapter, Directive, Fit, Format, GenerateUrlInput, PrimeStateInput, YootState};

/// Sanity CDN adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanityAdapter;

static ADAPTER: Lazy<Arc<dyn Adapter>> = Lazy::new(|| Arc::new(SanityAdapter));

/// The shared Sanity adapter instance.
pub fn adapter() -> Arc<dyn Adapter> {
    Arc::clone(&ADAPTER)
}

static IMAGE_DIMENSIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d+)x(\d+)\.[^.]+$").expect("valid regex"));

/// Intrinsic `(width, height)` encoded in a Sanity asset path. Zero
/// dimensions are treated as unknown.
fn dimensions_from_url(url: &Url) -> Option<(f64, f64)> {
    let caps = IMAGE_DIMENSIONS.captures(url.path())?;
    let width = caps.get(1)?.as_str().parse::<f64>().ok().filter(|w| is_dimension(*w))?;
    let height = caps.get(2)?.as_str().parse::<f64>().ok().filter(|h| is_dimension(*h))?;
    Some((width, height))
}

fn param(directive: Directive) -> Option<(&'static str, String)> {
    Some(match directive {
        Directive::Width(v) => ("w", v.to_string()),
        Directive::Height(v) => ("h", v.to_string()),
        Directive::AspectRatio(_) => return None,
        Directive::Crop(crop) => ("crop", crop.to_string()),
        Directive::Fit(Fit::Cover) => ("fit", "crop".into()),
        Directive::Fit(Fit::Contain) => ("fit", "clip".into()),
        Directive::Format(Format::Auto) => ("auto", "format".into()),
        Directive::Format(format) => ("fm", format.to_string()),
        Directive::Quality(v) => ("q", v.to_string()),
        Directive::Dpr(v) => ("dpr", v.to_string()),
    })
}

impl Adapter for SanityAdapter {
    fn name(&self) -> &str {
        "sanity"
    }

    fn supports(&self, url: &Url) -> bool {
        url.host_str() == Some("cdn.sanity.io")
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        let params = input.directives.iter().filter_map(param).collect();
        with_query(&input.src, params)
    }

    fn normalize_url(&self, url: &Url) -> String {
        strip_query_and_hash(url).into()
    }

    fn prime_state(&self, input: PrimeStateInput) -> YootState {
        let src = input.src.clone();
        let mut state: YootState = input.into();

        if state.directives.aspect_ratio.is_some() && !has_intrinsic_dimensions(&state) {
            if let Some((width, height)) = dimensions_from_url(&src) {
                tracing::trace!(width, height, "Read intrinsic dimensions from Sanity asset name");
                state.width = Some(width);
                state.height = Some(height);
            }
        }
        state
    }
}
