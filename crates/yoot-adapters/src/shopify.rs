//! Shopify CDN adapter.
//!
//! Shopify encodes transformations in the file name:
//!
//! ```text
//! /files/image.jpg → /files/image_200x100_crop_center@2x.jpg.webp
//! ```
//!
//! Quality and fit have no path encoding and are ignored; `fit: cover` is
//! expressed as a center crop instead.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use url::Url;
use yoot_core::{
    Adapter, Crop, Directives, Fit, Format, GenerateUrlInput, PrimeStateInput, YootState,
};

/// Shopify CDN adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShopifyAdapter;

static ADAPTER: Lazy<Arc<dyn Adapter>> = Lazy::new(|| Arc::new(ShopifyAdapter));

/// The shared Shopify adapter instance.
pub fn adapter() -> Arc<dyn Adapter> {
    Arc::clone(&ADAPTER)
}

/// Splits a path into base, original extension and an optional appended
/// format extension.
static URL_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(\.[^.]+)(\.(?:jpg|png|webp))?$").expect("valid regex"));

/// Transformation segments previously applied to a file name.
static DIRECTIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(_(\d+)?x(\d+)?)?(_crop_[^@]+)?(@\d+x)?$").expect("valid regex")
});

/// `(path without extension, original extension)`.
fn url_parts(path: &str) -> (&str, &str) {
    match URL_PARTS.captures(path) {
        Some(caps) => {
            let base = caps.get(1).map_or("", |m| m.as_str());
            let extension = caps.get(2).map_or("", |m| m.as_str());
            (base, extension)
        }
        None => (path, ""),
    }
}

fn strip_directives(path: &str) -> String {
    DIRECTIVES.replace(path, "").into_owned()
}

fn dimensions_segment(directives: &Directives) -> String {
    if directives.width.is_none() && directives.height.is_none() {
        return String::new();
    }
    let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    format!("_{}x{}", show(directives.width), show(directives.height))
}

fn crop_segment(directives: &Directives) -> String {
    let has_dimension = directives.width.is_some() || directives.height.is_some();
    match directives.crop {
        Some(crop) if has_dimension => format!("_crop_{crop}"),
        _ => String::new(),
    }
}

fn dpr_segment(directives: &Directives) -> String {
    directives.dpr.map(|dpr| format!("@{dpr}x")).unwrap_or_default()
}

fn format_extension(directives: &Directives) -> String {
    match directives.format {
        None | Some(Format::Auto) => String::new(),
        Some(format) => format!(".{format}"),
    }
}

impl Adapter for ShopifyAdapter {
    fn name(&self) -> &str {
        "shopify"
    }

    fn supports(&self, url: &Url) -> bool {
        url.host_str() == Some("cdn.shopify.com")
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        let directives = &input.directives;
        let mut url = input.src.clone();
        let (base, extension) = url_parts(input.src.path());

        let path = format!(
            "{}{}{}{}{}{}",
            strip_directives(base),
            dimensions_segment(directives),
            crop_segment(directives),
            dpr_segment(directives),
            extension,
            format_extension(directives),
        );
        url.set_path(&path);
        url.into()
    }

    /// Strips transformation segments, query and fragment, keeping the `v`
    /// cache-busting parameter.
    fn normalize_url(&self, url: &Url) -> String {
        let version = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|v| !v.is_empty());

        let mut base_url = url.clone();
        let (base, extension) = url_parts(url.path());
        base_url.set_path(&format!("{}{extension}", strip_directives(base)));
        base_url.set_query(None);
        base_url.set_fragment(None);

        if let Some(version) = version {
            base_url.query_pairs_mut().append_pair("v", &version);
        }
        base_url.into()
    }

    /// `fit: cover` with a dimension becomes a center crop unless a crop is
    /// already set.
    fn prime_state(&self, input: PrimeStateInput) -> YootState {
        let mut state: YootState = input.into();
        let directives = &mut state.directives;
        let has_dimension = directives.width.is_some() || directives.height.is_some();

        if directives.fit == Some(Fit::Cover) && directives.crop.is_none() && has_dimension {
            directives.crop = Some(Crop::Center);
        }
        state
    }
}
