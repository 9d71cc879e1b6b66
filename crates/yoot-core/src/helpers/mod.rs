//! Presentation helpers: `srcset` construction and attribute derivation for
//! `<img>` and `<source>` elements.
//!
//! [`jsx`] produces typed, camelCase-serializable attribute structs;
//! [`html`] produces flat kebab-case attribute maps.

pub mod html;
pub mod jsx;

use crate::error::Result;
use crate::types::Format;
use crate::validate::{is_number, parse_url};
use crate::yoot::Yoot;
use std::sync::Arc;

/// Target widths or pixel densities for a `srcset`.
///
/// `widths` take precedence when both are given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SrcSetOptions {
    /// Image widths for `w` descriptors
    pub widths: Vec<f64>,
    /// Pixel density multipliers for `x` descriptors
    pub densities: Vec<f64>,
}

impl SrcSetOptions {
    pub fn widths(widths: impl IntoIterator<Item = f64>) -> Self {
        Self {
            widths: widths.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn densities(densities: impl IntoIterator<Item = f64>) -> Self {
        Self {
            densities: densities.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Produces a `srcset` string for a transformation.
pub type SrcSetBuilder = Arc<dyn Fn(&Yoot) -> Result<String> + Send + Sync>;

/// Build a `srcset` string from a transformation.
///
/// Each width (or density) produces one candidate by overriding the
/// `width` (or `dpr`) directive. Values below 1 are skipped.
pub fn build_srcset(options: &SrcSetOptions, yoot: &Yoot) -> Result<String> {
    let usable = |v: &&f64| is_number(**v) && **v >= 1.0;
    let mut parts = Vec::new();

    if !options.widths.is_empty() {
        for width in options.widths.iter().filter(usable) {
            parts.push(format!("{} {width}w", yoot.width(*width)?.url()?));
        }
    } else {
        for density in options.densities.iter().filter(usable) {
            parts.push(format!("{} {density}x", yoot.dpr(*density)?.url()?));
        }
    }

    Ok(parts.join(", "))
}

/// Capture `options` in a reusable [`SrcSetBuilder`].
pub fn define_srcset_builder(options: SrcSetOptions) -> SrcSetBuilder {
    Arc::new(move |yoot| build_srcset(&options, yoot))
}

/// Attributes shared by `<img>` and `<source>` derivation.
#[derive(Debug, Clone, PartialEq)]
struct DerivedAttrs {
    src: String,
    alt: Option<String>,
    intrinsic_width: Option<f64>,
    intrinsic_height: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

/// Resolve the URL and pick display dimensions.
///
/// Transform dimensions win over intrinsic ones; if either transform
/// dimension is present, the intrinsic pair is not used at all.
fn derive_attrs(yoot: &Yoot) -> Result<DerivedAttrs> {
    let src = yoot.url()?;
    let state = yoot.to_json();
    let directives = state.directives;
    let has_transformed_dims = directives.width.is_some() || directives.height.is_some();

    let (width, height) = if has_transformed_dims {
        (directives.width, directives.height)
    } else {
        (state.width, state.height)
    };

    Ok(DerivedAttrs {
        src,
        alt: state.alt,
        intrinsic_width: state.width,
        intrinsic_height: state.height,
        width,
        height,
    })
}

fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "jpeg" | "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Infer a MIME type from the format directive, then the URL extension.
fn infer_mime_type(yoot: &Yoot, src: &str) -> Option<&'static str> {
    if let Some(mime) = yoot.to_json().directives.format.and_then(Format::mime_type) {
        return Some(mime);
    }
    let url = parse_url(src)?;
    let extension = url.path().rsplit('.').next()?.to_ascii_lowercase();
    mime_for_extension(&extension)
}

/// Optional CSS properties for `fit: contain` images.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImgStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
}

impl ImgStyle {
    pub fn is_empty(&self) -> bool {
        self.max_width.is_none() && self.max_height.is_none()
    }

    /// CSS inline-style string, e.g. `max-width:300px;max-height:200px;`.
    pub fn to_inline(&self) -> String {
        let mut style = String::new();
        for (prop, value) in [("max-width", &self.max_width), ("max-height", &self.max_height)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                style.push_str(&format!("{prop}:{value};"));
            }
        }
        style
    }
}
