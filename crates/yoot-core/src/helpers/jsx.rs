//! Attribute helpers for JSX-style consumers: typed structs that serialize
//! with camelCase keys.

use super::{derive_attrs, infer_mime_type, ImgStyle, SrcSetBuilder};
use crate::error::{Result, ValidationError};
use crate::types::{Fit, Format};
use crate::yoot::Yoot;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Options for [`img_attrs`] and [`with_img_attrs`].
#[derive(Clone, Default)]
pub struct ImgAttrsOptions {
    /// Fallback alt text, used when the transformation has none
    pub alt: Option<String>,
    /// Emitted only when a `srcset` is present
    pub sizes: Option<String>,
    pub srcset: Option<String>,
    /// Overrides `srcset` when set
    pub srcset_builder: Option<SrcSetBuilder>,
    /// Other attributes, passed through unchanged
    pub attrs: BTreeMap<String, String>,
}

impl ImgAttrsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    pub fn srcset(mut self, srcset: impl Into<String>) -> Self {
        self.srcset = Some(srcset.into());
        self
    }

    pub fn srcset_builder(mut self, builder: SrcSetBuilder) -> Self {
        self.srcset_builder = Some(builder);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Options in `overrides` replace these; pass-through attributes merge.
    pub fn merge(&self, overrides: &ImgAttrsOptions) -> ImgAttrsOptions {
        let mut attrs = self.attrs.clone();
        attrs.extend(overrides.attrs.clone());
        ImgAttrsOptions {
            alt: overrides.alt.clone().or_else(|| self.alt.clone()),
            sizes: overrides.sizes.clone().or_else(|| self.sizes.clone()),
            srcset: overrides.srcset.clone().or_else(|| self.srcset.clone()),
            srcset_builder: overrides
                .srcset_builder
                .clone()
                .or_else(|| self.srcset_builder.clone()),
            attrs,
        }
    }
}

impl fmt::Debug for ImgAttrsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgAttrsOptions")
            .field("alt", &self.alt)
            .field("sizes", &self.sizes)
            .field("srcset", &self.srcset)
            .field("srcset_builder", &self.srcset_builder.is_some())
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// Attributes for an `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImgAttrs {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImgStyle>,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, String>,
}

/// Derive `<img>` attributes from a transformation.
///
/// With `fit: contain` the dimensions become `maxWidth`/`maxHeight` style
/// properties instead of `width`/`height` attributes.
pub fn img_attrs(yoot: &Yoot, options: &ImgAttrsOptions) -> Result<ImgAttrs> {
    let derived = derive_attrs(yoot)?;

    let srcset = match &options.srcset_builder {
        Some(builder) => Some(builder(yoot)?),
        None => options.srcset.clone(),
    };
    let sizes = options.sizes.clone().filter(|_| srcset.is_some());

    let mut attrs = ImgAttrs {
        src: derived.src,
        alt: derived.alt.filter(|a| !a.is_empty()).or_else(|| options.alt.clone()),
        srcset,
        sizes,
        attrs: options.attrs.clone(),
        ..Default::default()
    };

    if yoot.to_json().directives.fit == Some(Fit::Contain) {
        attrs.style = Some(ImgStyle {
            max_width: derived.width.map(|w| format!("{w}px")),
            max_height: derived.height.map(|h| format!("{h}px")),
        });
    } else {
        attrs.width = derived.width;
        attrs.height = derived.height;
    }

    Ok(attrs)
}

/// Capture preset options; the returned closure merges per-call overrides.
pub fn with_img_attrs(
    options: ImgAttrsOptions,
) -> impl Fn(&Yoot, Option<&ImgAttrsOptions>) -> Result<ImgAttrs> {
    move |yoot, overrides| match overrides {
        Some(overrides) => img_attrs(yoot, &options.merge(overrides)),
        None => img_attrs(yoot, &options),
    }
}

/// Options for [`source_attrs`] and [`with_source_attrs`].
#[derive(Clone, Default)]
pub struct SourceAttrsOptions {
    /// Explicit MIME type. An `image/*` type also sets the format directive.
    pub mime_type: Option<String>,
    pub srcset: Option<String>,
    /// Overrides `srcset` when set
    pub srcset_builder: Option<SrcSetBuilder>,
    /// Other attributes (`media`, `sizes`, ...), passed through unchanged
    pub attrs: BTreeMap<String, String>,
}

impl SourceAttrsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn srcset(mut self, srcset: impl Into<String>) -> Self {
        self.srcset = Some(srcset.into());
        self
    }

    pub fn srcset_builder(mut self, builder: SrcSetBuilder) -> Self {
        self.srcset_builder = Some(builder);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Options in `overrides` replace these; pass-through attributes merge.
    pub fn merge(&self, overrides: &SourceAttrsOptions) -> SourceAttrsOptions {
        let mut attrs = self.attrs.clone();
        attrs.extend(overrides.attrs.clone());
        SourceAttrsOptions {
            mime_type: overrides.mime_type.clone().or_else(|| self.mime_type.clone()),
            srcset: overrides.srcset.clone().or_else(|| self.srcset.clone()),
            srcset_builder: overrides
                .srcset_builder
                .clone()
                .or_else(|| self.srcset_builder.clone()),
            attrs,
        }
    }
}

impl fmt::Debug for SourceAttrsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceAttrsOptions")
            .field("mime_type", &self.mime_type)
            .field("srcset", &self.srcset)
            .field("srcset_builder", &self.srcset_builder.is_some())
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// Attributes for a `<source>` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAttrs {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, String>,
}

/// Parse the format out of an `image/*` MIME type (`image/jpeg` → `jpg`).
fn format_from_mime(mime_type: &str) -> Option<std::result::Result<Format, ValidationError>> {
    let subtype = mime_type.strip_prefix("image/")?;
    let subtype = if subtype == "jpeg" { "jpg" } else { subtype };
    Some(subtype.parse())
}

/// Derive `<source>` attributes from a transformation.
///
/// Image sources get a `srcset` (from the builder, the explicit option or
/// the URL); other media get `src`. Dimensions are always the intrinsic
/// ones.
pub fn source_attrs(yoot: &Yoot, options: &SourceAttrsOptions) -> Result<SourceAttrs> {
    let formatted;
    let yoot = match options.mime_type.as_deref().and_then(format_from_mime) {
        Some(format) => {
            formatted = yoot.format(format?)?;
            &formatted
        }
        None => yoot,
    };

    let derived = derive_attrs(yoot)?;
    let mime_type = options
        .mime_type
        .clone()
        .filter(|m| !m.is_empty())
        .or_else(|| infer_mime_type(yoot, &derived.src).map(str::to_string));

    let mut attrs = SourceAttrs {
        width: derived.intrinsic_width,
        height: derived.intrinsic_height,
        attrs: options.attrs.clone(),
        ..Default::default()
    };

    if mime_type.as_deref().is_some_and(|m| m.starts_with("image/")) {
        attrs.srcset = Some(match &options.srcset_builder {
            Some(builder) => builder(yoot)?,
            None => options.srcset.clone().unwrap_or(derived.src),
        });
    } else {
        attrs.src = Some(derived.src);
    }
    attrs.mime_type = mime_type;

    Ok(attrs)
}

/// Capture preset options; the returned closure merges per-call overrides.
pub fn with_source_attrs(
    options: SourceAttrsOptions,
) -> impl Fn(&Yoot, Option<&SourceAttrsOptions>) -> Result<SourceAttrs> {
    move |yoot, overrides| match overrides {
        Some(overrides) => source_attrs(yoot, &options.merge(overrides)),
        None => source_attrs(yoot, &options),
    }
}
