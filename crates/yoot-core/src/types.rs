//! Directive and state types.
//!
//! [`YootState`] is the serializable shape of a transformation: the source
//! URL, alt text, intrinsic dimensions and the [`Directives`] map. The same
//! shape is used for snapshots (`to_json`), patches (`with_patch`) and the
//! `map` callback.

use crate::error::ValidationError;
use crate::validate::{must_be_in_range, must_be_one_of, must_be_positive};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crop anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl Crop {
    pub const ALLOWED: &'static [&'static str] = &["center", "top", "bottom", "left", "right"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for Crop {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        must_be_one_of("crop", s, Self::ALLOWED)?;
        Ok(match s {
            "center" => Self::Center,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            _ => Self::Right,
        })
    }
}

/// How the image fits the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Contain,
    Cover,
}

impl Fit {
    pub const ALLOWED: &'static [&'static str] = &["contain", "cover"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Cover => "cover",
        }
    }
}

impl FromStr for Fit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        must_be_one_of("fit", s, Self::ALLOWED)?;
        Ok(if s == "contain" {
            Self::Contain
        } else {
            Self::Cover
        })
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Auto,
    Jpg,
    Png,
    Webp,
}

impl Format {
    pub const ALLOWED: &'static [&'static str] = &["auto", "jpg", "png", "webp"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// MIME type for concrete formats; `auto` has none.
    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            Self::Jpg => Some("image/jpeg"),
            Self::Png => Some("image/png"),
            Self::Webp => Some("image/webp"),
        }
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        must_be_one_of("format", s, Self::ALLOWED)?;
        Ok(match s {
            "auto" => Self::Auto,
            "jpg" => Self::Jpg,
            "png" => Self::Png,
            _ => Self::Webp,
        })
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Crop, Fit, Format);

/// A single directive with its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    Width(f64),
    Height(f64),
    AspectRatio(f64),
    Crop(Crop),
    Fit(Fit),
    Format(Format),
    Quality(f64),
    Dpr(f64),
}

impl Directive {
    /// Directive name as used in serialized state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Width(_) => "width",
            Self::Height(_) => "height",
            Self::AspectRatio(_) => "aspectRatio",
            Self::Crop(_) => "crop",
            Self::Fit(_) => "fit",
            Self::Format(_) => "format",
            Self::Quality(_) => "quality",
            Self::Dpr(_) => "dpr",
        }
    }

    /// Validate the value against the directive's domain.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Width(v) => must_be_in_range("width", v, 1.0, f64::INFINITY),
            Self::Height(v) => must_be_in_range("height", v, 1.0, f64::INFINITY),
            Self::AspectRatio(v) => must_be_positive("aspectRatio", v),
            Self::Quality(v) => must_be_in_range("quality", v, 0.0, 100.0),
            Self::Dpr(v) => must_be_in_range("dpr", v, 1.0, f64::INFINITY),
            Self::Crop(_) | Self::Fit(_) | Self::Format(_) => Ok(()),
        }
    }
}

impl fmt::Display for Directive {
    /// Formats the value only, the way it appears in a query string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width(v)
            | Self::Height(v)
            | Self::AspectRatio(v)
            | Self::Quality(v)
            | Self::Dpr(v) => write!(f, "{v}"),
            Self::Crop(c) => write!(f, "{c}"),
            Self::Fit(c) => write!(f, "{c}"),
            Self::Format(c) => write!(f, "{c}"),
        }
    }
}

/// Transformation directives. `None` means the directive is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Directives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<Fit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Directives {
    /// Iterate present directives in emission order:
    /// width, height, aspectRatio, crop, fit, format, quality, dpr.
    pub fn iter(&self) -> impl Iterator<Item = Directive> {
        [
            self.width.map(Directive::Width),
            self.height.map(Directive::Height),
            self.aspect_ratio.map(Directive::AspectRatio),
            self.crop.map(Directive::Crop),
            self.fit.map(Directive::Fit),
            self.format.map(Directive::Format),
            self.quality.map(Directive::Quality),
            self.dpr.map(Directive::Dpr),
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Store a single directive, replacing any previous value.
    pub fn set(&mut self, directive: Directive) {
        match directive {
            Directive::Width(v) => self.width = Some(v),
            Directive::Height(v) => self.height = Some(v),
            Directive::AspectRatio(v) => self.aspect_ratio = Some(v),
            Directive::Crop(v) => self.crop = Some(v),
            Directive::Fit(v) => self.fit = Some(v),
            Directive::Format(v) => self.format = Some(v),
            Directive::Quality(v) => self.quality = Some(v),
            Directive::Dpr(v) => self.dpr = Some(v),
        }
    }

    /// Overlay `patch` onto `self`; keys present in the patch win.
    pub fn merge(&self, patch: &Directives) -> Directives {
        Directives {
            aspect_ratio: patch.aspect_ratio.or(self.aspect_ratio),
            crop: patch.crop.or(self.crop),
            dpr: patch.dpr.or(self.dpr),
            fit: patch.fit.or(self.fit),
            format: patch.format.or(self.format),
            height: patch.height.or(self.height),
            quality: patch.quality.or(self.quality),
            width: patch.width.or(self.width),
        }
    }

    /// Validate every present directive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(|d| d.validate())
    }

    /// Copy keeping only the directives that pass validation.
    pub fn valid_only(&self) -> Directives {
        let mut valid = Directives::default();
        for directive in self.iter() {
            match directive.validate() {
                Ok(()) => valid.set(directive),
                Err(e) => tracing::trace!(error = %e, "Dropping invalid directive"),
            }
        }
        valid
    }
}

/// The state of a transformation, suitable for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YootState {
    /// Image source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Image alt text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Intrinsic width of the source image, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Intrinsic height of the source image, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Transformation directives
    #[serde(deserialize_with = "null_as_default")]
    pub directives: Directives,
}

impl YootState {
    /// State with only a source URL.
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }
}

/// `"directives": null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
