//! Arguments shared by every command that builds a transformation.

use clap::Args;
use yoot_core::{yoot, Crop, Directives, Fit, Format, Yoot, YootState};

/// Source image and directives.
#[derive(Args, Debug, Clone, Default)]
pub struct TransformArgs {
    /// Image source URL
    pub src: String,

    /// Target width in pixels
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Target height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<f64>,

    /// Width-to-height ratio, e.g. 1.5
    #[arg(long, visible_alias = "ar")]
    pub aspect_ratio: Option<f64>,

    /// Crop anchor: center, top, bottom, left, right
    #[arg(long)]
    pub crop: Option<Crop>,

    /// Fit mode: contain, cover
    #[arg(long)]
    pub fit: Option<Fit>,

    /// Output format: auto, jpg, png, webp
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Quality, 0-100
    #[arg(short, long)]
    pub quality: Option<f64>,

    /// Device pixel ratio, at least 1
    #[arg(long)]
    pub dpr: Option<f64>,

    /// Alt text
    #[arg(long)]
    pub alt: Option<String>,

    /// Known width of the source image
    #[arg(long)]
    pub intrinsic_width: Option<f64>,

    /// Known height of the source image
    #[arg(long)]
    pub intrinsic_height: Option<f64>,
}

impl TransformArgs {
    /// Build and validate the transformation.
    pub fn build(&self) -> anyhow::Result<Yoot> {
        let image = yoot(()).src(&self.src)?.with_patch(YootState {
            alt: self.alt.clone(),
            width: self.intrinsic_width,
            height: self.intrinsic_height,
            directives: Directives {
                width: self.width,
                height: self.height,
                aspect_ratio: self.aspect_ratio,
                crop: self.crop,
                fit: self.fit,
                format: self.format,
                quality: self.quality,
                dpr: self.dpr,
            },
            ..Default::default()
        })?;
        tracing::debug!(state = ?image.to_json(), "Built transformation");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(src: &str) -> TransformArgs {
        TransformArgs {
            src: src.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_sets_directives() {
        let image = TransformArgs {
            width: Some(300.0),
            format: Some(Format::Webp),
            intrinsic_width: Some(1200.0),
            ..args("https://demo.imgix.net/a.jpg")
        }
        .build()
        .unwrap();
        let state = image.to_json();
        assert_eq!(state.directives.width, Some(300.0));
        assert_eq!(state.directives.format, Some(Format::Webp));
        assert_eq!(state.width, Some(1200.0));
    }

    #[test]
    fn test_build_rejects_invalid_src() {
        let err = args("not a url").build().unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_build_rejects_out_of_range_quality() {
        let err = TransformArgs {
            quality: Some(150.0),
            ..args("https://demo.imgix.net/a.jpg")
        }
        .build()
        .unwrap_err();
        assert!(err.to_string().contains("quality"));
    }
}
