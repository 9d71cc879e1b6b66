//! Cloudinary adapter.
//!
//! Directives become a comma-separated transformation segment placed right
//! after the delivery type:
//!
//! ```text
//! /demo/image/upload/sample.jpg → /demo/image/upload/w_300,h_200,c_fill/sample.jpg
//! ```

use crate::params::strip_query_and_hash;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use url::Url;
use yoot_core::{Adapter, Crop, Directive, Directives, Fit, GenerateUrlInput};

/// Cloudinary delivery URL adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudinaryAdapter;

static ADAPTER: Lazy<Arc<dyn Adapter>> = Lazy::new(|| Arc::new(CloudinaryAdapter));

/// The shared Cloudinary adapter instance.
pub fn adapter() -> Arc<dyn Adapter> {
    Arc::clone(&ADAPTER)
}

/// Splits a delivery URL into the part up to the delivery type, an optional
/// existing transformation segment, and the public ID.
static URL_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(.+(?:upload|fetch|private|authenticated|sprite|facebook|twitter|youtube|vimeo)/)((?:[^_/]+_[^,/]+,?)*/)?(.+)$",
    )
    .expect("valid regex")
});

fn gravity(crop: Crop) -> &'static str {
    match crop {
        Crop::Center => "center",
        Crop::Top => "north",
        Crop::Bottom => "south",
        Crop::Left => "west",
        Crop::Right => "east",
    }
}

fn segment(directive: Directive) -> String {
    match directive {
        Directive::Width(v) => format!("w_{v}"),
        Directive::Height(v) => format!("h_{v}"),
        Directive::AspectRatio(v) => format!("ar_{v}"),
        Directive::Crop(crop) => format!("g_{}", gravity(crop)),
        Directive::Fit(Fit::Cover) => "c_fill".into(),
        Directive::Fit(Fit::Contain) => "c_fit".into(),
        Directive::Format(format) => format!("f_{format}"),
        Directive::Quality(v) => format!("q_{v}"),
        Directive::Dpr(v) => format!("dpr_{v}"),
    }
}

/// Rebuild `src` with `directives` as its only transformation segment.
/// URLs without a recognizable delivery type are returned unchanged.
fn build_url(src: &str, directives: &Directives) -> String {
    let Some(caps) = URL_SPLIT.captures(src) else {
        tracing::trace!(src, "No Cloudinary delivery type in URL");
        return src.to_string();
    };
    let left = caps.get(1).map_or("", |m| m.as_str());
    let right = caps.get(3).map_or("", |m| m.as_str());

    let transformation = directives.iter().map(segment).collect::<Vec<_>>().join(",");
    if transformation.is_empty() {
        format!("{left}{right}")
    } else {
        format!("{left}{transformation}/{right}")
    }
}

impl Adapter for CloudinaryAdapter {
    fn name(&self) -> &str {
        "cloudinary"
    }

    fn supports(&self, url: &Url) -> bool {
        matches!(
            url.host_str(),
            Some("res.cloudinary.com" | "cloudinary-a.akamaihd.net")
        )
    }

    fn generate_url(&self, input: &GenerateUrlInput) -> String {
        build_url(input.src.as_str(), &input.directives)
    }

    fn normalize_url(&self, url: &Url) -> String {
        build_url(strip_query_and_hash(url).as_str(), &Directives::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::bound;
    use yoot_core::{Format, YootState};

    const IMAGE_URL: &str = "https://res.cloudinary.com/demo/image/upload/v1234/sample.jpg";
    const IMAGE_URL_WITH_DIRECTIVES: &str =
        "https://res.cloudinary.com/demo/image/upload/w_300,h_200,c_fill/v1234/sample.jpg";

    fn image_url(segment: &str) -> String {
        IMAGE_URL.replace("/upload/", &format!("/upload/{segment}/"))
    }

    fn with_directives(directives: Directives) -> String {
        bound(YootState {
            src: Some(IMAGE_URL.into()),
            directives,
            ..Default::default()
        })
        .url()
        .unwrap()
    }

    #[test]
    fn test_supports() {
        let supports = |s: &str| CloudinaryAdapter.supports(&Url::parse(s).unwrap());
        assert!(supports("https://res.cloudinary.com"));
        assert!(supports("https://cloudinary-a.akamaihd.net"));
        assert!(!supports("https://cdn.cloudinary.com"));
        assert!(!supports("https://foo.com"));
    }

    #[test]
    fn test_sizing() {
        let d = |width, height, aspect_ratio| Directives {
            width,
            height,
            aspect_ratio,
            ..Default::default()
        };
        assert_eq!(with_directives(d(Some(100.0), None, None)), image_url("w_100"));
        assert_eq!(
            with_directives(d(Some(100.0), Some(200.0), None)),
            image_url("w_100,h_200")
        );
        assert_eq!(
            with_directives(d(Some(100.0), None, Some(2.0))),
            image_url("w_100,h_50")
        );
        assert_eq!(
            with_directives(d(None, Some(100.0), Some(2.0))),
            image_url("w_200,h_100")
        );
        assert_eq!(with_directives(d(None, None, Some(1.0))), image_url("ar_1"));
    }

    #[test]
    fn test_crop_gravity() {
        for (crop, expected) in [
            (Crop::Center, "g_center"),
            (Crop::Top, "g_north"),
            (Crop::Bottom, "g_south"),
            (Crop::Left, "g_west"),
            (Crop::Right, "g_east"),
        ] {
            let directives = Directives {
                crop: Some(crop),
                ..Default::default()
            };
            assert_eq!(with_directives(directives), image_url(expected));
        }
    }

    #[test]
    fn test_fit_format_quality_dpr() {
        let directives = Directives {
            fit: Some(Fit::Contain),
            format: Some(Format::Auto),
            quality: Some(80.0),
            dpr: Some(1.5),
            ..Default::default()
        };
        assert_eq!(
            with_directives(directives),
            image_url("c_fit,f_auto,q_80,dpr_1.5")
        );
    }

    #[test]
    fn test_no_directives_leaves_url_unchanged() {
        assert_eq!(with_directives(Directives::default()), IMAGE_URL);
    }

    #[test]
    fn test_previously_transformed_url() {
        let image = bound(IMAGE_URL_WITH_DIRECTIVES).width(100.0).unwrap();
        assert_eq!(image.url().unwrap(), image_url("w_100"));
    }

    #[test]
    fn test_unrecognized_path_is_unchanged() {
        let src = "https://res.cloudinary.com/demo/sample.jpg";
        let image = bound(src).width(100.0).unwrap();
        assert_eq!(image.url().unwrap(), src);
    }

    #[test]
    fn test_normalize_url() {
        let url = Url::parse(&format!("{IMAGE_URL_WITH_DIRECTIVES}?foo=bar#baz")).unwrap();
        assert_eq!(CloudinaryAdapter.normalize_url(&url), IMAGE_URL);
    }
}
