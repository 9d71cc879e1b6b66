//! Attribute helpers for HTML-style consumers: flat maps with kebab-case
//! keys and inline `style` strings.

use super::jsx::{self, ImgAttrs, ImgAttrsOptions, SourceAttrs, SourceAttrsOptions};
use crate::error::Result;
use crate::yoot::Yoot;
use std::collections::BTreeMap;

/// Attribute name → value.
pub type HtmlAttrs = BTreeMap<String, String>;

/// Kebab-case an attribute name.
///
/// `aria*` names only have their first capital converted
/// (`ariaAutoComplete` → `aria-autocomplete`).
pub fn to_kebab_case(name: &str) -> String {
    let only_first = name.starts_with("aria");
    let mut converted = false;
    let mut out = String::with_capacity(name.len() + 4);

    for c in name.chars() {
        if c.is_ascii_uppercase() && !(only_first && converted) {
            out.push('-');
            converted = true;
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

fn insert(map: &mut HtmlAttrs, name: &str, value: Option<String>) {
    if let Some(value) = value {
        map.insert(to_kebab_case(name), value);
    }
}

fn passthrough(attrs: BTreeMap<String, String>) -> HtmlAttrs {
    attrs
        .into_iter()
        .map(|(name, value)| (to_kebab_case(&name), value))
        .collect()
}

fn img_to_html(attrs: ImgAttrs) -> HtmlAttrs {
    let mut map = passthrough(attrs.attrs);
    map.insert("src".into(), attrs.src);
    insert(&mut map, "alt", attrs.alt);
    insert(&mut map, "srcset", attrs.srcset);
    insert(&mut map, "sizes", attrs.sizes);
    insert(&mut map, "width", attrs.width.map(|w| w.to_string()));
    insert(&mut map, "height", attrs.height.map(|h| h.to_string()));
    if let Some(style) = attrs.style.filter(|s| !s.is_empty()) {
        map.insert("style".into(), style.to_inline());
    }
    map
}

fn source_to_html(attrs: SourceAttrs) -> HtmlAttrs {
    let mut map = passthrough(attrs.attrs);
    insert(&mut map, "type", attrs.mime_type);
    insert(&mut map, "src", attrs.src);
    insert(&mut map, "srcset", attrs.srcset);
    insert(&mut map, "width", attrs.width.map(|w| w.to_string()));
    insert(&mut map, "height", attrs.height.map(|h| h.to_string()));
    map
}

/// `<img>` attributes; see [`jsx::img_attrs`].
pub fn img_attrs(yoot: &Yoot, options: &ImgAttrsOptions) -> Result<HtmlAttrs> {
    jsx::img_attrs(yoot, options).map(img_to_html)
}

/// `<source>` attributes; see [`jsx::source_attrs`].
pub fn source_attrs(yoot: &Yoot, options: &SourceAttrsOptions) -> Result<HtmlAttrs> {
    jsx::source_attrs(yoot, options).map(source_to_html)
}

pub fn with_img_attrs(
    options: ImgAttrsOptions,
) -> impl Fn(&Yoot, Option<&ImgAttrsOptions>) -> Result<HtmlAttrs> {
    let preset = jsx::with_img_attrs(options);
    move |yoot, overrides| preset(yoot, overrides).map(img_to_html)
}

pub fn with_source_attrs(
    options: SourceAttrsOptions,
) -> impl Fn(&Yoot, Option<&SourceAttrsOptions>) -> Result<HtmlAttrs> {
    let preset = jsx::with_source_attrs(options);
    move |yoot, overrides| preset(yoot, overrides).map(source_to_html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::query_registry;
    use crate::types::{Fit, YootState};
    use crate::yoot::yoot;

    const SRC: &str = "https://cdn.example.com/image.jpg";

    fn attrs(pairs: &[(&str, &str)]) -> HtmlAttrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("srcset"), "srcset");
        assert_eq!(to_kebab_case("fetchPriority"), "fetch-priority");
        assert_eq!(to_kebab_case("crossOrigin"), "cross-origin");
        assert_eq!(to_kebab_case("ariaLabel"), "aria-label");
        assert_eq!(to_kebab_case("ariaAutoComplete"), "aria-autocomplete");
        assert_eq!(to_kebab_case("data-img"), "data-img");
    }

    #[test]
    fn test_img_attrs() {
        let image = yoot(YootState {
            src: Some(SRC.into()),
            alt: Some("Thumbnail".into()),
            ..Default::default()
        })
        .with_registry(query_registry())
        .width(96.0)
        .unwrap();
        let options = ImgAttrsOptions::new()
            .attr("fetchPriority", "high")
            .attr("ariaDescribedBy", "caption");
        let html = img_attrs(&image, &options).unwrap();
        let src = format!("{SRC}?width=96");
        assert_eq!(
            html,
            attrs(&[
                ("src", src.as_str()),
                ("alt", "Thumbnail"),
                ("width", "96"),
                ("fetch-priority", "high"),
                ("aria-describedby", "caption"),
            ])
        );
    }

    #[test]
    fn test_img_attrs_inline_style() {
        let image = yoot(SRC)
            .with_registry(query_registry())
            .width(300.0)
            .and_then(|y| y.height(200.0))
            .and_then(|y| y.fit(Fit::Contain))
            .unwrap();
        let html = img_attrs(&image, &ImgAttrsOptions::new()).unwrap();
        assert_eq!(
            html.get("style").map(String::as_str),
            Some("max-width:300px;max-height:200px;")
        );
        assert!(!html.contains_key("width"));
    }

    #[test]
    fn test_img_attrs_drops_empty_style() {
        let image = yoot(SRC)
            .with_registry(query_registry())
            .fit(Fit::Contain)
            .unwrap();
        let html = img_attrs(&image, &ImgAttrsOptions::new()).unwrap();
        let src = format!("{SRC}?fit=contain");
        assert_eq!(html, attrs(&[("src", src.as_str())]));
    }

    #[test]
    fn test_source_attrs() {
        let image = yoot(YootState {
            src: Some(SRC.into()),
            width: Some(800.0),
            height: Some(600.0),
            ..Default::default()
        })
        .with_registry(query_registry());
        let options = SourceAttrsOptions::new().attr("media", "(min-width: 1024px)");
        let html = source_attrs(&image, &options).unwrap();
        assert_eq!(
            html,
            attrs(&[
                ("type", "image/jpeg"),
                ("srcset", SRC),
                ("width", "800"),
                ("height", "600"),
                ("media", "(min-width: 1024px)"),
            ])
        );
    }

    #[test]
    fn test_with_img_attrs_preset() {
        let preset = with_img_attrs(ImgAttrsOptions::new().attr("loading", "lazy"));
        let image = yoot(SRC).with_registry(query_registry());
        let html = preset(&image, None).unwrap();
        assert_eq!(html.get("loading").map(String::as_str), Some("lazy"));
    }

    #[test]
    fn test_with_source_attrs_preset() {
        let preset = with_source_attrs(SourceAttrsOptions::new().mime_type("image/png"));
        let image = yoot(SRC).with_registry(query_registry());
        let html = preset(&image, None).unwrap();
        assert_eq!(html.get("type").map(String::as_str), Some("image/png"));
        assert_eq!(
            html.get("srcset").map(String::as_str),
            Some(format!("{SRC}?format=png").as_str())
        );
    }
}
