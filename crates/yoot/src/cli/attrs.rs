//! The `yoot attrs` command: print `<img>` or `<source>` attributes as JSON.

use super::transform::TransformArgs;
use clap::{Args, ValueEnum};
use yoot_core::helpers::{html, jsx};
use yoot_core::{define_srcset_builder, SrcSetOptions};

/// Element to derive attributes for.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Element {
    /// `<img>` (default)
    #[default]
    Img,
    /// `<source>` inside `<picture>`
    Source,
}

/// Arguments for the `attrs` command.
#[derive(Args, Debug)]
pub struct AttrsArgs {
    #[command(flatten)]
    pub transform: TransformArgs,

    /// Element to generate attributes for
    #[arg(long, value_enum, default_value_t = Element::Img)]
    pub element: Element,

    /// Comma-separated srcset widths, e.g. 320,640,1280
    #[arg(long, value_delimiter = ',')]
    pub widths: Vec<f64>,

    /// Comma-separated srcset densities, e.g. 1,2,3 (ignored with --widths)
    #[arg(long, value_delimiter = ',')]
    pub densities: Vec<f64>,

    /// `sizes` attribute (img only; emitted only with a srcset)
    #[arg(long)]
    pub sizes: Option<String>,

    /// MIME type (source only); image types also set the format
    #[arg(long = "type")]
    pub mime_type: Option<String>,

    /// Extra attribute as NAME=VALUE (repeatable)
    #[arg(long = "attr", value_parser = parse_key_val)]
    pub attrs: Vec<(String, String)>,

    /// Kebab-case keys and inline style, as for HTML templates
    #[arg(long)]
    pub html: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    if key.is_empty() {
        return Err(format!("attribute name missing in {s:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

impl AttrsArgs {
    fn srcset_options(&self) -> Option<SrcSetOptions> {
        if self.widths.is_empty() && self.densities.is_empty() {
            return None;
        }
        Some(SrcSetOptions {
            widths: self.widths.clone(),
            densities: self.densities.clone(),
        })
    }

    fn img_options(&self) -> jsx::ImgAttrsOptions {
        let mut options = jsx::ImgAttrsOptions::new();
        options.sizes = self.sizes.clone();
        options.srcset_builder = self.srcset_options().map(define_srcset_builder);
        options.attrs.extend(self.attrs.iter().cloned());
        options
    }

    fn source_options(&self) -> jsx::SourceAttrsOptions {
        let mut options = jsx::SourceAttrsOptions::new();
        options.mime_type = self.mime_type.clone();
        options.srcset_builder = self.srcset_options().map(define_srcset_builder);
        options.attrs.extend(self.attrs.iter().cloned());
        if let Some(sizes) = &self.sizes {
            options.attrs.insert("sizes".into(), sizes.clone());
        }
        options
    }
}

/// Execute the attrs command.
pub fn execute(args: AttrsArgs) -> anyhow::Result<()> {
    let image = args.transform.build()?;

    let json = match (args.element, args.html) {
        (Element::Img, false) => {
            serde_json::to_string_pretty(&jsx::img_attrs(&image, &args.img_options())?)?
        }
        (Element::Img, true) => {
            serde_json::to_string_pretty(&html::img_attrs(&image, &args.img_options())?)?
        }
        (Element::Source, false) => {
            serde_json::to_string_pretty(&jsx::source_attrs(&image, &args.source_options())?)?
        }
        (Element::Source, true) => {
            serde_json::to_string_pretty(&html::source_attrs(&image, &args.source_options())?)?
        }
    };

    println!("{json}");
    Ok(())
}
