//! The `yoot url` and `yoot base-url` commands.

use super::transform::TransformArgs;
use clap::Args;

/// Arguments for the `url` command.
#[derive(Args, Debug)]
pub struct UrlArgs {
    #[command(flatten)]
    pub transform: TransformArgs,

    /// Print the resolved state as JSON instead of the URL
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `base-url` command.
#[derive(Args, Debug)]
pub struct BaseUrlArgs {
    /// Transformed image URL
    pub src: String,
}

/// Execute the url command.
pub fn execute(args: UrlArgs) -> anyhow::Result<()> {
    let image = args.transform.build()?;
    let url = image.url()?;

    if args.json {
        // `url()` has run, so the snapshot carries normalized directives
        println!("{}", serde_json::to_string_pretty(&image)?);
    } else {
        println!("{url}");
    }
    Ok(())
}

/// Execute the base-url command.
pub fn execute_base(args: BaseUrlArgs) -> anyhow::Result<()> {
    let image = yoot_core::yoot(args.src.as_str());
    match image.base_url() {
        Some(base) => {
            println!("{base}");
            Ok(())
        }
        None => anyhow::bail!("No adapter can normalize: {}", args.src),
    }
}
