//! Yoot CLI - Transform image URLs for image CDNs.
//!
//! Yoot takes an image source URL and high-level directives and prints the
//! provider-specific URL, the base URL, or ready-to-use `<img>`/`<source>`
//! attributes. It never fetches the image.
//!
//! # Usage
//!
//! ```bash
//! # Resize a Shopify image
//! yoot url https://cdn.shopify.com/s/files/1/0/files/shirt.jpg -w 400 --ar 1.5
//!
//! # Strip transformations from a URL
//! yoot base-url "https://demo.imgix.net/a.jpg?w=300&fm=webp"
//!
//! # Responsive <img> attributes
//! yoot attrs https://demo.imgix.net/a.jpg --widths 320,640,1280 --sizes 100vw
//!
//! # View configuration
//! yoot config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use yoot_core::{Config, ConfigFile};

mod cli;
mod logging;

/// Yoot - Adapter-based image URL transformation.
#[derive(Parser, Debug)]
#[command(name = "yoot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "YOOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the transformed URL
    Url(cli::url::UrlArgs),

    /// Print a URL with all provider transformations removed
    BaseUrl(cli::url::BaseUrlArgs),

    /// Print <img> or <source> attributes as JSON
    Attrs(cli::attrs::AttrsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn load_config_file(path: &std::path::Path) -> ConfigFile {
    let loaded = if path.exists() {
        ConfigFile::load_from(path)
    } else {
        Ok(ConfigFile::default())
    };

    // Logging isn't initialized yet, so warnings go straight to stderr.
    loaded.unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config: {e}\n  \
             Using default configuration. Check your config file with `yoot config path`."
        );
        ConfigFile::default()
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigFile::default_path);
    let file = load_config_file(&config_path);
    logging::init_from_config(&file.logging, cli.verbose, cli.json_logs);

    tracing::debug!("Yoot v{}", yoot_core::VERSION);

    yoot_adapters::register_all();
    yoot_core::define_config(Config::from_file(&file));

    match cli.command {
        Commands::Url(args) => cli::url::execute(args),
        Commands::BaseUrl(args) => cli::url::execute_base(args),
        Commands::Attrs(args) => cli::attrs::execute(args),
        Commands::Config(args) => cli::config::execute(args, &config_path, &file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_url_command() {
        let cli = Cli::try_parse_from([
            "yoot",
            "url",
            "https://demo.imgix.net/a.jpg",
            "-w",
            "300",
            "--ar",
            "1.5",
            "--crop",
            "top",
            "-f",
            "webp",
        ])
        .unwrap();

        let Commands::Url(args) = cli.command else {
            panic!("expected url command");
        };
        assert_eq!(args.transform.src, "https://demo.imgix.net/a.jpg");
        assert_eq!(args.transform.width, Some(300.0));
        assert_eq!(args.transform.aspect_ratio, Some(1.5));
        assert_eq!(args.transform.crop, Some(yoot_core::Crop::Top));
        assert_eq!(args.transform.format, Some(yoot_core::Format::Webp));
        assert!(!args.json);
    }

    #[test]
    fn test_parse_rejects_unknown_crop() {
        let result = Cli::try_parse_from([
            "yoot",
            "url",
            "https://demo.imgix.net/a.jpg",
            "--crop",
            "middle",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_attrs_command() {
        let cli = Cli::try_parse_from([
            "yoot",
            "attrs",
            "https://demo.imgix.net/a.jpg",
            "--element",
            "source",
            "--widths",
            "320,640",
            "--type",
            "image/webp",
            "--attr",
            "media=(min-width: 800px)",
            "--html",
        ])
        .unwrap();

        let Commands::Attrs(args) = cli.command else {
            panic!("expected attrs command");
        };
        assert!(matches!(args.element, cli::attrs::Element::Source));
        assert_eq!(args.widths, vec![320.0, 640.0]);
        assert_eq!(args.mime_type.as_deref(), Some("image/webp"));
        assert_eq!(
            args.attrs,
            vec![("media".to_string(), "(min-width: 800px)".to_string())]
        );
        assert!(args.html);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yoot",
            "config",
            "path",
            "--verbose",
            "--config",
            "/tmp/y.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/y.toml")));
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_load_config_file_falls_back_on_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(load_config_file(&path), ConfigFile::default());

        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
        assert_eq!(load_config_file(&path), ConfigFile::default());

        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(load_config_file(&path).logging.level, "warn");
    }
}
