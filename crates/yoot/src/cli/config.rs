//! The `yoot config` command for configuration management.

use clap::{Args, Subcommand};
use std::path::Path;
use yoot_core::ConfigFile;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command against the config file at `path`.
pub fn execute(args: ConfigArgs, path: &Path, current: &ConfigFile) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", current.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            init(path, force)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, ConfigFile::default().to_toml()?)?;
    tracing::info!("Config file created at: {}", path.display());
    Ok(())
}
