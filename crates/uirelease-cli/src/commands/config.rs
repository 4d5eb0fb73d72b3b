use crate::GlobalOpts;
use anyhow::{bail, Context};
use clap::Subcommand;
use colored::Colorize;
use uirelease_config::ReleaseConfig;
use uirelease_logger as logger;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the path of the configuration file
    Path,
    /// Write a configuration file with every default spelled out
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> anyhow::Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let path = ReleaseConfig::path();
            let config = ReleaseConfig::load_from_path(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            println!("{}", "Configuration:".bold().green());
            if !path.exists() && opts.verbosity_level() > 0 {
                println!("  {}", "(defaults, no config file)".yellow());
            }
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Path => {
            let path = ReleaseConfig::path();
            println!("{}", path.display());
            if !path.exists() {
                tracing::info!("{} does not exist yet; defaults apply", path.display());
            }
        }
        ConfigAction::Init { force } => {
            let path = ReleaseConfig::path();
            if path.exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                );
            }
            ReleaseConfig::default().save_to_path(&path)?;
            logger::success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
