//! Config commands

use crate::config::{Config, Location};
use crate::ConfigCommands;
use anyhow::Result;

pub fn handle(action: ConfigCommands, location: &Location, config: &Config) -> Result<()> {
    match action {
        ConfigCommands::Init { force } => {
            let path = location.path()?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let path = Config::template().save(location)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommands::Show => {
            println!("# {}", location.path()?.display());
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}
