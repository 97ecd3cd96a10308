use std::path::Path;

use clap::Subcommand;

use crate::common::{self, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the parsed configuration
    Show,
    /// Validate the configuration file
    Validate,
    /// Print the resolved configuration path
    Path,
}

pub fn run(config: Option<&Path>, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Show => {
            let parsed = common::load_config(config)?;
            println!("{}", toml::to_string_pretty(&parsed)?);
        }
        ConfigAction::Validate => {
            let parsed = common::load_config(config)?;
            println!(
                "configuration OK: {} activities, {} commitments",
                parsed.activities.len(),
                parsed.commitments.len()
            );
        }
        ConfigAction::Path => {
            println!("{}", common::config_path(config)?.display());
        }
    }
    Ok(())
}
