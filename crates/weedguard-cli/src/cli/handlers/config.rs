//! Configuration command handlers

use std::path::Path;

use crate::cli::commands::ConfigAction;
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{compress_path, print_success};
use color_eyre::eyre::eyre;

/// Handle config subcommands
pub fn handle_config(action: ConfigAction, config: &CliConfig, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", compress_path(path));
            let rendered = toml::to_string_pretty(config).map_err(|e| eyre!(e))?;
            print!("{rendered}");
            Ok(())
        }
        ConfigAction::SetUrl { url } => {
            let mut updated = config.clone();
            updated.api.base_url = url;
            updated.save(path)?;
            print_success(&format!(
                "API base URL set to {}",
                updated.api.base_url
            ));
            Ok(())
        }
    }
}
