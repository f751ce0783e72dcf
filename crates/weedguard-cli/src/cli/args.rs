use crate::cli::{commands::Commands, handlers};
use crate::config::CliConfig;
use crate::error::Result;
use clap::Parser;
use clap_verbosity_flag::{OffLevel, Verbosity};
use std::path::{Path, PathBuf};

/// Weed Guard CLI - crop image predictions from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "weedguard",
    version,
    about = "Weed Guard CLI - upload crop images and browse predictions",
    long_about = "Command-line client for the Weed Guard prediction service.

QUICK START:
  weedguard register                # Create an account
  weedguard login                   # Authenticate and store tokens
  weedguard predict field.jpg --site-name north-field \\
      --location \"-1.29,36.82\" --farmer-id f42
  weedguard predictions             # Browse prediction history
  weedguard analytics               # Aggregated dashboard numbers

CONFIGURATION:
  weedguard config show             # Show configuration
  weedguard config set-url <url>    # Point at another backend"
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<OffLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let config_path = match &self.config {
            Some(path) => expand_tilde(path),
            None => CliConfig::default_path()?,
        };
        let config = CliConfig::load(&config_path)?;

        match self.command {
            // Accounts
            Commands::Register { fullname, email } => {
                handlers::auth::handle_register(fullname, email, &config).await
            }
            Commands::Login { email } => handlers::auth::handle_login(email, &config).await,
            Commands::Logout => handlers::auth::handle_logout(&config).await,

            // Predictions
            Commands::Predict {
                image,
                site_name,
                location,
                farmer_id,
            } => {
                handlers::predictions::handle_predict(image, site_name, location, farmer_id, &config)
                    .await
            }
            Commands::Predictions => handlers::predictions::handle_list(&config, self.json).await,
            Commands::Show { id } => handlers::predictions::handle_show(&id, &config, self.json).await,

            // Analytics
            Commands::Analytics => handlers::analytics::handle_analytics(&config, self.json).await,

            // Configuration
            Commands::Config { action } => {
                handlers::config::handle_config(action, &config, &config_path)
            }
        }
    }
}

/// Expand tilde (~) in file paths to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home_dir) = dirs::home_dir() {
                return home_dir.join(rest);
            }
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn tilde_paths_expand_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_tilde(Path::new("~/x/config.toml")),
                home.join("x/config.toml")
            );
        }
        assert_eq!(
            expand_tilde(Path::new("/abs/config.toml")),
            PathBuf::from("/abs/config.toml")
        );
    }
}
