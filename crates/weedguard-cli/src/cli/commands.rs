use clap::Subcommand;
use std::path::PathBuf;

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Register {
        /// Full name of the account holder (prompted when omitted)
        #[arg(long)]
        fullname: Option<String>,

        /// Email address to register (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Log in and store the session tokens
    Login {
        /// Email address to log in with (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Discard the stored session tokens
    Logout,

    /// Upload a crop image for weed prediction
    Predict {
        /// Path to the image file
        image: PathBuf,

        /// Name of the site the image was taken at
        #[arg(long)]
        site_name: String,

        /// Location string or "lat,lon" coordinates
        #[arg(long)]
        location: String,

        /// Identifier of the farmer the upload belongs to
        #[arg(long)]
        farmer_id: String,
    },

    /// List stored predictions
    Predictions,

    /// Show a single prediction
    Show {
        /// Prediction id
        id: String,
    },

    /// Show the analytics summary
    Analytics,

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Set the API base URL
    SetUrl {
        /// New base URL, e.g. http://localhost:8000/api/
        url: String,
    },
}
