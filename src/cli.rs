use std::path::PathBuf;

use clap::{Parser, Subcommand};

use artemis::config::ApiConfig;
use artemis::errors::AppError;
use artemis::safety::DEFAULT_ALERT_MESSAGE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Artemis, your travel buddy", long_about = None)]
pub struct Args {
    /// Assistant service base URL (chat, itinerary). Overrides ARTEMIS_ASSISTANT_URL.
    #[arg(long, global = true)]
    pub assistant_url: Option<String>,

    /// Travel service base URL (city, safety, profile). Overrides ARTEMIS_TRAVEL_URL.
    #[arg(long, global = true)]
    pub travel_url: Option<String>,

    /// Profile to read and edit. Overrides ARTEMIS_USER_ID.
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat with Artemis AI on stdin
    Chat,

    /// List popular destinations, optionally filtered by name
    Explore { term: Option<String> },

    /// Show a city's description and safety information
    City { name: String },

    /// Local emergency numbers; without a position this behaves like denied location access
    Safety {
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Send an emergency alert, with an optional message
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_ALERT_MESSAGE)]
        alert: Option<String>,
    },

    /// Show the profile or change its bucket list
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Serve the built web app (trunk output) with SPA fallback
    Serve {
        #[arg(long, default_value = "frontend/dist")]
        dist: PathBuf,

        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    /// Print the profile and bucket list
    Show,

    /// Pin a location to the bucket list
    Pin {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a bucket-list entry by name
    Unpin { name: String },
}

impl Args {
    /// Environment first, then flags on top.
    pub fn api_config(&self) -> Result<ApiConfig, AppError> {
        let mut config = ApiConfig::from_env()?;
        if let Some(url) = &self.assistant_url {
            config.assistant_url.clone_from(url);
        }
        if let Some(url) = &self.travel_url {
            config.travel_url.clone_from(url);
        }
        if let Some(id) = &self.user_id {
            config.user_id.clone_from(id);
        }
        Ok(config)
    }
}
