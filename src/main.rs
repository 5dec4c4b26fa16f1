mod cli;
mod commands;
mod serve;

use clap::Parser;
use tracing::info;

use artemis::api::http::HttpTravelApi;

use crate::cli::{Args, Command, ProfileAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artemis=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.api_config()?;
    info!(
        "Assistant service at {}, travel service at {}",
        config.assistant_url, config.travel_url
    );

    let user_id = config.user_id.clone();
    let api = HttpTravelApi::new(config)?;

    match args.command {
        Command::Chat => commands::chat(&api).await?,
        Command::Explore { term } => commands::explore(term),
        Command::City { name } => commands::city(&api, &name).await,
        Command::Safety { lat, lng, alert } => commands::safety(&api, lat, lng, alert).await,
        Command::Profile { action } => {
            commands::profile(&api, &user_id, action.unwrap_or(ProfileAction::Show)).await;
        }
        Command::Serve { dist, port } => serve::serve(dist, port).await?,
    }

    Ok(())
}
