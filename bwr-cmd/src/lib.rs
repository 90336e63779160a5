//! Command implementations for BWR CLI.
//!
//! Provides subcommands for browsing reservoirs, filing complaints and
//! inspecting the route and time overlay data the map page draws.

use bwr_core::client::ApiClient;
use clap::Subcommand;

pub mod complain;
pub mod dams;
pub mod trace;

#[derive(Subcommand)]
pub enum Command {
    /// List reservoirs from the data API
    Dams {
        /// Number of reservoirs to skip
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Page size (defaults to the configured page limit)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one reservoir with its latest measurement, trends and dry-up flag
    Dam {
        /// Reservoir id
        id: String,
    },

    /// Show the forecast series of one reservoir
    Forecast {
        /// Reservoir id
        id: String,
    },

    /// File a complaint through the same validation as the web form
    Complain {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        /// Reservoir id the complaint is about
        #[arg(long)]
        dam_id: Option<String>,

        /// One of: water-loss-route, future-bad, water-polution,
        /// illegal-building, illegal-fishing, other
        #[arg(long)]
        category: Option<String>,

        /// Free text, required for the "other" category
        #[arg(long)]
        text: Option<String>,

        /// Validate and print the payload without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Trace the route water takes to a location
    Route {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Start from this reservoir instead of letting the server pick
        #[arg(long)]
        dam_id: Option<String>,
    },

    /// Show the tile template and GeoJSON overlay for one month
    Overlay {
        #[arg(long)]
        year: i32,

        /// 1-based month number
        #[arg(long)]
        month: u32,
    },
}

pub async fn run(command: Command, client: ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Dams { skip, limit } => {
            let limit = limit.unwrap_or(client.config().page_limit);
            dams::run_list(&client, skip, limit).await
        }
        Command::Dam { id } => dams::run_show(&client, &id).await,
        Command::Forecast { id } => dams::run_forecast(&client, &id).await,
        Command::Complain {
            name,
            phone,
            email,
            address,
            dam_id,
            category,
            text,
            dry_run,
        } => {
            let args = complain::ComplaintArgs {
                name,
                phone,
                email,
                address,
                dam_id,
                category,
                text,
            };
            complain::run_complain(&client, args, dry_run).await
        }
        Command::Route { lat, lng, dam_id } => {
            trace::run_route(&client, lat, lng, dam_id.as_deref()).await
        }
        Command::Overlay { year, month } => trace::run_overlay(&client, year, month).await,
    }
}
