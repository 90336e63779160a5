//! BWR CLI - Command line tool for Bulgarian water reservoir data.

use bwr_core::client::ApiClient;
use bwr_core::config::ApiConfig;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bwr-cli",
    version,
    about = "Bulgarian water reservoir data toolkit"
)]
struct Cli {
    /// Data API base URL
    #[arg(long, global = true, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: bwr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = ApiConfig::from_env();
    if let Some(url) = cli.api_base_url.as_deref() {
        config = config.with_api_base_url(url);
    }
    bwr_cmd::run(cli.command, ApiClient::new(config)).await
}
