//! Client configuration command.

use anyhow::Result;
use clap::Args;

use crate::client::{RelayClient, DEFAULT_RELAY_URL};
use crate::output;

#[derive(Args)]
pub struct ConfigArgs {
    /// Relay base URL
    #[arg(long, env = "CHIRP_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,

    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ConfigArgs) -> Result<()> {
    let config = RelayClient::new(&args.url).client_config().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        output::print_client_config(&config);
    }

    Ok(())
}
