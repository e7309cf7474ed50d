//! Message and typing commands.

use anyhow::{bail, Result};
use clap::Args;

use crate::client::{Outcome, RelayClient, DEFAULT_RELAY_URL};
use crate::output;

#[derive(Args)]
pub struct SendArgs {
    /// Message text
    pub message: String,

    /// Name shown to other users
    #[arg(short, long, env = "CHIRP_USERNAME")]
    pub username: String,

    /// Relay base URL
    #[arg(long, env = "CHIRP_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,
}

#[derive(Args)]
pub struct TypingArgs {
    /// Name shown to other users
    #[arg(short, long, env = "CHIRP_USERNAME")]
    pub username: String,

    /// Relay base URL
    #[arg(long, env = "CHIRP_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,
}

pub async fn execute_message(args: SendArgs) -> Result<()> {
    let client = RelayClient::new(&args.url);
    let outcome = client.send_message(&args.message, &args.username).await?;
    report(outcome)
}

pub async fn execute_typing(args: TypingArgs) -> Result<()> {
    let client = RelayClient::new(&args.url);
    let outcome = client.send_typing(&args.username).await?;
    report(outcome)
}

fn report(outcome: Outcome) -> Result<()> {
    output::print_outcome(&outcome);
    match outcome {
        Outcome::Sent(_) => Ok(()),
        Outcome::Rejected { .. } => bail!("Relay rejected the request"),
        Outcome::Failed { status, .. } => bail!("Relay failed with status {}", status),
    }
}
