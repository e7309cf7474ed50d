//! Terminal output formatting.

use chirp_core::ClientConfig;
use colored::Colorize;

use crate::client::Outcome;

/// Print the result of a submission.
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Sent(status) => {
            println!("{} {}", "✓".green().bold(), status);
        }
        Outcome::Rejected { message, errors } => {
            println!("{} {}", "✗".red().bold(), message);
            for (field, messages) in errors {
                for msg in messages {
                    println!("  {} {}", format!("{}:", field).yellow(), msg);
                }
            }
        }
        Outcome::Failed { status, message } => {
            println!(
                "{} {} {}",
                "✗".red().bold(),
                format!("[{}]", status).dimmed(),
                message
            );
        }
    }
}

/// Print a client configuration.
pub fn print_client_config(config: &ClientConfig) {
    println!("{}", "Client Configuration".bold());
    println!();
    println!("  {:<20} {}", "Broadcaster".cyan(), config.broadcaster);
    println!(
        "  {:<20} {}",
        "Key".cyan(),
        if config.key.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            config.key.clone()
        }
    );
    println!("  {:<20} {}", "WebSocket".cyan(), config.websocket_url());
    println!("  {:<20} {}", "TLS".cyan(), config.force_tls);
    println!("  {:<20} {}", "Transports".cyan(), config.enabled_transports.join(", "));
    println!("  {:<20} {}", "Channel".cyan(), config.channel);
    println!("  {:<20} {}", "Events".cyan(), config.events.join(", "));
}
