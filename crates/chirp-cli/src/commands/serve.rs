//! Relay server command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chirp_core::event::CHAT_CHANNEL;
use chirp_core::{Broadcaster, ClientConfig, Dispatcher, Hub};
use chirp_redis::{Bridge, RedisBroadcaster};
use chirp_web::AppState;
use clap::{Args, ValueEnum};
use colored::Colorize;

/// How long to wait for the Redis bridge to subscribe before giving up.
const BRIDGE_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Where published events go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Fan out inside this process only
    Local,
    /// Publish through Redis pub/sub and relay back to local subscribers
    Redis,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "CHIRP_PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "CHIRP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Broadcast backend
    #[arg(long, env = "CHIRP_BACKEND", value_enum, default_value_t = Backend::Local)]
    pub backend: Backend,

    /// Redis URL for the redis backend
    #[arg(long, env = "CHIRP_REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Prefix prepended to Redis channel names
    #[arg(long, env = "CHIRP_REDIS_PREFIX", default_value = "")]
    pub redis_prefix: String,

    /// Give up on a publish after this many milliseconds
    #[arg(long, env = "CHIRP_PUBLISH_TIMEOUT_MS", default_value = "3000")]
    pub publish_timeout_ms: u64,

    /// Envelopes a slow subscriber may fall behind before skipping
    #[arg(long, env = "CHIRP_CAPACITY", default_value = "100")]
    pub capacity: usize,

    /// Host browsers use to reach the WebSocket
    #[arg(long, env = "CHIRP_PUBLIC_HOST", default_value = "localhost")]
    pub public_host: String,

    /// Application key handed to browser clients
    #[arg(long, env = "CHIRP_KEY", default_value = "")]
    pub key: String,

    /// Tell browser clients to connect over TLS
    #[arg(long, env = "CHIRP_FORCE_TLS")]
    pub force_tls: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to chirp-serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.then(|| {
            self.log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("chirp-serve.log"))
        })
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.public_host, self.port)
            .with_key(&self.key)
            .with_tls(self.force_tls)
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let hub = Hub::new(args.capacity);

    let mut bridge = None;
    let broadcaster: Arc<dyn Broadcaster> = match args.backend {
        Backend::Local => Arc::new(hub.clone()),
        Backend::Redis => {
            let (client, pool) = chirp_redis::init_pool(&args.redis_url)
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", args.redis_url))?;
            let Bridge { handle, ready } =
                chirp_redis::spawn_bridge(client, &args.redis_prefix, CHAT_CHANNEL, hub.clone());
            bridge = Some(handle);
            tokio::time::timeout(BRIDGE_READY_TIMEOUT, ready)
                .await
                .context("Timed out subscribing to Redis")?
                .context("Redis bridge stopped before subscribing")?;
            Arc::new(RedisBroadcaster::new(pool, args.redis_prefix.clone()))
        }
    };

    let dispatcher = Dispatcher::new(broadcaster)
        .with_publish_timeout(Duration::from_millis(args.publish_timeout_ms));
    let client_config = args.client_config();
    let state = AppState::new(dispatcher, hub, client_config);

    println!();
    println!("  {} {}", "Chirp".cyan().bold(), "Chat Relay".bold());
    println!();
    println!(
        "  {}   http://{}:{}/messages",
        "Messages".green(),
        args.host,
        args.port
    );
    println!(
        "  {}     http://{}:{}/typing",
        "Typing".green(),
        args.host,
        args.port
    );
    println!(
        "  {}  ws://{}:{}/ws",
        "WebSocket".green(),
        args.host,
        args.port
    );
    println!(
        "  {}    {}",
        "Backend".green(),
        format!("{:?}", args.backend).to_lowercase()
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let served = chirp_web::run_server(state, &args.host, args.port).await;
    if let Some(handle) = bridge {
        handle.abort();
    }
    served?;

    Ok(())
}
