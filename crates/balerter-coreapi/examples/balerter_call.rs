//! Call a single core API operation from the command line
//!
//! ```text
//! cargo run --example balerter_call -- --address http://localhost:2000 kv-all
//! cargo run --example balerter_call -- --config coreapi.json alert error db_down "db is down" --channels slack
//! ```

use std::path::PathBuf;

use balerter_coreapi::{load_config, AlertLevel, AlertOptions, ClientConfig, CoreApi};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

#[derive(Parser)]
#[command(name = "balerter_call")]
#[command(about = "Invoke one Balerter core API operation")]
struct Args {
    /// Path to a JSON client configuration file
    #[arg(short, long, conflicts_with = "address")]
    config: Option<PathBuf>,

    /// Server address (used when no config file is given)
    #[arg(short, long, default_value = "http://localhost:2000")]
    address: String,

    /// Authorization token
    #[arg(short, long, default_value = "")]
    token: String,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Success,
    Warning,
    Error,
}

impl From<LevelArg> for AlertLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Success => AlertLevel::Success,
            LevelArg::Warning => AlertLevel::Warning,
            LevelArg::Error => AlertLevel::Error,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Send an alert at the given level
    Alert {
        level: LevelArg,
        name: String,
        message: String,
        /// Comma-separated channel names
        #[arg(long, value_delimiter = ',')]
        channels: Vec<String>,
        #[arg(long)]
        quiet: bool,
    },
    /// Show the stored state of an alert
    AlertGet { name: String },
    KvGet { key: String },
    KvPut { key: String, value: String },
    KvAll,
    /// Write an info message to the server log
    Log { message: String },
    Runtime,
    Tls { hostname: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        ClientConfig::new(&args.address, &args.token)
    };
    config.resolve_secrets()?;

    let api = CoreApi::from_config(&config)?;

    match args.command {
        Command::Alert {
            level,
            name,
            message,
            channels,
            quiet,
        } => {
            let options = AlertOptions {
                channels,
                quiet,
                ..Default::default()
            };
            let update = api
                .alert
                .send(level.into(), &name, &message, Some(&options))
                .await?;
            println!("level_was_updated: {}", update.level_was_updated);
            if let Some(alert) = update.alert {
                println!("{}", serde_json::to_string_pretty(&alert)?);
            }
        }
        Command::AlertGet { name } => match api.alert.get(&name).await? {
            Some(alert) => println!("{}", serde_json::to_string_pretty(&alert)?),
            None => println!("alert {} not found", name),
        },
        Command::KvGet { key } => println!("{}", api.kv.get(&key).await?),
        Command::KvPut { key, value } => api.kv.upsert(&key, &value).await?,
        Command::KvAll => {
            let mut values: Vec<_> = api.kv.all().await?.into_iter().collect();
            values.sort();
            for (key, value) in values {
                println!("{} = {}", key, value);
            }
        }
        Command::Log { message } => api.log.info(&message).await?,
        Command::Runtime => println!("{}", serde_json::to_string_pretty(&api.runtime.get().await?)?),
        Command::Tls { hostname } => {
            for cert in api.tls.get(&hostname).await? {
                println!(
                    "{} expires {} ({})",
                    cert.issuer,
                    cert.expiry,
                    cert.dns_names.join(", ")
                );
            }
        }
    }

    Ok(())
}
