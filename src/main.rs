//! Demo for PopBus
//!
//! Subscribes a channel to a topic, publishes one message to it and prints
//! what the subscriber receives.

use clap::Parser;
use popbus::broker::{Broker, channel};
use popbus::config::{load_config, load_config_from};
use popbus::utils::logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "popbus", about = "Publish one message through an in-process broker")]
struct Cli {
    /// Topic to subscribe and publish on
    #[arg(long, default_value = "myTopic")]
    topic: String,
    /// Message to publish
    #[arg(long, default_value = "some example message")]
    message: String,
    /// Configuration file, without extension (defaults to config/default)
    #[arg(long)]
    config: Option<String>,
    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("popbus failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = match &cli.config {
        Some(name) => load_config_from(name)?,
        None => load_config()?,
    };
    logging::init(cli.log_level.as_deref().unwrap_or(&settings.logging.level));

    let broker = Broker::new();
    let (ch, mut rx) = channel(settings.broker.channel_capacity);
    broker.subscribe(&cli.topic, ch);

    let topic = cli.topic.clone();
    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if event.topic == topic {
                println!("{}", event.data);
                break;
            }
        }
    });

    if broker.publish(&cli.topic, cli.message).is_none() {
        error!(topic = %cli.topic, "no subscribers for topic");
        consumer.abort();
        return Ok(());
    }
    info!(topic = %cli.topic, "message published");

    consumer.await?;
    Ok(())
}
