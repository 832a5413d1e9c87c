mod bot;
mod core;
mod errors;
mod util;

use crate::bot::dispatcher::run;
use crate::core::config::Config;
use log::{error, info};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Bot starting...");

    match run(config).await {
        Ok(_) => info!("Bot stopped"),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
