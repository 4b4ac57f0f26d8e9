use clap::Parser;
use hotel_booking_api::cli::{self, Cli};
use hotel_booking_api::config::{AppConfig, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRETS_PROVIDER, etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli, config).await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so `token` output can be piped
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
