use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypoint::config::Config;

#[derive(Parser)]
#[command(
    name = "waypoint",
    about = "Prompt-routing decision engine for multi-provider LLM completions"
)]
struct Cli {
    /// Override the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,

    /// Log level filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(port) = cli.port {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = waypoint::serve::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
