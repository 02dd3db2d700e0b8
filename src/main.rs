use clap::{Parser, Subcommand};
use clawpulse_lib::{commands, config::Settings, webui};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "clawpulse_lib=info,clawpulse=info";

#[derive(Parser)]
#[command(name = "clawpulse")]
#[command(about = "Liveness dashboard backend for a fleet of OpenClaw agents")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides CLAWPULSE_PORT and config files)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the derived status of every agent once
    Fleet {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let result = Settings::load().and_then(|mut settings| {
                if let Some(port) = port {
                    settings.port = port;
                }
                webui::run_server(settings)
            });
            if let Err(e) = result {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Fleet { json } => {
            if let Err(e) = commands::fleet::run(json) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("ClawPulse v{}", VERSION);
            println!("Agent liveness and status push API");
        }
    }
}
