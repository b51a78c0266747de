//! CLI entry point for caravel

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "caravel")]
#[command(version = "0.1.0")]
#[command(about = "A static blog generator backed by a headless content API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files from the content API
    #[command(alias = "g")]
    Generate,

    /// Start a local server with on-demand page generation
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts known to the content API
    List,

    /// Clean the public folder and route cache
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "caravel=debug,info"
    } else {
        "caravel=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate => {
            let caravel = caravel::Caravel::new(&base_dir)?;
            tracing::info!("Generating static files...");
            caravel.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let caravel = caravel::Caravel::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            caravel.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            caravel::server::start(&caravel, &ip, port).await?;
        }

        Commands::List => {
            let caravel = caravel::Caravel::new(&base_dir)?;
            caravel::commands::list::run(&caravel).await?;
        }

        Commands::Clean => {
            let caravel = caravel::Caravel::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            caravel.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("caravel version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
