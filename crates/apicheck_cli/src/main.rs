//! apicheck CLI - run the posts API contract suite from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "apicheck")]
#[command(about = "Contract tests for a posts REST API", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = apicheck_core::CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Override the API base URL from the config
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Run the standard scenario suite
    Run {
        /// Only run scenarios whose name contains this text
        #[arg(long)]
        only: Option<String>,
        /// Print each failing step in full
        #[arg(short, long)]
        verbose: bool,
    },
    /// Register a new user and print the credentials
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long, default_value = apicheck_core::DEFAULT_PASSWORD)]
        password: String,
        /// Splice a timestamp into the address before registering
        #[arg(long)]
        unique: bool,
    },
    /// Log in and print the credentials
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long, default_value = apicheck_core::DEFAULT_PASSWORD)]
        password: String,
    },
    /// List posts
    List {
        /// Return at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only posts with these ids (repeatable)
        #[arg(long = "id")]
        ids: Vec<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Init { force } => commands::init::run(&cli.config, base_url, force),
        Commands::Run { only, verbose } => {
            commands::run::run(&cli.config, base_url, only.as_deref(), verbose).await
        }
        Commands::Signup {
            email,
            password,
            unique,
        } => commands::account::signup(&cli.config, base_url, &email, &password, unique).await,
        Commands::Login { email, password } => {
            commands::account::login(&cli.config, base_url, &email, &password).await
        }
        Commands::List { limit, ids } => {
            commands::list::run(&cli.config, base_url, limit, &ids).await
        }
    }
}
