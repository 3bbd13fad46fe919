use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{load_config, LoggingSettings};
use database::{load_schema, ConnectionProvider};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The main entry point for the imóveis API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in `.env` or, as older deployments have it, `.cred`.
    dotenvy::dotenv().ok();
    dotenvy::from_filename(".cred").ok();

    let cli = Cli::parse();
    let settings = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&settings.logging)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => web_server::run_server(&settings).await?,
        Commands::LoadSchema(args) => {
            let provider = ConnectionProvider::new(&settings.database);
            let executed = load_schema(&provider, &args.file)
                .await
                .with_context(|| format!("Failed to load schema from {}", args.file.display()))?;
            tracing::info!(statements = executed, "Schema loaded.");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// REST API for real-estate property records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (the default).
    Serve,
    /// Execute a schema/seed SQL script against the configured database.
    LoadSchema(LoadSchemaArgs),
}

#[derive(Parser)]
struct LoadSchemaArgs {
    /// The SQL script to execute, statements separated by `;`.
    #[arg(long, default_value = "scripts/imoveis.sql")]
    file: PathBuf,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stdout always, plus a daily rolling file
/// when a log directory is configured. `RUST_LOG` overrides the default level.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn"));

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "imoveis.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
