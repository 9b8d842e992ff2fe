mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use valora_core::{DEFAULT_QUERY_LIMIT, InquiryId, env_non_empty};
use valora_llm::DEFAULT_BASE_URL;
use valora_storage::SqliteStorage;

#[derive(Parser)]
#[command(name = "valora")]
#[command(about = "Regenerative agriculture property estimates for Valora Earth", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web application
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// List stored inquiries, newest first, as JSON
    Inquiries {
        #[arg(short, long, default_value_t = DEFAULT_QUERY_LIMIT)]
        limit: usize,
    },
    /// Show an inquiry with its estimate summary and analysis logs
    Show { id: InquiryId },
    /// Delete an inquiry together with its estimate and logs
    Delete { id: InquiryId },
}

pub(crate) fn get_db_path() -> PathBuf {
    env_non_empty("VALORA_DB_PATH").map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("valora-earth")
                .join("valora.db")
        },
        PathBuf::from,
    )
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    Ok(())
}

pub(crate) fn get_api_key() -> Option<String> {
    env_non_empty("OPENAI_API_KEY").or_else(|| env_non_empty("VALORA_API_KEY"))
}

pub(crate) fn get_base_url() -> String {
    env_non_empty("VALORA_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

pub(crate) async fn open_storage() -> Result<Arc<SqliteStorage>> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = SqliteStorage::new(&db_path)
        .await
        .with_context(|| format!("opening database {}", db_path.display()))?;
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Inquiries { limit } => commands::inquiries::list(limit).await,
        Commands::Show { id } => commands::inquiries::show(id).await,
        Commands::Delete { id } => commands::inquiries::delete(id).await,
    }
}
