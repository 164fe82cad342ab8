//! docent CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use docent::{
    commands::{cmd_chat, cmd_ingest, cmd_search, print_ingest_stats, print_search_results},
    config::Config,
    embed::GeminiEmbedder,
    error::Result,
    llm::GeminiChat,
    store::PgVectorStore,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docent")]
#[command(version, about = "CLI for PDF ingestion, vector search, and RAG chat", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a PDF into the vector database
    Ingest {
        /// Path to the PDF file (defaults to PDF_PATH from the environment)
        #[arg(short = 'p', long)]
        pdf_path: Option<PathBuf>,
    },

    /// Search stored documents by vector similarity
    Search {
        /// The search query
        query: String,

        /// Number of results to return
        #[arg(
            short = 'k',
            long,
            default_value = "10",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        top_k: u32,
    },

    /// Start an interactive RAG chat session
    Chat,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A .env file in the working directory supplies settings when present;
    // real environment variables win over file values.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle completions command (doesn't need config or clients)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "docent", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration; a missing API key fails here, before any client
    // is built or any network call is possible.
    let config = Config::from_env()?;

    // Initialize components
    let embedder = GeminiEmbedder::new(&config.google_api_key, &config.embedding_model)?;
    let store = PgVectorStore::connect(&config.database_url, &config.collection_name)?;

    // Handle commands
    match cli.command {
        Commands::Ingest { pdf_path } => {
            let path = pdf_path.unwrap_or_else(|| config.pdf_path.clone());
            let stats = cmd_ingest(&config, &embedder, &store, &path).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_ingest_stats(&stats);
            }
        }

        Commands::Search { query, top_k } => {
            let results = cmd_search(&embedder, &store, &query, top_k as usize).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_search_results(&results);
            }
        }

        Commands::Chat => {
            let model = GeminiChat::new(&config.google_api_key, &config.chat_model)?;
            cmd_chat(&embedder, &store, &model).await?;
        }

        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
