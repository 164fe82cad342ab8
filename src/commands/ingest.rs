//! Ingest command implementation

use crate::chunk::split_documents;
use crate::config::Config;
use crate::embed::Embedder;
use crate::error::Result;
use crate::loader::load_pdf;
use crate::store::{EmbeddedChunk, PgVectorStore};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Statistics from an ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestStats {
    pub path: String,
    pub pages: usize,
    pub chunks: usize,
    pub collection: String,
}

/// Ingest a PDF into the vector store.
///
/// Load and split run first; embedding failures abort before anything is
/// written, and all chunk rows land in one transaction at the end.
pub async fn cmd_ingest(
    config: &Config,
    embedder: &dyn Embedder,
    store: &PgVectorStore,
    path: &Path,
) -> Result<IngestStats> {
    info!("Ingesting PDF: {}", path.display());

    let documents = load_pdf(path)?;
    info!("Loaded {} page(s)", documents.len());

    let chunks = split_documents(&documents, &config.chunking);
    info!("Split into {} chunk(s)", chunks.len());

    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();

    let spinner = super::start_spinner("Embedding chunks...");
    let embedded = embedder.embed_batch(&texts).await;
    spinner.finish_and_clear();
    let vectors = embedded?;

    let rows: Vec<EmbeddedChunk> = chunks
        .into_iter()
        .zip(vectors)
        .map(|(chunk, embedding)| EmbeddedChunk {
            text: chunk.text,
            embedding,
            metadata: chunk.metadata,
        })
        .collect();

    let spinner = super::start_spinner("Storing chunks...");
    let stored = persist(store, embedder.dimension(), &rows).await;
    spinner.finish_and_clear();
    stored?;

    info!(
        "Stored {} chunk(s) in collection '{}'",
        rows.len(),
        store.collection()
    );

    Ok(IngestStats {
        path: path.display().to_string(),
        pages: documents.len(),
        chunks: rows.len(),
        collection: store.collection().to_string(),
    })
}

async fn persist(
    store: &PgVectorStore,
    dimension: usize,
    rows: &[EmbeddedChunk],
) -> Result<()> {
    store.ensure_collection(dimension).await?;
    store.upsert(rows).await
}

/// Print ingestion stats to console
pub fn print_ingest_stats(stats: &IngestStats) {
    println!("\n✓ Ingestion complete");
    println!("  PDF: {}", stats.path);
    println!("  Pages loaded: {}", stats.pages);
    println!("  Chunks stored: {}", stats.chunks);
    println!("  Collection: {}", stats.collection);
}
