//! Search command implementation

use crate::embed::Embedder;
use crate::error::Result;
use crate::store::{PgVectorStore, ScoredChunk};
use tracing::info;

/// Content preview length in the results table
const PREVIEW_CHARS: usize = 200;

/// Fixed notice printed when a search matches nothing
pub const NO_RESULTS_MESSAGE: &str = "No documents found.";

/// Execute a similarity search
pub async fn cmd_search(
    embedder: &dyn Embedder,
    store: &PgVectorStore,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>> {
    info!("Searching: {}", query);

    let spinner = super::start_spinner("Searching...");
    let searched = embed_and_search(embedder, store, query, top_k).await;
    spinner.finish_and_clear();
    let results = searched?;

    info!("Returning {} result(s)", results.len());
    Ok(results)
}

async fn embed_and_search(
    embedder: &dyn Embedder,
    store: &PgVectorStore,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>> {
    let vector = embedder.embed(query).await?;
    store.search(&vector, top_k).await
}

/// One rendered row of the search results table
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    /// 1-based rank in retrieval order
    pub rank: usize,

    /// Similarity score, formatted to 4 decimal places
    pub score: String,

    /// Chunk content, truncated to the preview length
    pub content: String,
}

impl SearchRow {
    /// Build table rows from retrieval results, in retrieval order.
    pub fn from_results(results: &[ScoredChunk]) -> Vec<SearchRow> {
        results
            .iter()
            .enumerate()
            .map(|(idx, result)| SearchRow {
                rank: idx + 1,
                score: format!("{:.4}", result.score),
                content: truncate_content(&result.text, PREVIEW_CHARS),
            })
            .collect()
    }
}

/// Truncate to `limit` characters, marking the cut with an ellipsis.
/// The limit is counted in characters so the cut lands on a char boundary.
fn truncate_content(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Print search results to console
pub fn print_search_results(results: &[ScoredChunk]) {
    if results.is_empty() {
        println!("{NO_RESULTS_MESSAGE}");
        return;
    }

    println!("\nTop {} results:\n", results.len());

    for row in SearchRow::from_results(results) {
        println!("{}. [score: {}]", row.rank, row.score);
        println!("   {}\n", row.content.replace('\n', " "));
    }

    println!("✓ Found {} document(s)", results.len());
}
