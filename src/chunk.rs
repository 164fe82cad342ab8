//! Text chunking
//!
//! Splits page documents into overlapping fixed-size chunks. Sizes are
//! measured in characters and windows always land on UTF-8 character
//! boundaries, so multi-byte text never panics a slice.

use crate::config::ChunkingConfig;
use crate::loader::PageDocument;
use serde_json::json;

/// A chunk of text ready for embedding
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Chunk text, at most `chunk_size` characters
    pub text: String,

    /// Metadata inherited from the source document plus `chunk_index`
    pub metadata: serde_json::Value,
}

/// Split documents into chunks, preserving document order.
///
/// Chunking is deterministic: the same documents and configuration always
/// produce the same chunk sequence. Each chunk inherits its document's
/// metadata and records a global 0-based `chunk_index`.
pub fn split_documents(documents: &[PageDocument], config: &ChunkingConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for document in documents {
        for text in split_text(&document.text, config) {
            let mut metadata = document.metadata.clone();
            if let Some(map) = metadata.as_object_mut() {
                map.insert("chunk_index".to_string(), json!(chunks.len()));
            }
            chunks.push(Chunk { text, metadata });
        }
    }

    chunks
}

/// Split one text into overlapping windows of `chunk_size` characters.
///
/// Consecutive windows share exactly `chunk_overlap` characters. Empty
/// text yields no chunks. The forward step is clamped to at least one
/// character, so an overlap of `chunk_size` or more (rejected by config
/// validation, but reachable on a direct call) still terminates.
pub fn split_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    // Byte offset of every character, with one-past-end sentinel, so
    // windows counted in characters slice on valid boundaries.
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = offsets.len() - 1;

    if total == 0 {
        return Vec::new();
    }

    // Characters the next window starts after the current one.
    let step = usize::max(config.chunk_size.saturating_sub(config.chunk_overlap), 1);

    let mut pieces = Vec::new();
    let mut start = 0;

    loop {
        let end = usize::min(start + config.chunk_size, total);
        pieces.push(text[offsets[start]..offsets[end]].to_string());

        if end == total {
            break;
        }

        start += step;
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize, chunk_overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size,
            chunk_overlap,
        }
    }

    fn page(text: &str, page: usize) -> PageDocument {
        PageDocument {
            text: text.to_string(),
            metadata: json!({ "source": "test.pdf", "page": page }),
        }
    }

    fn char_count(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_splitting_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(60);
        let cfg = config(1000, 150);

        let first = split_text(&text, &cfg);
        let second = split_text(&text, &cfg);
        assert_eq!(first, second);
        assert!(first.len() > 1);
    }

    #[test]
    fn test_chunk_size_bound() {
        let text = "word ".repeat(700);
        let cfg = config(1000, 150);

        for piece in split_text(&text, &cfg) {
            assert!(char_count(&piece) <= 1000);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text = "abcdefghij".repeat(300);
        let cfg = config(1000, 150);

        let pieces = split_text(&text, &cfg);
        assert!(pieces.len() > 1);

        for pair in pieces.windows(2) {
            let tail: String = pair[0]
                .chars()
                .skip(char_count(&pair[0]) - 150)
                .collect();
            let head: String = pair[1].chars().take(150).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let cfg = config(1000, 150);
        let pieces = split_text("just one small chunk", &cfg);
        assert_eq!(pieces, vec!["just one small chunk".to_string()]);
    }

    #[test]
    fn test_text_of_exactly_chunk_size_is_a_single_chunk() {
        let cfg = config(1000, 150);
        let text = "x".repeat(1000);
        let pieces = split_text(&text, &cfg);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0], text);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let cfg = config(1000, 150);
        assert!(split_text("", &cfg).is_empty());
    }

    #[test]
    fn test_oversized_overlap_degrades_to_single_char_steps() {
        // An overlap at or above the chunk size never comes from a
        // validated config, but a direct call must still terminate.
        let pieces = split_text("abcdefghij", &config(5, 7));

        assert_eq!(
            pieces,
            vec!["abcde", "bcdef", "cdefg", "defgh", "efghi", "fghij"]
        );
        assert_eq!(split_text("abcdefghij", &config(5, 5)), pieces);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld çafé ".repeat(20);
        let cfg = config(10, 3);

        let pieces = split_text(&text, &cfg);
        assert!(!pieces.is_empty());

        for piece in &pieces {
            assert!(char_count(piece) <= 10);
        }

        for pair in pieces.windows(2) {
            let tail: String = pair[0].chars().skip(char_count(&pair[0]) - 3).collect();
            let head: String = pair[1].chars().take(3).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_metadata_inherited_with_chunk_index() {
        let documents = vec![page("first page text", 0), page("second page text", 1)];
        let cfg = config(1000, 150);

        let chunks = split_documents(&documents, &cfg);
        assert_eq!(chunks.len(), 2);

        assert_eq!(chunks[0].metadata["source"], "test.pdf");
        assert_eq!(chunks[0].metadata["page"], 0);
        assert_eq!(chunks[0].metadata["chunk_index"], 0);

        assert_eq!(chunks[1].metadata["page"], 1);
        assert_eq!(chunks[1].metadata["chunk_index"], 1);
    }

    #[test]
    fn test_empty_page_produces_no_chunks() {
        let documents = vec![page("", 0), page("content", 1)];
        let chunks = split_documents(&documents, &config(1000, 150));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "content");
        assert_eq!(chunks[0].metadata["page"], 1);
    }

    #[test]
    fn test_two_page_document_scenario() {
        // Two pages of ~1250 characters each, chunked at 1000/150.
        let page_text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(22);
        assert!(char_count(&page_text) > 1200 && char_count(&page_text) < 1300);

        let documents = vec![page(&page_text, 0), page(&page_text, 1)];
        let chunks = split_documents(&documents, &config(1000, 150));

        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(char_count(&chunk.text) <= 1000);
        }

        // Chunks from the same page share the 150-character overlap region.
        let first: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata["page"] == 0)
            .collect();
        assert_eq!(first.len(), 2);
        let tail: String = first[0]
            .text
            .chars()
            .skip(char_count(&first[0].text) - 150)
            .collect();
        let head: String = first[1].text.chars().take(150).collect();
        assert_eq!(tail, head);

        // Global chunk indices count across pages.
        let indices: Vec<_> = chunks
            .iter()
            .map(|c| c.metadata["chunk_index"].as_u64().unwrap())
            .collect();
        assert_eq!(indices, (0..chunks.len() as u64).collect::<Vec<_>>());
    }
}
