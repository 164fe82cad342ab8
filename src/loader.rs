//! PDF document loading
//!
//! Converts a PDF file into one page-level document per page, in page
//! order. Text extraction itself is delegated to `pdf-extract`.

use crate::error::{Error, Result};
use serde_json::json;
use std::path::Path;
use tracing::debug;

/// A page-level text document
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// Extracted page text
    pub text: String,

    /// Source metadata (`source` path, 0-based `page` index)
    pub metadata: serde_json::Value,
}

/// Load a PDF into one document per page.
///
/// The path must name an existing regular file; anything else is rejected
/// before the parser runs.
pub fn load_pdf(path: &Path) -> Result<Vec<PageDocument>> {
    if !path.exists() {
        return Err(Error::Input(format!("PDF not found: {}", path.display())));
    }

    if !path.is_file() {
        return Err(Error::Input(format!(
            "not a regular file: {}",
            path.display()
        )));
    }

    debug!("Extracting text from {}", path.display());

    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| Error::Load(format!("{}: {}", path.display(), e)))?;

    let source = path.display().to_string();
    let documents = pages
        .into_iter()
        .enumerate()
        .map(|(page, text)| PageDocument {
            text,
            metadata: json!({ "source": source.clone(), "page": page }),
        })
        .collect();

    Ok(documents)
}
