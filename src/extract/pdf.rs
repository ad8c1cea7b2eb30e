use lopdf::Document;
use tracing::{debug, warn};

use super::ExtractionError;

/// Text of every page, in document order.
///
/// Only an undecodable document is an error. A page whose text cannot be
/// extracted contributes an empty string.
pub fn page_texts(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages = doc.get_pages();
    debug!(page_count = pages.len(), "Decoded PDF document");

    // get_pages is keyed by 1-based page number, so iteration follows document order
    let texts: Vec<String> = pages
        .keys()
        .map(|page_number| {
            doc.extract_text(&[*page_number]).unwrap_or_else(|e| {
                warn!(page = *page_number, error = %e, "Skipping unreadable PDF page");
                String::new()
            })
        })
        .collect();

    Ok(texts)
}

/// Concatenated page text with surrounding whitespace trimmed.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text: String = page_texts(bytes)?.concat();
    Ok(text.trim().to_string())
}
