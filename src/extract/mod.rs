//! Content Normalizer
//!
//! Flattens an uploaded report and/or pasted text into the single string that
//! is sent to the model:
//!
//! - `csv`: parsed as rows, rendered as an aligned text table
//! - `xlsx` / `xls`: first worksheet, rendered like the CSV case
//! - `pdf`: text of every page in order, trimmed
//!
//! Extraction failures are collected rather than returned so the pasted text
//! still makes it through.

pub mod pdf;
pub mod spreadsheet;
pub mod table;

use tracing::{info, warn};

use crate::models::{InputPayload, NormalizedText, UploadedFile};

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "xlsx", "xls", "pdf"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("could not parse CSV: {0}")]
    Csv(String),

    #[error("could not read spreadsheet: {0}")]
    Excel(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("unsupported file type {0:?} (expected csv, xlsx, xls or pdf)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Excel,
    Pdf,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" | "xls" => Some(SourceFormat::Excel),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Excel => write!(f, "excel"),
            SourceFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// Result of flattening one request's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub text: NormalizedText,
    pub extraction_errors: Vec<ExtractionError>,
}

/// Extract the text of one uploaded file according to its extension.
pub fn extract_file(file: &UploadedFile) -> Result<String, ExtractionError> {
    let ext = file.extension().unwrap_or_default();
    let format = SourceFormat::from_extension(&ext)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(file.filename.clone()))?;

    info!(filename = %file.filename, format = %format, size = file.data.len(), "Extracting uploaded file");

    match format {
        SourceFormat::Csv => Ok(spreadsheet::csv_table(&file.data)?.render()),
        SourceFormat::Excel => Ok(spreadsheet::excel_table(&file.data)?.render()),
        SourceFormat::Pdf => pdf::extract_text(&file.data),
    }
}

/// Combine the extracted file text and the pasted text into one blob.
pub fn normalize(payload: &InputPayload) -> Normalization {
    let mut extraction_errors = Vec::new();

    let extracted = payload.file.as_ref().and_then(|file| match extract_file(file) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(filename = %file.filename, error = %e, "Failed to read uploaded file");
            extraction_errors.push(e);
            None
        }
    });

    let text = NormalizedText::combine(extracted.as_deref(), payload.pasted_text.as_deref());
    info!(
        text_len = text.len(),
        error_count = extraction_errors.len(),
        "Input normalized"
    );

    Normalization {
        text,
        extraction_errors,
    }
}
