use std::sync::Arc;

use bytes::Bytes;

use crate::config::Config;
use crate::llm::LLMAdapter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LLMAdapter>,
}

// Request-scoped input

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Lowercased text after the last `.` of the file name.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// What one form submission carries: an optional file and optional pasted text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputPayload {
    pub file: Option<UploadedFile>,
    pub pasted_text: Option<String>,
}

impl InputPayload {
    pub fn new(file: Option<UploadedFile>, pasted_text: Option<String>) -> Self {
        Self { file, pasted_text }
    }
}

/// The flattened text handed to the model. Lives for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub const SEPARATOR: &'static str = "\n\n";

    /// Join extracted text and trimmed pasted text with a blank line,
    /// skipping whichever part is blank.
    pub fn combine(extracted: Option<&str>, pasted: Option<&str>) -> Self {
        let parts: Vec<&str> = [
            extracted.filter(|t| !t.trim().is_empty()),
            pasted.map(str::trim).filter(|t| !t.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self(parts.join(Self::SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// API Request/Response types

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretStatus {
    Success,
    Warning,
    Error,
}

#[derive(Debug, serde::Serialize)]
pub struct InterpretResponse {
    pub status: InterpretStatus,
    /// The model's reply, displayed as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upload problems that did not stop the request
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extraction_errors: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(filename: &str) -> UploadedFile {
        UploadedFile::new(filename, Vec::<u8>::new())
    }

    #[test]
    fn test_extension() {
        assert_eq!(named("labs.CSV").extension().as_deref(), Some("csv"));
        assert_eq!(named("a.b.xlsx").extension().as_deref(), Some("xlsx"));
        assert_eq!(named("README").extension(), None);
        assert_eq!(named("trailing.").extension(), None);
    }

    #[test]
    fn test_combine_both_parts() {
        let text = NormalizedText::combine(Some("a  b\n1  2"), Some("  note  "));
        assert_eq!(text.as_str(), "a  b\n1  2\n\nnote");
    }

    #[test]
    fn test_combine_paste_only() {
        let text = NormalizedText::combine(None, Some("\n cough, fever \n"));
        assert_eq!(text.as_str(), "cough, fever");

        let text = NormalizedText::combine(Some("   "), Some("fever"));
        assert_eq!(text.as_str(), "fever");
    }

    #[test]
    fn test_combine_extracted_only() {
        let text = NormalizedText::combine(Some("ALT 88"), Some("   "));
        assert_eq!(text.as_str(), "ALT 88");
    }

    #[test]
    fn test_combine_nothing_is_empty() {
        assert!(NormalizedText::combine(None, None).is_empty());
        assert!(NormalizedText::combine(Some(" \n"), Some("\t")).is_empty());
        assert!(!NormalizedText::combine(None, Some("x")).is_empty());
    }

    #[test]
    fn test_response_skips_empty_fields() {
        let response = InterpretResponse {
            status: InterpretStatus::Warning,
            interpretation: None,
            warning: Some("Please provide some medical content to analyze.".to_string()),
            error: None,
            extraction_errors: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "warning");
        assert!(json.get("interpretation").is_none());
        assert!(json.get("extraction_errors").is_none());
    }
}
