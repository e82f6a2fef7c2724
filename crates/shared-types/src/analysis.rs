use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Declared media type of an uploaded document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    Docx,
    PlainText,
}

impl MediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::PlainText => "text/plain",
        }
    }

    /// Infer the media type from a file extension (`.pdf`, `.docx`, `.txt`).
    pub fn from_file_name(name: &str) -> Result<Self, AppError> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::PlainText),
            _ => Err(AppError::bad_request(format!(
                "Unsupported file type for {}. Upload a PDF, DOCX or TXT file",
                name
            ))),
        }
    }
}

/// Document handed to the analysis provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPayload {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl DocumentPayload {
    pub fn from_upload(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AppError> {
        let file_name = file_name.into();
        let media_type = MediaType::from_file_name(&file_name)?;
        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Factual,
    Legal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Medium,
    Weak,
}

/// An assertion extracted from the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Claim {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    pub claim_type: ClaimType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisTimelineEntry {
    /// ISO date as extracted; not guaranteed to parse.
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Weakness {
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Argument {
    pub argument: String,
    pub strength: Strength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_argument: Option<String>,
}

/// Structured result of a document analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DocumentAnalysis {
    pub summary: String,
    pub claims: Vec<Claim>,
    pub timeline: Vec<AnalysisTimelineEntry>,
    pub weaknesses: Vec<Weakness>,
    pub arguments: Vec<Argument>,
}

impl DocumentAnalysis {
    /// Weaknesses ordered most severe first, stable within a severity.
    pub fn weaknesses_by_severity(&self) -> Vec<&Weakness> {
        let mut out: Vec<&Weakness> = self.weaknesses.iter().collect();
        out.sort_by_key(|w| w.severity);
        out
    }
}
