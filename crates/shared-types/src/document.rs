use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Lifecycle stage of a case document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Review,
    Final,
    Filed,
    Served,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        Self::Draft,
        Self::Review,
        Self::Final,
        Self::Filed,
        Self::Served,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Final => "final",
            Self::Filed => "filed",
            Self::Served => "served",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "review" => Some(Self::Review),
            "final" => Some(Self::Final),
            "filed" => Some(Self::Filed),
            "served" => Some(Self::Served),
            _ => None,
        }
    }

    /// Drafts and documents under review still need work before filing.
    pub fn is_pending(&self) -> bool {
        match self {
            Self::Draft | Self::Review => true,
            Self::Final | Self::Filed | Self::Served => false,
        }
    }
}

/// A document belonging to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    /// Free-text kind such as "Pleading" or "Affidavit".
    pub doc_type: String,
    pub status: DocumentStatus,
    pub updated_at: DateTime<Utc>,
    /// Opaque identifier in the external document store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Request to attach a document to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewDocument {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Document name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub doc_type: String,
    #[serde(default = "default_document_status")]
    pub status: DocumentStatus,
    #[serde(default)]
    pub external_id: Option<String>,
}

fn default_document_status() -> DocumentStatus {
    DocumentStatus::Draft
}

impl NewDocument {
    pub fn into_document(self, now: DateTime<Utc>) -> Document {
        Document {
            id: Uuid::new_v4(),
            name: self.name,
            doc_type: self.doc_type,
            status: self.status,
            updated_at: now,
            external_id: self.external_id,
        }
    }
}

/// Request to move a document to another lifecycle stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DocumentStatusUpdate {
    pub status: DocumentStatus,
}
