//! External link templates. Identifiers are opaque and interpolated as-is.

use serde::Serialize;
use shared_types::Case;
use uuid::Uuid;

const DRIVE_FOLDER: &str = "https://drive.google.com/drive/folders/";
const SPREADSHEET: &str = "https://docs.google.com/spreadsheets/d/";
const DOCUMENT: &str = "https://docs.google.com/document/d/";

pub fn drive_folder_url(id: &str) -> String {
    format!("{DRIVE_FOLDER}{id}")
}

pub fn spreadsheet_url(id: &str) -> String {
    format!("{SPREADSHEET}{id}")
}

pub fn document_url(id: &str) -> String {
    format!("{DOCUMENT}{id}/edit")
}

/// Resolved external links for one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CaseLinks {
    pub case_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_folder_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_url: Option<String>,
    pub documents: Vec<DocumentLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DocumentLink {
    pub document_id: Uuid,
    pub name: String,
    pub url: String,
}

/// Links for every external reference the case carries. Documents without one are omitted.
pub fn case_links(case: &Case) -> CaseLinks {
    CaseLinks {
        case_id: case.id,
        drive_folder_url: case.drive_folder_id.as_deref().map(drive_folder_url),
        spreadsheet_url: case.sheet_id.as_deref().map(spreadsheet_url),
        documents: case
            .documents
            .iter()
            .filter_map(|d| {
                d.external_id.as_deref().map(|ext| DocumentLink {
                    document_id: d.id,
                    name: d.name.clone(),
                    url: document_url(ext),
                })
            })
            .collect(),
    }
}
