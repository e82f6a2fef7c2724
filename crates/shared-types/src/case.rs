use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::document::{Document, NewDocument};
use crate::hearing::{Hearing, NewHearing};
use crate::monitor::{EmailMonitorConfig, NewEmailMonitor};
use crate::party::{NewParty, Party};

/// Case lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Active,
    Pending,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [Self::Active, Self::Pending, Self::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Closed => "closed",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

// ── Aggregate root ──────────────────────────────────────────────────

/// A legal matter. Parties, hearings, documents and monitors live only inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Case {
    pub id: Uuid,
    pub name: String,
    /// Docket number, e.g. "HCA 1646/2023".
    pub number: String,
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    pub status: CaseStatus,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub hearings: Vec<Hearing>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub email_monitors: Vec<EmailMonitorConfig>,
    /// Opaque external storage folder reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_folder_id: Option<String>,
    /// Opaque external spreadsheet reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Request types ───────────────────────────────────────────────────

/// Request to open a new case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewCase {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case number is required"))
    )]
    pub number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Court is required"))
    )]
    pub court: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(nested))]
    pub parties: Vec<NewParty>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(nested))]
    pub hearings: Vec<NewHearing>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(nested))]
    pub documents: Vec<NewDocument>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(nested))]
    pub email_monitors: Vec<NewEmailMonitor>,
    #[serde(default)]
    pub drive_folder_id: Option<String>,
    #[serde(default)]
    pub sheet_id: Option<String>,
}

impl NewCase {
    /// Shorthand for the three required fields; everything else defaults.
    pub fn new(name: impl Into<String>, number: impl Into<String>, court: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            court: court.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Materialize the request, assigning ids and stamping both timestamps with `now`.
    pub fn into_case(self, now: DateTime<Utc>) -> Case {
        Case {
            id: Uuid::new_v4(),
            name: self.name,
            number: self.number,
            court: self.court,
            jurisdiction: self.jurisdiction,
            status: self.status,
            parties: self.parties.into_iter().map(NewParty::into_party).collect(),
            hearings: self.hearings.into_iter().map(NewHearing::into_hearing).collect(),
            documents: self
                .documents
                .into_iter()
                .map(|d| d.into_document(now))
                .collect(),
            email_monitors: self
                .email_monitors
                .into_iter()
                .map(NewEmailMonitor::into_monitor)
                .collect(),
            drive_folder_id: self.drive_folder_id,
            sheet_id: self.sheet_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a case (only provided fields are changed).
///
/// Collection fields replace the whole collection when present. For the
/// optional text fields an explicit `null` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CaseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case name is required"))
    )]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Case number is required"))
    )]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Court is required"))
    )]
    pub court: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub jurisdiction: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parties: Option<Vec<Party>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hearings: Option<Vec<Hearing>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_monitors: Option<Vec<EmailMonitorConfig>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub drive_folder_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub sheet_id: Option<Option<String>>,
}

/// A present field, `null` included, becomes `Some`. Absent fields fall back
/// to `#[serde(default)]`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CaseUpdate {
    /// Merge the provided fields into `case`. Timestamps are the caller's concern.
    pub fn apply_to(self, case: &mut Case) {
        if let Some(name) = self.name {
            case.name = name;
        }
        if let Some(number) = self.number {
            case.number = number;
        }
        if let Some(court) = self.court {
            case.court = court;
        }
        if let Some(jurisdiction) = self.jurisdiction {
            case.jurisdiction = jurisdiction;
        }
        if let Some(status) = self.status {
            case.status = status;
        }
        if let Some(parties) = self.parties {
            case.parties = parties;
        }
        if let Some(hearings) = self.hearings {
            case.hearings = hearings;
        }
        if let Some(documents) = self.documents {
            case.documents = documents;
        }
        if let Some(monitors) = self.email_monitors {
            case.email_monitors = monitors;
        }
        if let Some(folder) = self.drive_folder_id {
            case.drive_folder_id = folder;
        }
        if let Some(sheet) = self.sheet_id {
            case.sheet_id = sheet;
        }
    }
}

/// Request to change which case is in context. `None` clears the selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectCaseRequest {
    #[serde(default)]
    pub case_id: Option<Uuid>,
}

// ── Derived views ───────────────────────────────────────────────────

/// Per-case statistics shown in the case header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseSummary {
    pub case_id: Uuid,
    pub document_count: usize,
    pub hearing_count: usize,
    pub party_count: usize,
    pub pending_document_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hearing: Option<Hearing>,
}
