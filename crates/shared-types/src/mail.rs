use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message summary as supplied by the mail collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailMessage {
    pub id: String,
    pub thread_id: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub received_at: DateTime<Utc>,
    pub preview: String,
    pub is_read: bool,
    pub has_attachments: bool,
}

/// Inbox list filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct InboxFilter {
    #[serde(default)]
    pub unread_only: bool,
    /// Case-insensitive substring over subject, sender and preview.
    #[serde(default)]
    pub query: Option<String>,
}
