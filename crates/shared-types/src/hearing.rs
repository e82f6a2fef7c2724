use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// A scheduled hearing. Owned by exactly one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Hearing {
    pub id: Uuid,
    /// Free-text label such as "Case Management Conference".
    pub hearing_type: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Hearing {
    /// A hearing is upcoming when it is strictly after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }
}

/// Request to schedule a hearing on a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewHearing {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Hearing type is required"))
    )]
    pub hearing_type: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewHearing {
    pub fn into_hearing(self) -> Hearing {
        Hearing {
            id: Uuid::new_v4(),
            hearing_type: self.hearing_type,
            date: self.date,
            judge: self.judge,
            location: self.location,
            notes: self.notes,
        }
    }
}
