use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::error::AppError;

/// Kind of timeline entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    Event,
    Filing,
    Hearing,
    Deadline,
    Order,
}

impl TimelineEventType {
    pub const ALL: [TimelineEventType; 5] = [
        Self::Event,
        Self::Filing,
        Self::Hearing,
        Self::Deadline,
        Self::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Filing => "filing",
            Self::Hearing => "hearing",
            Self::Deadline => "deadline",
            Self::Order => "order",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "event" => Some(Self::Event),
            "filing" => Some(Self::Filing),
            "hearing" => Some(Self::Hearing),
            "deadline" => Some(Self::Deadline),
            "order" => Some(Self::Order),
            _ => None,
        }
    }
}

/// A dated fact or milestone. References its case by id; the store owns the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineEvent {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub event_type: TimelineEventType,
    /// Citation for where the fact came from (e.g. "Affidavit of J. Lamb, para 12").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub case_id: Uuid,
}

/// Request to add an event to the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewTimelineEvent {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Event title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default = "default_event_type")]
    pub event_type: TimelineEventType,
    #[serde(default)]
    pub source: Option<String>,
    pub case_id: Uuid,
}

fn default_event_type() -> TimelineEventType {
    TimelineEventType::Event
}

impl NewTimelineEvent {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        event_type: TimelineEventType,
        case_id: Uuid,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            date,
            event_type,
            source: None,
            case_id,
        }
    }

    pub fn into_event(self) -> TimelineEvent {
        TimelineEvent {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            date: self.date,
            event_type: self.event_type,
            source: self.source,
            case_id: self.case_id,
        }
    }
}

/// Partial update of a timeline event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct TimelineEventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Event title is required"))
    )]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<TimelineEventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TimelineEventUpdate {
    pub fn apply_to(self, event: &mut TimelineEvent) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(source) = self.source {
            event.source = Some(source);
        }
    }
}

// ── Derivation inputs and outputs ───────────────────────────────────

/// Filter applied before rendering the timeline.
///
/// An empty `types` set shows every type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineQuery {
    pub case_id: Option<Uuid>,
    pub types: BTreeSet<TimelineEventType>,
}

impl TimelineQuery {
    pub fn for_case(case_id: Uuid) -> Self {
        Self {
            case_id: Some(case_id),
            types: BTreeSet::new(),
        }
    }

    pub fn with_type(mut self, event_type: TimelineEventType) -> Self {
        self.types.insert(event_type);
        self
    }

    pub fn matches(&self, event: &TimelineEvent) -> bool {
        let case_ok = self.case_id.map_or(true, |id| event.case_id == id);
        let type_ok = self.types.is_empty() || self.types.contains(&event.event_type);
        case_ok && type_ok
    }
}

/// Query-string form of [`TimelineQuery`]: `?case_id=..&types=order,filing`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct TimelineParams {
    pub case_id: Option<Uuid>,
    /// Comma-separated event types.
    pub types: Option<String>,
}

impl TryFrom<TimelineParams> for TimelineQuery {
    type Error = AppError;

    fn try_from(params: TimelineParams) -> Result<Self, Self::Error> {
        let mut types = BTreeSet::new();
        if let Some(raw) = params.types {
            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let t = TimelineEventType::from_str_opt(part).ok_or_else(|| {
                    AppError::bad_request(format!(
                        "Invalid event type: {}. Valid values: {}",
                        part,
                        TimelineEventType::ALL.map(|t| t.as_str()).join(", ")
                    ))
                })?;
                types.insert(t);
            }
        }
        Ok(Self {
            case_id: params.case_id,
            types,
        })
    }
}

/// One year of the "list" timeline rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineYearGroup {
    pub year: i32,
    pub events: Vec<TimelineEvent>,
}

/// A single cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<TimelineEvent>,
}

/// Month grid for the calendar view. Weeks start on Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}
