//! Per-case statistics derived from a case snapshot.

use chrono::{DateTime, Utc};
use shared_types::{Case, CaseSummary, Hearing};

/// Earliest hearing strictly after `now`. Equal dates go to the one listed first.
pub fn next_hearing(case: &Case, now: DateTime<Utc>) -> Option<&Hearing> {
    case.hearings
        .iter()
        .filter(|h| h.is_upcoming(now))
        .fold(None, |best: Option<&Hearing>, h| match best {
            Some(b) if b.date <= h.date => Some(b),
            _ => Some(h),
        })
}

pub fn pending_document_count(case: &Case) -> usize {
    case.documents.iter().filter(|d| d.status.is_pending()).count()
}

pub fn summarize(case: &Case, now: DateTime<Utc>) -> CaseSummary {
    CaseSummary {
        case_id: case.id,
        document_count: case.documents.len(),
        hearing_count: case.hearings.len(),
        party_count: case.parties.len(),
        pending_document_count: pending_document_count(case),
        next_hearing: next_hearing(case, now).cloned(),
    }
}
