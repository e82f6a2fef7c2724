//! Timeline derivation: filtering, chronological ordering, year grouping
//! and the calendar month grid.

use chrono::{Datelike, NaiveDate};
use shared_types::{
    AppError, CalendarDay, CalendarMonth, Case, TimelineEvent, TimelineQuery, TimelineYearGroup,
};

/// Events matching `query`, oldest first. Equal dates keep their original order.
pub fn derive(events: &[TimelineEvent], query: &TimelineQuery) -> Vec<TimelineEvent> {
    let mut out: Vec<TimelineEvent> = events.iter().filter(|e| query.matches(e)).cloned().collect();
    // `sort_by_key` is stable.
    out.sort_by_key(|e| e.date);
    out
}

/// Like [`derive`], but drops events whose case no longer exists.
pub fn derive_existing(
    events: &[TimelineEvent],
    cases: &[Case],
    query: &TimelineQuery,
) -> Vec<TimelineEvent> {
    let mut out = derive(events, query);
    out.retain(|e| cases.iter().any(|c| c.id == e.case_id));
    out
}

/// Group an already-derived sequence by calendar year, newest year first.
/// Events inside a group stay in ascending order.
pub fn group_by_year(events: Vec<TimelineEvent>) -> Vec<TimelineYearGroup> {
    let mut groups: Vec<TimelineYearGroup> = Vec::new();
    for event in events {
        let year = event.date.year();
        match groups.iter_mut().find(|g| g.year == year) {
            Some(group) => group.events.push(event),
            None => groups.push(TimelineYearGroup {
                year,
                events: vec![event],
            }),
        }
    }
    groups.sort_by(|a, b| b.year.cmp(&a.year));
    groups
}

/// Calendar grid for `year`/`month` (1-12). Weeks start on Sunday.
///
/// An event lands in a cell only when its date equals that day exactly.
pub fn calendar_month(
    events: &[TimelineEvent],
    year: i32,
    month: u32,
) -> Result<CalendarMonth, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AppError::bad_request(format!("Invalid calendar month: {}-{:02}", year, month))
    })?;

    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| CalendarDay {
            date,
            events: events.iter().filter(|e| e.date == date).cloned().collect(),
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
