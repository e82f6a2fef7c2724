//! Inbox view over the mail collaborator: per-case monitor matching and list filtering.

use shared_types::{Case, EmailMessage, InboxFilter};

/// Messages caught by at least one of the case's enabled monitors.
pub fn messages_for_case(case: &Case, messages: &[EmailMessage]) -> Vec<EmailMessage> {
    messages
        .iter()
        .filter(|m| case.email_monitors.iter().any(|mon| mon.matches(&m.from)))
        .cloned()
        .collect()
}

/// Apply the inbox filter and order newest first.
pub fn filter_messages(messages: &[EmailMessage], filter: &InboxFilter) -> Vec<EmailMessage> {
    let needle = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<EmailMessage> = messages
        .iter()
        .filter(|m| !filter.unread_only || !m.is_read)
        .filter(|m| match &needle {
            Some(q) => [&m.subject, &m.from, &m.preview]
                .iter()
                .any(|s| s.to_lowercase().contains(q.as_str())),
            None => true,
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| b.received_at.cmp(&a.received_at));
    out
}
