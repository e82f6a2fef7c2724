//! Sample matter loaded when `seed_demo_data` is enabled.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use shared_types::{
    AppError, CaseStatus, DocumentStatus, NewCase, NewDocument, NewEmailMonitor, NewHearing,
    NewParty, NewTimelineEvent, PartyRole, TimelineEventType,
};

use crate::store::EntityStore;

/// A store holding the "Lamb v. Liquidity" matter and its timeline.
pub fn demo_store() -> Result<EntityStore, AppError> {
    let mut store = EntityStore::new();

    let mut req = NewCase::new(
        "Lamb v. Liquidity",
        "HCA 1646/2023",
        "High Court of Hong Kong",
    )
    .with_status(CaseStatus::Active);
    req.jurisdiction = Some("Hong Kong SAR".to_string());
    req.parties = vec![
        NewParty {
            name: "Andrew Lamb".to_string(),
            role: PartyRole::Plaintiff,
            representatives: vec!["Lamb Chambers".to_string()],
            contact_emails: vec!["counsel@lambchambers.hk".to_string()],
        },
        NewParty {
            name: "Liquidity Holdings Ltd".to_string(),
            role: PartyRole::Defendant,
            representatives: vec!["Smith & Co".to_string()],
            contact_emails: vec!["jsmith@smithlaw.hk".to_string()],
        },
    ];
    req.hearings = vec![
        NewHearing {
            hearing_type: "Inter partes injunction".to_string(),
            date: Utc
                .with_ymd_and_hms(2023, 10, 12, 2, 30, 0)
                .single()
                .unwrap_or_else(Utc::now),
            judge: Some("Deputy High Court Judge Ho".to_string()),
            location: Some("Court 23, High Court Building".to_string()),
            notes: None,
        },
        NewHearing {
            hearing_type: "Case management conference".to_string(),
            date: Utc::now() + Duration::days(14),
            judge: None,
            location: Some("Court 23, High Court Building".to_string()),
            notes: Some("Exchange witness statements beforehand".to_string()),
        },
    ];
    req.documents = vec![
        NewDocument {
            name: "Statement of Claim".to_string(),
            doc_type: "pleading".to_string(),
            status: DocumentStatus::Filed,
            external_id: None,
        },
        NewDocument {
            name: "Affirmation of Andrew Lamb".to_string(),
            doc_type: "evidence".to_string(),
            status: DocumentStatus::Review,
            external_id: None,
        },
        NewDocument {
            name: "Skeleton Argument".to_string(),
            doc_type: "submission".to_string(),
            status: DocumentStatus::Draft,
            external_id: None,
        },
    ];
    req.email_monitors = vec![NewEmailMonitor {
        name: "Court registry".to_string(),
        from_domain: Some("judiciary.hk".to_string()),
        from_email: None,
        enabled: true,
    }];

    let case = store.add_case(req)?;

    let timeline = [
        ("Writ of Summons issued", (2023, 8, 21), TimelineEventType::Filing),
        ("Ex parte injunction granted", (2023, 8, 22), TimelineEventType::Order),
        ("Inter partes hearing", (2023, 10, 12), TimelineEventType::Hearing),
        ("Injunction Order Made", (2023, 10, 12), TimelineEventType::Order),
        ("Defence due", (2023, 11, 9), TimelineEventType::Deadline),
        ("Without prejudice meeting", (2024, 1, 15), TimelineEventType::Event),
    ];
    for (title, (y, m, d), event_type) in timeline {
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| AppError::internal(format!("invalid seed date {y}-{m}-{d}")))?;
        store.add_timeline_event(NewTimelineEvent::new(title, date, event_type, case.id))?;
    }

    store.select_case(Some(case.id));
    tracing::info!(case_id = %case.id, "Demo data seeded");
    Ok(store)
}
