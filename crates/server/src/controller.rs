//! Single-owner controller for the [`EntityStore`].
//!
//! One task owns the store and applies commands in arrival order, so writes
//! are serialized and the last writer wins. Views talk to it through a
//! cloneable [`StoreHandle`] and learn about changes from [`StoreEvent`]s.

use chrono::Utc;
use shared_types::{
    AppError, CalendarMonth, Case, CaseSummary, CaseUpdate, Document, DocumentStatus,
    EmailMonitorConfig, GoogleCredentials, Hearing, LlmConfig, NewCase, NewDocument,
    NewEmailMonitor, NewHearing, NewParty, NewTimelineEvent, Party, TimelineEvent,
    TimelineEventUpdate, TimelineQuery, TimelineYearGroup,
};
use tokio::sync::{broadcast, mpsc, oneshot};
use uuid::Uuid;

use crate::error_convert::{controller_gone, reply_dropped};
use crate::store::EntityStore;
use crate::{aggregate, timeline};

const COMMAND_BUFFER: usize = 256;
const EVENT_BUFFER: usize = 64;

/// Change notification published after every successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    CaseAdded(Uuid),
    CaseUpdated(Uuid),
    CaseDeleted(Uuid),
    SelectionChanged(Option<Uuid>),
    TimelineChanged,
    SettingsChanged,
}

type Reply<T> = oneshot::Sender<T>;

enum StoreCommand {
    ListCases(Reply<Vec<Case>>),
    GetCase(Uuid, Reply<Option<Case>>),
    AddCase(NewCase, Reply<Result<Case, AppError>>),
    UpdateCase(Uuid, CaseUpdate, Reply<Result<Case, AppError>>),
    DeleteCase(Uuid, Reply<bool>),
    SelectCase(Option<Uuid>, Reply<()>),
    SelectExistingCase(Option<Uuid>, Reply<Result<Option<Case>, AppError>>),
    SelectedCase(Reply<Option<Case>>),
    CaseSummary(Uuid, Reply<Result<CaseSummary, AppError>>),
    AddParty(Uuid, NewParty, Reply<Result<Party, AppError>>),
    RemoveParty(Uuid, Uuid, Reply<Result<(), AppError>>),
    AddHearing(Uuid, NewHearing, Reply<Result<Hearing, AppError>>),
    RemoveHearing(Uuid, Uuid, Reply<Result<(), AppError>>),
    AddDocument(Uuid, NewDocument, Reply<Result<Document, AppError>>),
    RemoveDocument(Uuid, Uuid, Reply<Result<(), AppError>>),
    SetDocumentStatus(Uuid, Uuid, DocumentStatus, Reply<Result<Document, AppError>>),
    AddEmailMonitor(Uuid, NewEmailMonitor, Reply<Result<EmailMonitorConfig, AppError>>),
    RemoveEmailMonitor(Uuid, Uuid, Reply<Result<(), AppError>>),
    TimelineEvents(Reply<Vec<TimelineEvent>>),
    Timeline(TimelineQuery, Reply<Vec<TimelineEvent>>),
    TimelineByYear(TimelineQuery, Reply<Vec<TimelineYearGroup>>),
    CalendarMonth(TimelineQuery, i32, u32, Reply<Result<CalendarMonth, AppError>>),
    AddTimelineEvent(NewTimelineEvent, Reply<Result<TimelineEvent, AppError>>),
    AddTimelineEvents(Vec<NewTimelineEvent>, Reply<Result<Vec<TimelineEvent>, AppError>>),
    SetTimelineEvents(Vec<TimelineEvent>, Reply<Result<(), AppError>>),
    UpdateTimelineEvent(Uuid, TimelineEventUpdate, Reply<Result<TimelineEvent, AppError>>),
    DeleteTimelineEvent(Uuid, Reply<bool>),
    LlmConfig(Reply<LlmConfig>),
    SetLlmConfig(LlmConfig, Reply<()>),
    GoogleCredentials(Reply<Option<GoogleCredentials>>),
    SetGoogleCredentials(Option<GoogleCredentials>, Reply<Result<(), AppError>>),
}

/// Cloneable handle to the store controller task.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
    events: broadcast::Sender<StoreEvent>,
}

impl StoreHandle {
    /// Move `store` into a new controller task. Must be called inside a Tokio runtime.
    pub fn spawn(store: EntityStore) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        let publisher = events.clone();
        tokio::spawn(async move {
            run(store, rx, publisher).await;
        });

        Self { tx, events }
    }

    /// Receive a [`StoreEvent`] for every mutation applied after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> StoreCommand,
    ) -> Result<T, AppError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(make(reply_tx)).await.map_err(controller_gone)?;
        reply_rx.await.map_err(reply_dropped)
    }

    // ── Cases ───────────────────────────────────────────────────────

    pub async fn list_cases(&self) -> Result<Vec<Case>, AppError> {
        self.request(StoreCommand::ListCases).await
    }

    pub async fn get_case(&self, id: Uuid) -> Result<Case, AppError> {
        self.request(|r| StoreCommand::GetCase(id, r))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)))
    }

    pub async fn add_case(&self, req: NewCase) -> Result<Case, AppError> {
        self.request(|r| StoreCommand::AddCase(req, r)).await?
    }

    pub async fn update_case(&self, id: Uuid, update: CaseUpdate) -> Result<Case, AppError> {
        self.request(|r| StoreCommand::UpdateCase(id, update, r)).await?
    }

    /// Returns whether a case was removed.
    pub async fn delete_case(&self, id: Uuid) -> Result<bool, AppError> {
        self.request(|r| StoreCommand::DeleteCase(id, r)).await
    }

    pub async fn select_case(&self, id: Option<Uuid>) -> Result<(), AppError> {
        self.request(|r| StoreCommand::SelectCase(id, r)).await
    }

    /// Select a case that must exist and return it; `None` clears.
    /// The existence check and the selection happen in one command.
    pub async fn select_existing_case(&self, id: Option<Uuid>) -> Result<Option<Case>, AppError> {
        self.request(|r| StoreCommand::SelectExistingCase(id, r)).await?
    }

    /// The case in context; `None` for no selection or a stale one.
    pub async fn selected_case(&self) -> Result<Option<Case>, AppError> {
        self.request(StoreCommand::SelectedCase).await
    }

    pub async fn case_summary(&self, id: Uuid) -> Result<CaseSummary, AppError> {
        self.request(|r| StoreCommand::CaseSummary(id, r)).await?
    }

    // ── Case children ───────────────────────────────────────────────

    pub async fn add_party(&self, case_id: Uuid, req: NewParty) -> Result<Party, AppError> {
        self.request(|r| StoreCommand::AddParty(case_id, req, r)).await?
    }

    pub async fn remove_party(&self, case_id: Uuid, party_id: Uuid) -> Result<(), AppError> {
        self.request(|r| StoreCommand::RemoveParty(case_id, party_id, r)).await?
    }

    pub async fn add_hearing(&self, case_id: Uuid, req: NewHearing) -> Result<Hearing, AppError> {
        self.request(|r| StoreCommand::AddHearing(case_id, req, r)).await?
    }

    pub async fn remove_hearing(&self, case_id: Uuid, hearing_id: Uuid) -> Result<(), AppError> {
        self.request(|r| StoreCommand::RemoveHearing(case_id, hearing_id, r)).await?
    }

    pub async fn add_document(&self, case_id: Uuid, req: NewDocument) -> Result<Document, AppError> {
        self.request(|r| StoreCommand::AddDocument(case_id, req, r)).await?
    }

    pub async fn remove_document(&self, case_id: Uuid, document_id: Uuid) -> Result<(), AppError> {
        self.request(|r| StoreCommand::RemoveDocument(case_id, document_id, r)).await?
    }

    pub async fn set_document_status(
        &self,
        case_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
    ) -> Result<Document, AppError> {
        self.request(|r| StoreCommand::SetDocumentStatus(case_id, document_id, status, r))
            .await?
    }

    pub async fn add_email_monitor(
        &self,
        case_id: Uuid,
        req: NewEmailMonitor,
    ) -> Result<EmailMonitorConfig, AppError> {
        self.request(|r| StoreCommand::AddEmailMonitor(case_id, req, r)).await?
    }

    pub async fn remove_email_monitor(&self, case_id: Uuid, monitor_id: Uuid) -> Result<(), AppError> {
        self.request(|r| StoreCommand::RemoveEmailMonitor(case_id, monitor_id, r)).await?
    }

    // ── Timeline ────────────────────────────────────────────────────

    /// The raw collection, in insertion order.
    pub async fn timeline_events(&self) -> Result<Vec<TimelineEvent>, AppError> {
        self.request(StoreCommand::TimelineEvents).await
    }

    pub async fn timeline(&self, query: TimelineQuery) -> Result<Vec<TimelineEvent>, AppError> {
        self.request(|r| StoreCommand::Timeline(query, r)).await
    }

    pub async fn timeline_by_year(
        &self,
        query: TimelineQuery,
    ) -> Result<Vec<TimelineYearGroup>, AppError> {
        self.request(|r| StoreCommand::TimelineByYear(query, r)).await
    }

    pub async fn calendar_month(
        &self,
        query: TimelineQuery,
        year: i32,
        month: u32,
    ) -> Result<CalendarMonth, AppError> {
        self.request(|r| StoreCommand::CalendarMonth(query, year, month, r)).await?
    }

    pub async fn add_timeline_event(&self, req: NewTimelineEvent) -> Result<TimelineEvent, AppError> {
        self.request(|r| StoreCommand::AddTimelineEvent(req, r)).await?
    }

    /// Append a batch atomically.
    pub async fn add_timeline_events(
        &self,
        reqs: Vec<NewTimelineEvent>,
    ) -> Result<Vec<TimelineEvent>, AppError> {
        self.request(|r| StoreCommand::AddTimelineEvents(reqs, r)).await?
    }

    pub async fn set_timeline_events(&self, events: Vec<TimelineEvent>) -> Result<(), AppError> {
        self.request(|r| StoreCommand::SetTimelineEvents(events, r)).await?
    }

    pub async fn update_timeline_event(
        &self,
        id: Uuid,
        update: TimelineEventUpdate,
    ) -> Result<TimelineEvent, AppError> {
        self.request(|r| StoreCommand::UpdateTimelineEvent(id, update, r)).await?
    }

    pub async fn delete_timeline_event(&self, id: Uuid) -> Result<bool, AppError> {
        self.request(|r| StoreCommand::DeleteTimelineEvent(id, r)).await
    }

    // ── Settings ────────────────────────────────────────────────────

    pub async fn llm_config(&self) -> Result<LlmConfig, AppError> {
        self.request(StoreCommand::LlmConfig).await
    }

    pub async fn set_llm_config(&self, config: LlmConfig) -> Result<(), AppError> {
        self.request(|r| StoreCommand::SetLlmConfig(config, r)).await
    }

    pub async fn google_credentials(&self) -> Result<Option<GoogleCredentials>, AppError> {
        self.request(StoreCommand::GoogleCredentials).await
    }

    pub async fn set_google_credentials(
        &self,
        credentials: Option<GoogleCredentials>,
    ) -> Result<(), AppError> {
        self.request(|r| StoreCommand::SetGoogleCredentials(credentials, r)).await?
    }
}

/// Controller loop. Exits when every handle has been dropped.
async fn run(
    mut store: EntityStore,
    mut rx: mpsc::Receiver<StoreCommand>,
    events: broadcast::Sender<StoreEvent>,
) {
    tracing::debug!("Store controller started");
    while let Some(command) = rx.recv().await {
        if let Some(event) = apply(&mut store, command) {
            // No subscribers is fine.
            let _ = events.send(event);
        }
    }
    tracing::debug!("Store controller stopped");
}

/// Answer a reply channel, ignoring callers that stopped waiting.
fn reply<T>(tx: Reply<T>, value: T) {
    let _ = tx.send(value);
}

/// Answer `tx` with `result` and produce `event` only on success.
fn reply_result<T>(
    tx: Reply<Result<T, AppError>>,
    result: Result<T, AppError>,
    event: impl FnOnce(&T) -> StoreEvent,
) -> Option<StoreEvent> {
    let emitted = result.as_ref().ok().map(event);
    reply(tx, result);
    emitted
}

/// Derived views only show events whose case still exists.
fn derived_timeline(store: &EntityStore, query: &TimelineQuery) -> Vec<TimelineEvent> {
    timeline::derive_existing(store.timeline_events(), store.cases(), query)
}

fn apply(store: &mut EntityStore, command: StoreCommand) -> Option<StoreEvent> {
    match command {
        StoreCommand::ListCases(tx) => {
            reply(tx, store.cases().to_vec());
            None
        }
        StoreCommand::GetCase(id, tx) => {
            reply(tx, store.case(id).cloned());
            None
        }
        StoreCommand::AddCase(req, tx) => {
            reply_result(tx, store.add_case(req), |c| StoreEvent::CaseAdded(c.id))
        }
        StoreCommand::UpdateCase(id, update, tx) => {
            reply_result(tx, store.update_case(id, update), |c| StoreEvent::CaseUpdated(c.id))
        }
        StoreCommand::DeleteCase(id, tx) => {
            let removed = store.delete_case(id);
            reply(tx, removed);
            removed.then_some(StoreEvent::CaseDeleted(id))
        }
        StoreCommand::SelectCase(id, tx) => {
            store.select_case(id);
            reply(tx, ());
            Some(StoreEvent::SelectionChanged(id))
        }
        StoreCommand::SelectExistingCase(id, tx) => reply_result(
            tx,
            store.select_existing_case(id),
            |_| StoreEvent::SelectionChanged(id),
        ),
        StoreCommand::SelectedCase(tx) => {
            reply(tx, store.selected_case().cloned());
            None
        }
        StoreCommand::CaseSummary(id, tx) => {
            let summary = store
                .case(id)
                .map(|c| aggregate::summarize(c, Utc::now()))
                .ok_or_else(|| AppError::not_found(format!("Case {} not found", id)));
            reply(tx, summary);
            None
        }
        StoreCommand::AddParty(case_id, req, tx) => {
            reply_result(tx, store.add_party(case_id, req), |_| StoreEvent::CaseUpdated(case_id))
        }
        StoreCommand::RemoveParty(case_id, party_id, tx) => reply_result(
            tx,
            store.remove_party(case_id, party_id),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::AddHearing(case_id, req, tx) => {
            reply_result(tx, store.add_hearing(case_id, req), |_| StoreEvent::CaseUpdated(case_id))
        }
        StoreCommand::RemoveHearing(case_id, hearing_id, tx) => reply_result(
            tx,
            store.remove_hearing(case_id, hearing_id),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::AddDocument(case_id, req, tx) => reply_result(
            tx,
            store.add_document(case_id, req),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::RemoveDocument(case_id, document_id, tx) => reply_result(
            tx,
            store.remove_document(case_id, document_id),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::SetDocumentStatus(case_id, document_id, status, tx) => reply_result(
            tx,
            store.set_document_status(case_id, document_id, status),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::AddEmailMonitor(case_id, req, tx) => reply_result(
            tx,
            store.add_email_monitor(case_id, req),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::RemoveEmailMonitor(case_id, monitor_id, tx) => reply_result(
            tx,
            store.remove_email_monitor(case_id, monitor_id),
            |_| StoreEvent::CaseUpdated(case_id),
        ),
        StoreCommand::TimelineEvents(tx) => {
            reply(tx, store.timeline_events().to_vec());
            None
        }
        StoreCommand::Timeline(query, tx) => {
            reply(tx, derived_timeline(store, &query));
            None
        }
        StoreCommand::TimelineByYear(query, tx) => {
            reply(tx, timeline::group_by_year(derived_timeline(store, &query)));
            None
        }
        StoreCommand::CalendarMonth(query, year, month, tx) => {
            let derived = derived_timeline(store, &query);
            reply(tx, timeline::calendar_month(&derived, year, month));
            None
        }
        StoreCommand::AddTimelineEvent(req, tx) => {
            reply_result(tx, store.add_timeline_event(req), |_| StoreEvent::TimelineChanged)
        }
        StoreCommand::AddTimelineEvents(reqs, tx) => {
            let result = store.add_timeline_events(reqs);
            let changed = matches!(&result, Ok(created) if !created.is_empty());
            reply(tx, result);
            changed.then_some(StoreEvent::TimelineChanged)
        }
        StoreCommand::SetTimelineEvents(events, tx) => {
            reply_result(tx, store.set_timeline_events(events), |_| StoreEvent::TimelineChanged)
        }
        StoreCommand::UpdateTimelineEvent(id, update, tx) => reply_result(
            tx,
            store.update_timeline_event(id, update),
            |_| StoreEvent::TimelineChanged,
        ),
        StoreCommand::DeleteTimelineEvent(id, tx) => {
            let removed = store.delete_timeline_event(id);
            reply(tx, removed);
            removed.then_some(StoreEvent::TimelineChanged)
        }
        StoreCommand::LlmConfig(tx) => {
            reply(tx, store.llm_config().clone());
            None
        }
        StoreCommand::SetLlmConfig(config, tx) => {
            store.set_llm_config(config);
            reply(tx, ());
            Some(StoreEvent::SettingsChanged)
        }
        StoreCommand::GoogleCredentials(tx) => {
            reply(tx, store.google_credentials().cloned());
            None
        }
        StoreCommand::SetGoogleCredentials(credentials, tx) => reply_result(
            tx,
            store.set_google_credentials(credentials),
            |_| StoreEvent::SettingsChanged,
        ),
    }
}
