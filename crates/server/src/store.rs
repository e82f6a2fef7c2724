//! In-memory entity store: the single source of truth for cases, the
//! timeline and process-wide settings.
//!
//! Every operation is synchronous. Callers that need shared access go
//! through [`crate::controller::StoreHandle`], which owns one store and
//! serializes all writes.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use shared_types::{
    AppError, Case, CaseUpdate, Document, DocumentStatus, EmailMonitorConfig, GoogleCredentials,
    Hearing, LlmConfig, NewCase, NewDocument, NewEmailMonitor, NewHearing, NewParty,
    NewTimelineEvent, Party, TimelineEvent, TimelineEventUpdate,
};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::error_convert::{reject_blank, ValidateRequest};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    cases: Vec<Case>,
    events: Vec<TimelineEvent>,
    selected_case: Option<Uuid>,
    llm_config: LlmConfig,
    google_credentials: Option<GoogleCredentials>,
}

/// Current time, never earlier than `previous`.
fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

fn case_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Case {} not found", id))
}

fn require_text(errors: &mut HashMap<String, String>, field: String, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Ids in a supplied collection must be non-nil and unique.
fn check_ids(
    errors: &mut HashMap<String, String>,
    collection: &str,
    ids: impl IntoIterator<Item = Uuid>,
) {
    let mut seen = HashSet::new();
    for (i, id) in ids.into_iter().enumerate() {
        if id.is_nil() {
            errors.insert(format!("{collection}[{i}].id"), "Id is required".to_string());
        } else if !seen.insert(id) {
            errors.insert(format!("{collection}[{i}].id"), format!("Duplicate id {id}"));
        }
    }
}

fn check_contact_emails(errors: &mut HashMap<String, String>, field: &str, emails: &[String]) {
    for (i, email) in emails.iter().enumerate() {
        if !email.validate_email() {
            errors.insert(
                format!("{field}[{i}]"),
                "Contact email must be a valid email address".to_string(),
            );
        }
    }
}

fn into_result(errors: HashMap<String, String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Validation failed", errors))
    }
}

/// Field errors for the scalar and collection fields an update supplies.
fn case_update_errors(update: &CaseUpdate) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    if let Some(name) = update.name.as_deref() {
        require_text(&mut errors, "name".into(), name, "Case name is required");
    }
    if let Some(number) = update.number.as_deref() {
        require_text(&mut errors, "number".into(), number, "Case number is required");
    }
    if let Some(court) = update.court.as_deref() {
        require_text(&mut errors, "court".into(), court, "Court is required");
    }

    if let Some(parties) = &update.parties {
        check_ids(&mut errors, "parties", parties.iter().map(|p| p.id));
        for (i, party) in parties.iter().enumerate() {
            require_text(&mut errors, format!("parties[{i}].name"), &party.name, "Party name is required");
            check_contact_emails(
                &mut errors,
                &format!("parties[{i}].contact_emails"),
                &party.contact_emails,
            );
        }
    }
    if let Some(hearings) = &update.hearings {
        check_ids(&mut errors, "hearings", hearings.iter().map(|h| h.id));
        for (i, hearing) in hearings.iter().enumerate() {
            require_text(
                &mut errors,
                format!("hearings[{i}].hearing_type"),
                &hearing.hearing_type,
                "Hearing type is required",
            );
        }
    }
    if let Some(documents) = &update.documents {
        check_ids(&mut errors, "documents", documents.iter().map(|d| d.id));
        for (i, document) in documents.iter().enumerate() {
            require_text(&mut errors, format!("documents[{i}].name"), &document.name, "Document name is required");
        }
    }
    if let Some(monitors) = &update.email_monitors {
        check_ids(&mut errors, "email_monitors", monitors.iter().map(|m| m.id));
        for (i, monitor) in monitors.iter().enumerate() {
            require_text(&mut errors, format!("email_monitors[{i}].name"), &monitor.name, "Monitor name is required");
            if let Some(email) = &monitor.from_email {
                if !email.validate_email() {
                    errors.insert(
                        format!("email_monitors[{i}].from_email"),
                        "Sender filter must be a valid email address".to_string(),
                    );
                }
            }
        }
    }
    errors
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm_config(mut self, config: LlmConfig) -> Self {
        self.llm_config = config;
        self
    }

    // ── Cases ───────────────────────────────────────────────────────

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn case(&self, id: Uuid) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    fn case_mut(&mut self, id: Uuid) -> Result<&mut Case, AppError> {
        self.cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| case_not_found(id))
    }

    /// Open a new case. Names and numbers are not required to be unique.
    pub fn add_case(&mut self, req: NewCase) -> Result<Case, AppError> {
        req.validate_request()?;
        reject_blank(&[
            ("name", req.name.as_str(), "Case name is required"),
            ("number", req.number.as_str(), "Case number is required"),
            ("court", req.court.as_str(), "Court is required"),
        ])?;
        let mut errors = HashMap::new();
        for (i, party) in req.parties.iter().enumerate() {
            check_contact_emails(
                &mut errors,
                &format!("parties[{i}].contact_emails"),
                &party.contact_emails,
            );
        }
        into_result(errors)?;

        let case = req.into_case(Utc::now());
        tracing::info!(case_id = %case.id, number = %case.number, "Case added");
        self.cases.push(case.clone());
        Ok(case)
    }

    /// Merge `update` into the case and advance its `updated_at`.
    ///
    /// Supplied collections replace the existing ones and are checked like
    /// the matching add operations, plus non-nil unique ids.
    pub fn update_case(&mut self, id: Uuid, update: CaseUpdate) -> Result<Case, AppError> {
        update.validate_request()?;
        into_result(case_update_errors(&update))?;

        let case = match self.case_mut(id) {
            Ok(case) => case,
            Err(e) => {
                tracing::warn!(case_id = %id, "Update for unknown case");
                return Err(e);
            }
        };
        update.apply_to(case);
        case.updated_at = touch(case.updated_at);
        tracing::info!(case_id = %id, "Case updated");
        Ok(case.clone())
    }

    /// Remove a case and every timeline event that references it.
    ///
    /// Returns `false` when nothing was removed; deleting twice is not an error.
    pub fn delete_case(&mut self, id: Uuid) -> bool {
        let before = self.cases.len();
        self.cases.retain(|c| c.id != id);
        if self.cases.len() == before {
            tracing::debug!(case_id = %id, "Delete for unknown case ignored");
            return false;
        }

        let events_before = self.events.len();
        self.events.retain(|e| e.case_id != id);
        tracing::info!(
            case_id = %id,
            events_removed = events_before - self.events.len(),
            "Case deleted"
        );
        true
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Set the case in context. The id is stored even if no such case exists.
    pub fn select_case(&mut self, id: Option<Uuid>) {
        self.selected_case = id;
    }

    /// Select a case that must exist, or clear with `None`.
    /// An unknown id is `NotFound` and leaves the selection unchanged.
    pub fn select_existing_case(&mut self, id: Option<Uuid>) -> Result<Option<Case>, AppError> {
        let case = match id {
            Some(id) => Some(self.case(id).cloned().ok_or_else(|| case_not_found(id))?),
            None => None,
        };
        self.selected_case = id;
        Ok(case)
    }

    pub fn selected_case_id(&self) -> Option<Uuid> {
        self.selected_case
    }

    /// The selected case, or `None` when nothing is selected or the selection is stale.
    pub fn selected_case(&self) -> Option<&Case> {
        self.selected_case.and_then(|id| self.case(id))
    }

    // ── Case children ───────────────────────────────────────────────

    pub fn add_party(&mut self, case_id: Uuid, req: NewParty) -> Result<Party, AppError> {
        req.validate_request()?;
        reject_blank(&[("name", req.name.as_str(), "Party name is required")])?;
        let mut errors = HashMap::new();
        check_contact_emails(&mut errors, "contact_emails", &req.contact_emails);
        into_result(errors)?;

        let case = self.case_mut(case_id)?;
        let party = req.into_party();
        case.parties.push(party.clone());
        case.updated_at = touch(case.updated_at);
        tracing::info!(case_id = %case_id, party_id = %party.id, "Party added");
        Ok(party)
    }

    pub fn remove_party(&mut self, case_id: Uuid, party_id: Uuid) -> Result<(), AppError> {
        let case = self.case_mut(case_id)?;
        let before = case.parties.len();
        case.parties.retain(|p| p.id != party_id);
        if case.parties.len() == before {
            return Err(AppError::not_found(format!("Party {} not found", party_id)));
        }
        case.updated_at = touch(case.updated_at);
        Ok(())
    }

    pub fn add_hearing(&mut self, case_id: Uuid, req: NewHearing) -> Result<Hearing, AppError> {
        req.validate_request()?;
        reject_blank(&[("hearing_type", req.hearing_type.as_str(), "Hearing type is required")])?;

        let case = self.case_mut(case_id)?;
        let hearing = req.into_hearing();
        case.hearings.push(hearing.clone());
        case.updated_at = touch(case.updated_at);
        tracing::info!(case_id = %case_id, hearing_id = %hearing.id, date = %hearing.date, "Hearing scheduled");
        Ok(hearing)
    }

    pub fn remove_hearing(&mut self, case_id: Uuid, hearing_id: Uuid) -> Result<(), AppError> {
        let case = self.case_mut(case_id)?;
        let before = case.hearings.len();
        case.hearings.retain(|h| h.id != hearing_id);
        if case.hearings.len() == before {
            return Err(AppError::not_found(format!("Hearing {} not found", hearing_id)));
        }
        case.updated_at = touch(case.updated_at);
        Ok(())
    }

    pub fn add_document(&mut self, case_id: Uuid, req: NewDocument) -> Result<Document, AppError> {
        req.validate_request()?;
        reject_blank(&[("name", req.name.as_str(), "Document name is required")])?;

        let case = self.case_mut(case_id)?;
        let now = touch(case.updated_at);
        let document = req.into_document(now);
        case.documents.push(document.clone());
        case.updated_at = now;
        tracing::info!(case_id = %case_id, document_id = %document.id, "Document added");
        Ok(document)
    }

    pub fn remove_document(&mut self, case_id: Uuid, document_id: Uuid) -> Result<(), AppError> {
        let case = self.case_mut(case_id)?;
        let before = case.documents.len();
        case.documents.retain(|d| d.id != document_id);
        if case.documents.len() == before {
            return Err(AppError::not_found(format!("Document {} not found", document_id)));
        }
        case.updated_at = touch(case.updated_at);
        Ok(())
    }

    pub fn set_document_status(
        &mut self,
        case_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
    ) -> Result<Document, AppError> {
        let case = self.case_mut(case_id)?;
        let now = touch(case.updated_at);
        let document = case
            .documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| AppError::not_found(format!("Document {} not found", document_id)))?;
        document.status = status;
        document.updated_at = now.max(document.updated_at);
        let document = document.clone();
        case.updated_at = now;
        tracing::info!(case_id = %case_id, document_id = %document_id, status = status.as_str(), "Document status changed");
        Ok(document)
    }

    pub fn add_email_monitor(
        &mut self,
        case_id: Uuid,
        req: NewEmailMonitor,
    ) -> Result<EmailMonitorConfig, AppError> {
        req.validate_request()?;
        reject_blank(&[("name", req.name.as_str(), "Monitor name is required")])?;

        let case = self.case_mut(case_id)?;
        let monitor = req.into_monitor();
        case.email_monitors.push(monitor.clone());
        case.updated_at = touch(case.updated_at);
        tracing::info!(case_id = %case_id, monitor_id = %monitor.id, "Email monitor added");
        Ok(monitor)
    }

    pub fn remove_email_monitor(&mut self, case_id: Uuid, monitor_id: Uuid) -> Result<(), AppError> {
        let case = self.case_mut(case_id)?;
        let before = case.email_monitors.len();
        case.email_monitors.retain(|m| m.id != monitor_id);
        if case.email_monitors.len() == before {
            return Err(AppError::not_found(format!("Email monitor {} not found", monitor_id)));
        }
        case.updated_at = touch(case.updated_at);
        Ok(())
    }

    // ── Timeline ────────────────────────────────────────────────────

    pub fn timeline_events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Append an event. The referenced case must exist.
    pub fn add_timeline_event(&mut self, req: NewTimelineEvent) -> Result<TimelineEvent, AppError> {
        req.validate_request()?;
        reject_blank(&[("title", req.title.as_str(), "Event title is required")])?;
        if self.case(req.case_id).is_none() {
            return Err(AppError::invalid_field(
                "case_id",
                format!("Case {} does not exist", req.case_id),
            ));
        }

        let event = req.into_event();
        tracing::info!(event_id = %event.id, case_id = %event.case_id, "Timeline event added");
        self.events.push(event.clone());
        Ok(event)
    }

    /// Append every event or none of them. Each must pass the
    /// [`add_timeline_event`](Self::add_timeline_event) checks.
    pub fn add_timeline_events(
        &mut self,
        reqs: Vec<NewTimelineEvent>,
    ) -> Result<Vec<TimelineEvent>, AppError> {
        let mut errors = HashMap::new();
        for (i, req) in reqs.iter().enumerate() {
            if let Err(e) = req.validate_request() {
                for (field, message) in e.field_errors {
                    errors.insert(format!("events[{i}].{field}"), message);
                }
            }
            require_text(&mut errors, format!("events[{i}].title"), &req.title, "Event title is required");
            if self.case(req.case_id).is_none() {
                errors.insert(
                    format!("events[{i}].case_id"),
                    format!("Case {} does not exist", req.case_id),
                );
            }
        }
        into_result(errors)?;

        let created: Vec<TimelineEvent> = reqs.into_iter().map(NewTimelineEvent::into_event).collect();
        self.events.extend(created.iter().cloned());
        tracing::info!(count = created.len(), "Timeline events added");
        Ok(created)
    }

    /// Replace the whole collection (bulk edit and bulk delete flows).
    ///
    /// Titles must be non-blank, ids non-nil and unique, and every event must
    /// reference an existing case. On error the collection is unchanged.
    pub fn set_timeline_events(&mut self, events: Vec<TimelineEvent>) -> Result<(), AppError> {
        let mut errors = HashMap::new();
        check_ids(&mut errors, "events", events.iter().map(|e| e.id));
        for (i, event) in events.iter().enumerate() {
            require_text(&mut errors, format!("events[{i}].title"), &event.title, "Event title is required");
            if self.case(event.case_id).is_none() {
                errors.insert(
                    format!("events[{i}].case_id"),
                    format!("Case {} does not exist", event.case_id),
                );
            }
        }
        into_result(errors)?;

        tracing::info!(count = events.len(), "Timeline replaced");
        self.events = events;
        Ok(())
    }

    pub fn update_timeline_event(
        &mut self,
        id: Uuid,
        update: TimelineEventUpdate,
    ) -> Result<TimelineEvent, AppError> {
        update.validate_request()?;
        if let Some(title) = update.title.as_deref() {
            reject_blank(&[("title", title, "Event title is required")])?;
        }

        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("Timeline event {} not found", id)))?;
        update.apply_to(event);
        Ok(event.clone())
    }

    pub fn delete_timeline_event(&mut self, id: Uuid) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    // ── Settings ────────────────────────────────────────────────────

    pub fn llm_config(&self) -> &LlmConfig {
        &self.llm_config
    }

    pub fn set_llm_config(&mut self, config: LlmConfig) {
        tracing::info!(provider = config.provider.as_str(), model = config.effective_model(), "LLM config replaced");
        self.llm_config = config;
    }

    pub fn google_credentials(&self) -> Option<&GoogleCredentials> {
        self.google_credentials.as_ref()
    }

    /// Replace the credentials; `None` disconnects.
    pub fn set_google_credentials(
        &mut self,
        credentials: Option<GoogleCredentials>,
    ) -> Result<(), AppError> {
        if let Some(c) = &credentials {
            reject_blank(&[
                ("client_id", c.client_id.as_str(), "Client ID is required"),
                ("client_secret", c.client_secret.as_str(), "Client secret is required"),
            ])?;
        }
        tracing::info!(configured = credentials.is_some(), "Google credentials replaced");
        self.google_credentials = credentials;
        Ok(())
    }
}
