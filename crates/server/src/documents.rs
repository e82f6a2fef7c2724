//! Document generation and analysis services on top of the provider traits.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use shared_types::{
    find_template, AppError, DocumentAnalysis, DocumentPayload, GeneratedDocument,
    NewTimelineEvent, TimelineEvent, TimelineEventType,
};
use uuid::Uuid;

use crate::controller::StoreHandle;
use crate::providers::{AnalysisProvider, DocumentGenerationProvider};

pub const ANALYSIS_SOURCE: &str = "Document analysis";

/// Fill the named template. Every required field must be present and non-blank.
pub async fn generate_document<P: DocumentGenerationProvider>(
    provider: &P,
    template_id: &str,
    fields: &BTreeMap<String, String>,
) -> Result<GeneratedDocument, AppError> {
    let template = find_template(template_id)
        .ok_or_else(|| AppError::not_found(format!("Template '{template_id}' not found")))?;

    let missing: HashMap<String, String> = template
        .fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| fields.get(&f.id).map_or(true, |v| v.trim().is_empty()))
        .map(|f| (f.id.clone(), format!("{} is required", f.label)))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::validation("Missing required fields", missing));
    }

    let content = provider.generate(&template, fields).await?;
    tracing::info!(template = %template.id, chars = content.len(), "Document generated");
    Ok(GeneratedDocument {
        template_id: template.id,
        content,
    })
}

/// Analyze an uploaded document. Empty uploads are rejected before the provider is called.
pub async fn analyze_document<P: AnalysisProvider>(
    provider: &P,
    payload: DocumentPayload,
) -> Result<DocumentAnalysis, AppError> {
    if payload.bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded document is empty"));
    }
    provider.analyze(payload).await
}

/// Timeline requests for the usable entries of an analysis.
///
/// Entries whose date is not `YYYY-MM-DD` or whose description is blank are skipped.
pub fn analysis_timeline_requests(case_id: Uuid, analysis: &DocumentAnalysis) -> Vec<NewTimelineEvent> {
    analysis
        .timeline
        .iter()
        .filter_map(|entry| {
            let Ok(date) = NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d") else {
                tracing::debug!(date = %entry.date, "Skipping undated analysis entry");
                return None;
            };
            let title = entry.description.trim();
            if title.is_empty() {
                tracing::debug!(%date, "Skipping analysis entry without a description");
                return None;
            }
            let mut req = NewTimelineEvent::new(title, date, TimelineEventType::Event, case_id);
            req.source = Some(ANALYSIS_SOURCE.to_string());
            Some(req)
        })
        .collect()
}

/// Copy the usable entries of an analysis onto a case timeline in one write.
/// Either every entry is added or none is.
pub async fn import_analysis_timeline(
    store: &StoreHandle,
    case_id: Uuid,
    analysis: &DocumentAnalysis,
) -> Result<Vec<TimelineEvent>, AppError> {
    // An empty batch would otherwise succeed for a missing case.
    store.get_case(case_id).await.map_err(|_| {
        AppError::invalid_field("case_id", format!("Case {} does not exist", case_id))
    })?;
    let created = store
        .add_timeline_events(analysis_timeline_requests(case_id, analysis))
        .await?;
    tracing::info!(%case_id, imported = created.len(), "Analysis timeline imported");
    Ok(created)
}
