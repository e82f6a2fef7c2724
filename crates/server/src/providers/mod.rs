//! Capability interfaces for the external collaborators (LLM analysis,
//! document generation, mail) and the mock implementations the app ships with.

mod mock;

pub use mock::MockProviders;

use std::collections::BTreeMap;

use shared_types::{AppError, DocumentAnalysis, DocumentPayload, DocumentTemplate, EmailMessage, LlmConfig};

/// Produces a structured analysis of an uploaded document.
#[allow(async_fn_in_trait)]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, payload: DocumentPayload) -> Result<DocumentAnalysis, AppError>;
}

/// Fills a template with field values and returns the document text.
#[allow(async_fn_in_trait)]
pub trait DocumentGenerationProvider: Send + Sync {
    async fn generate(
        &self,
        template: &DocumentTemplate,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, AppError>;
}

/// Supplies inbox message summaries.
#[allow(async_fn_in_trait)]
pub trait MailProvider: Send + Sync {
    async fn list_messages(&self) -> Result<Vec<EmailMessage>, AppError>;
}

/// "Test connection" for the LLM settings form.
#[allow(async_fn_in_trait)]
pub trait ConnectivityCheck: Send + Sync {
    async fn test_connection(&self, config: &LlmConfig) -> Result<(), AppError>;
}
