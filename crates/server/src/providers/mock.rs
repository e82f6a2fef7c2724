use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use shared_types::{
    AnalysisTimelineEntry, AppError, Argument, Claim, ClaimType, DocumentAnalysis,
    DocumentPayload, DocumentTemplate, EmailMessage, LlmConfig, ProviderConfig, Severity,
    Strength, Weakness,
};

use super::{AnalysisProvider, ConnectivityCheck, DocumentGenerationProvider, MailProvider};

/// Simulated collaborators: every call sleeps for a fixed latency and
/// returns a canned payload.
#[derive(Debug, Clone, Default)]
pub struct MockProviders {
    latency: Duration,
}

impl MockProviders {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// No latency; for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(Duration::from_millis(config.latency_ms))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl AnalysisProvider for MockProviders {
    #[tracing::instrument(skip(self, payload), fields(file = %payload.file_name, bytes = payload.bytes.len()))]
    async fn analyze(&self, payload: DocumentPayload) -> Result<DocumentAnalysis, AppError> {
        self.simulate_latency().await;
        tracing::info!(media_type = payload.media_type.mime(), "Mock analysis complete");
        Ok(canned_analysis())
    }
}

impl DocumentGenerationProvider for MockProviders {
    #[tracing::instrument(skip(self, template, fields), fields(template = %template.id))]
    async fn generate(
        &self,
        template: &DocumentTemplate,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, AppError> {
        self.simulate_latency().await;

        let mut out = format!("{}\n\n", template.name.to_uppercase());
        for field in &template.fields {
            if let Some(value) = fields.get(&field.id).filter(|v| !v.trim().is_empty()) {
                out.push_str(&format!("{}:\n{}\n\n", field.label, value.trim()));
            }
        }
        out.push_str("Dated this day. Signed on behalf of the party named above.\n");
        Ok(out)
    }
}

impl MailProvider for MockProviders {
    async fn list_messages(&self) -> Result<Vec<EmailMessage>, AppError> {
        self.simulate_latency().await;
        Ok(canned_messages())
    }
}

impl ConnectivityCheck for MockProviders {
    #[tracing::instrument(skip(self, config), fields(provider = config.provider.as_str()))]
    async fn test_connection(&self, config: &LlmConfig) -> Result<(), AppError> {
        self.simulate_latency().await;
        if config.provider.requires_api_key() && !config.has_api_key() {
            return Err(AppError::invalid_field(
                "api_key",
                format!("An API key is required for {}", config.provider.as_str()),
            ));
        }
        if !(0.0..=2.0).contains(&config.temperature) {
            return Err(AppError::invalid_field(
                "temperature",
                "Temperature must be between 0 and 2",
            ));
        }
        Ok(())
    }
}

fn canned_analysis() -> DocumentAnalysis {
    DocumentAnalysis {
        summary: "The plaintiff alleges that the defendant misappropriated client funds held \
                  on trust and seeks an injunction restraining further dealings with the assets."
            .to_string(),
        claims: vec![
            Claim {
                text: "Funds were transferred out of the client account without authorisation"
                    .to_string(),
                date: Some("2023-08-14".to_string()),
                paragraph: Some("12".to_string()),
                claim_type: ClaimType::Factual,
            },
            Claim {
                text: "The transfers amount to a breach of trust".to_string(),
                date: None,
                paragraph: Some("18".to_string()),
                claim_type: ClaimType::Legal,
            },
        ],
        timeline: vec![
            AnalysisTimelineEntry {
                date: "2023-08-14".to_string(),
                description: "Unauthorised transfer from client account".to_string(),
            },
            AnalysisTimelineEntry {
                date: "2023-09-02".to_string(),
                description: "Demand letter sent to the defendant".to_string(),
            },
            AnalysisTimelineEntry {
                date: "late 2023".to_string(),
                description: "Assets reportedly moved offshore".to_string(),
            },
        ],
        weaknesses: vec![
            Weakness {
                description: "No direct evidence of who authorised the transfers".to_string(),
                severity: Severity::High,
            },
            Weakness {
                description: "Delay between discovery and application".to_string(),
                severity: Severity::Medium,
            },
        ],
        arguments: vec![Argument {
            argument: "Balance of convenience favours freezing the assets".to_string(),
            strength: Strength::Strong,
            counter_argument: Some("The defendant's business will be unable to trade".to_string()),
        }],
    }
}

fn canned_messages() -> Vec<EmailMessage> {
    let at = |d: u32, h: u32| {
        Utc.with_ymd_and_hms(2023, 10, d, h, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    };
    vec![
        EmailMessage {
            id: "msg-1".to_string(),
            thread_id: "thr-1".to_string(),
            from: "Registry <registry@judiciary.hk>".to_string(),
            to: "counsel@lambchambers.hk".to_string(),
            subject: "HCA 1646/2023 - Sealed injunction order".to_string(),
            received_at: at(12, 16),
            preview: "Please find attached the sealed order made today".to_string(),
            is_read: false,
            has_attachments: true,
        },
        EmailMessage {
            id: "msg-2".to_string(),
            thread_id: "thr-2".to_string(),
            from: "J. Smith <jsmith@smithlaw.hk>".to_string(),
            to: "counsel@lambchambers.hk".to_string(),
            subject: "Lamb v. Liquidity - without prejudice".to_string(),
            received_at: at(10, 9),
            preview: "Our client is prepared to discuss a consent order".to_string(),
            is_read: true,
            has_attachments: false,
        },
        EmailMessage {
            id: "msg-3".to_string(),
            thread_id: "thr-3".to_string(),
            from: "newsletter@legaldaily.example".to_string(),
            to: "counsel@lambchambers.hk".to_string(),
            subject: "This week in commercial litigation".to_string(),
            received_at: at(11, 7),
            preview: "Court of Final Appeal clarifies test for Mareva relief".to_string(),
            is_read: false,
            has_attachments: false,
        },
    ]
}
