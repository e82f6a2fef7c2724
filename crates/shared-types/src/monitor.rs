use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// A passive inbox filter scoped to one case.
///
/// A monitor never subscribes to anything; it is a predicate the inbox view
/// evaluates against each message's sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailMonitorConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    pub enabled: bool,
}

impl EmailMonitorConfig {
    /// Whether a message from `sender` falls under this monitor.
    ///
    /// `sender` may be a bare address or the `Display Name <addr>` form.
    /// A monitor with neither filter set matches nothing.
    pub fn matches(&self, sender: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let address = bare_address(sender);

        let email_hit = self
            .from_email
            .as_deref()
            .map(|e| e.trim().eq_ignore_ascii_case(&address))
            .unwrap_or(false);

        let domain_hit = match (self.from_domain.as_deref(), address.rsplit_once('@')) {
            (Some(domain), Some((_, sender_domain))) => {
                let domain = domain.trim().trim_start_matches('@');
                !domain.is_empty() && domain.eq_ignore_ascii_case(sender_domain)
            }
            _ => false,
        };

        email_hit || domain_hit
    }
}

/// Extract the address part of `Name <user@host>`, lowercased.
pub fn bare_address(sender: &str) -> String {
    let trimmed = sender.trim();
    let inner = match (trimmed.rfind('<'), trimmed.rfind('>')) {
        (Some(start), Some(end)) if end > start => &trimmed[start + 1..end],
        _ => trimmed,
    };
    inner.trim().to_ascii_lowercase()
}

/// Request to add an email monitor to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewEmailMonitor {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Monitor name is required"))
    )]
    pub name: String,
    #[serde(default)]
    pub from_domain: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Sender filter must be a valid email address"))
    )]
    pub from_email: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl NewEmailMonitor {
    pub fn into_monitor(self) -> EmailMonitorConfig {
        EmailMonitorConfig {
            id: Uuid::new_v4(),
            name: self.name,
            from_domain: self.from_domain,
            from_email: self.from_email,
            enabled: self.enabled,
        }
    }
}
