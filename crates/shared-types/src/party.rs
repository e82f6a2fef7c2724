use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Which side of a matter a party sits on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
    ThirdParty,
}

impl PartyRole {
    pub const ALL: [PartyRole; 3] = [Self::Plaintiff, Self::Defendant, Self::ThirdParty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaintiff => "plaintiff",
            Self::Defendant => "defendant",
            Self::ThirdParty => "third_party",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "plaintiff" => Some(Self::Plaintiff),
            "defendant" => Some(Self::Defendant),
            "third_party" => Some(Self::ThirdParty),
            _ => None,
        }
    }

    /// Human-readable label for list rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plaintiff => "Plaintiff",
            Self::Defendant => "Defendant",
            Self::ThirdParty => "Third Party",
        }
    }
}

/// A party to a case. Owned by exactly one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Party {
    pub id: Uuid,
    pub name: String,
    pub role: PartyRole,
    #[serde(default)]
    pub representatives: Vec<String>,
    #[serde(default)]
    pub contact_emails: Vec<String>,
}

/// Request to add a party to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewParty {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Party name is required"))
    )]
    pub name: String,
    pub role: PartyRole,
    #[serde(default)]
    pub representatives: Vec<String>,
    #[serde(default)]
    pub contact_emails: Vec<String>,
}

impl NewParty {
    pub fn into_party(self) -> Party {
        Party {
            id: Uuid::new_v4(),
            name: self.name,
            role: self.role,
            representatives: self.representatives,
            contact_emails: self.contact_emails,
        }
    }
}
