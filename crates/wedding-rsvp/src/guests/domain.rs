use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Connection options offered on a freshly provisioned RSVP form.
pub const DEFAULT_CONNECTION_OPTIONS: [&str; 4] = [
    "Friend of the Bride",
    "Friend of the Groom",
    "Family of the Bride",
    "Family of the Groom",
];

/// Tenant identifier, e.g. `wedding-1A2B3C4D`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeddingId(pub String);

impl fmt::Display for WeddingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a stored RSVP response. Storage may hand out integers; they are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResponseId(pub String);

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResponseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

/// A guest's stored answer to the RSVP form.
///
/// Field aliases accept the camelCase payloads the dashboard collaborator produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestResponse {
    pub id: ResponseId,
    #[serde(default, alias = "firstName", deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, alias = "lastName", deserialize_with = "null_as_empty")]
    pub last_name: String,
    pub attending: bool,
    #[serde(default, alias = "connectionType")]
    pub connection_type: Option<String>,
    #[serde(default, alias = "guestCount")]
    pub guest_count: Option<u32>,
    #[serde(
        default,
        alias = "submittedAt",
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl GuestResponse {
    /// Party size counted towards totals; a missing or zero count still represents one guest.
    pub fn effective_guest_count(&self) -> u32 {
        match self.guest_count {
            Some(count) if count > 0 => count,
            _ => 1,
        }
    }

    /// Connection label, ignoring empty strings.
    pub fn connection(&self) -> Option<&str> {
        self.connection_type
            .as_deref()
            .filter(|label| !label.is_empty())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Selects which rows a guest listing shows. Statistics and duplicate detection always run
/// over the full list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseFilter {
    #[default]
    All,
    Attending,
    NotAttending,
    /// Attending guests with exactly this connection label.
    Connection(String),
}

impl ResponseFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" => Self::All,
            "attending" => Self::Attending,
            "not-attending" | "not_attending" => Self::NotAttending,
            _ => Self::Connection(trimmed.to_string()),
        }
    }

    pub fn matches(&self, response: &GuestResponse) -> bool {
        match self {
            Self::All => true,
            Self::Attending => response.attending,
            Self::NotAttending => !response.attending,
            Self::Connection(label) => {
                response.attending && response.connection() == Some(label.as_str())
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Attending => "attending",
            Self::NotAttending => "not-attending",
            Self::Connection(label) => label,
        }
    }
}

/// Who is acting on a wedding. Passed explicitly into service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    MasterAdmin,
    WeddingAdmin,
    Guest,
}

impl AccessLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MasterAdmin => "master admin",
            Self::WeddingAdmin => "wedding admin",
            Self::Guest => "guest",
        }
    }
}

/// Request-scoped view of the wedding being worked on and the caller's access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeddingContext {
    pub wedding_id: WeddingId,
    pub access: AccessLevel,
}

impl WeddingContext {
    pub fn master_admin(wedding_id: WeddingId) -> Self {
        Self {
            wedding_id,
            access: AccessLevel::MasterAdmin,
        }
    }

    pub fn wedding_admin(wedding_id: WeddingId) -> Self {
        Self {
            wedding_id,
            access: AccessLevel::WeddingAdmin,
        }
    }

    pub fn guest(wedding_id: WeddingId) -> Self {
        Self {
            wedding_id,
            access: AccessLevel::Guest,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self.access,
            AccessLevel::MasterAdmin | AccessLevel::WeddingAdmin
        )
    }
}

/// Accepts RFC 3339, SQLite `CURRENT_TIMESTAMP` text, or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp '{raw}'"))),
    }
}
