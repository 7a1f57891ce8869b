use super::domain::{GuestResponse, ResponseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw RSVP form payload as submitted by a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSubmission {
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub attending: Option<bool>,
    #[serde(default, alias = "connectionType")]
    pub connection_type: Option<String>,
    #[serde(default, alias = "guestCount")]
    pub guest_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{field} is required")]
    MissingName { field: &'static str },
    #[error("attendance answer is required")]
    MissingAttendance,
    #[error("connection type is required when attending")]
    MissingConnectionType,
    #[error("guest count must be at least 1")]
    InvalidGuestCount,
}

impl RsvpSubmission {
    /// Validates the form and shapes it into a stored response.
    ///
    /// Declined responses always count one guest and carry whatever connection was given;
    /// accepted responses need a connection label and a party size of at least one.
    pub fn into_response(
        self,
        id: ResponseId,
        submitted_at: DateTime<Utc>,
    ) -> Result<GuestResponse, SubmissionError> {
        let first_name = required_name(self.first_name, "first name")?;
        let last_name = required_name(self.last_name, "last name")?;
        let attending = self.attending.ok_or(SubmissionError::MissingAttendance)?;
        let connection_type = self
            .connection_type
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty());

        let guest_count = if attending {
            if connection_type.is_none() {
                return Err(SubmissionError::MissingConnectionType);
            }
            match self.guest_count {
                None => 1,
                Some(0) => return Err(SubmissionError::InvalidGuestCount),
                Some(count) => count,
            }
        } else {
            1
        };

        Ok(GuestResponse {
            id,
            first_name,
            last_name,
            attending,
            connection_type,
            guest_count: Some(guest_count),
            submitted_at: Some(submitted_at),
        })
    }
}

fn required_name(value: Option<String>, field: &'static str) -> Result<String, SubmissionError> {
    value
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(SubmissionError::MissingName { field })
}
