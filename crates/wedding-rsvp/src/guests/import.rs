use super::domain::{parse_timestamp, GuestResponse, ResponseId};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

/// Layout of an exported guest list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestListFormat {
    Csv,
    Json,
}

impl GuestListFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Guesses from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(Self::Csv)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuestImportError {
    #[error("failed to read guest list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid guest list CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid guest list JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: attendance '{value}' is not yes/no")]
    InvalidAttendance { row: usize, value: String },
    #[error("row {row}: unrecognised submission time '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

/// Loads response lists exported from the RSVP store.
pub struct GuestListImporter;

impl GuestListImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: Option<GuestListFormat>,
    ) -> Result<Vec<GuestResponse>, GuestImportError> {
        let path = path.as_ref();
        let format = format.unwrap_or_else(|| GuestListFormat::from_path(path));
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: GuestListFormat,
    ) -> Result<Vec<GuestResponse>, GuestImportError> {
        match format {
            GuestListFormat::Csv => parse_csv(reader),
            GuestListFormat::Json => Ok(serde_json::from_reader(reader)?),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GuestRow {
    #[serde(rename = "ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "First Name", default)]
    first_name: String,
    #[serde(rename = "Last Name", default)]
    last_name: String,
    #[serde(rename = "Attending")]
    attending: String,
    #[serde(
        rename = "Connection Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    connection_type: Option<String>,
    #[serde(rename = "Guest Count", default)]
    guest_count: Option<u32>,
    #[serde(
        rename = "Submitted At",
        alias = "Submitted Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    submitted_at: Option<String>,
}

fn parse_csv<R: Read>(reader: R) -> Result<Vec<GuestResponse>, GuestImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut responses = Vec::new();

    for (index, record) in csv_reader.deserialize::<GuestRow>().enumerate() {
        let row = record?;
        let number = index + 1;

        let attending =
            parse_attendance(&row.attending).ok_or_else(|| GuestImportError::InvalidAttendance {
                row: number,
                value: row.attending.clone(),
            })?;
        let submitted_at = match row.submitted_at {
            Some(raw) => Some(
                parse_timestamp(&raw)
                    .ok_or(GuestImportError::InvalidTimestamp { row: number, value: raw })?,
            ),
            None => None,
        };

        responses.push(GuestResponse {
            id: ResponseId(row.id.unwrap_or_else(|| format!("row-{number}"))),
            first_name: row.first_name,
            last_name: row.last_name,
            attending,
            connection_type: row.connection_type,
            guest_count: row.guest_count,
            submitted_at,
        });
    }

    Ok(responses)
}

fn parse_attendance(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
