use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use super::slot::SlotId;

/// Body of `POST /book_appointment/`.
///
/// A missing field, `null`, or a value that is not a string all read as
/// `None`, so the validator reports them as format errors in its usual order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default, deserialize_with = "text_or_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub time: Option<String>,
}

/// Accepts any value, keeping it only if it is a string.
pub fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(text)) => Some(text),
        Some(Field::Other(_)) | None => None,
    })
}

/// Generic `{message, status_code}` envelope used by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl MessageResponse {
    /// A bare message with no status code echoed in the body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: Some(200),
        }
    }

    pub fn booked(id: SlotId) -> Self {
        Self::ok(format!(
            "Appointment booked successfully. Appointment id is {id}."
        ))
    }

    pub fn canceled() -> Self {
        Self::ok("Appointment canceled successfully.")
    }

    pub fn available() -> Self {
        Self::ok("Slot is available")
    }
}
