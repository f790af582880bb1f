//! Campus events, registration capacity, and announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DraftValidationError, ResourceId, require_text};

/// An event students can register for.
///
/// # Examples
/// ```
/// use connect::domain::Event;
/// use serde_json::json;
///
/// let event: Event = serde_json::from_value(json!({
///     "_id": "e1",
///     "title": "Hack night",
///     "date": "2024-10-04T18:00:00Z",
///     "location": "Lab 3",
///     "attendees": ["u1", "u2"],
///     "maxAttendees": 2
/// }))
/// .expect("event decodes");
///
/// assert!(event.is_full());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Event title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// When the event starts.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    #[serde(default)]
    pub location: String,
    /// Listing category.
    #[serde(default)]
    pub category: Option<String>,
    /// Organising user.
    #[serde(default)]
    pub organizer: Option<ResourceId>,
    /// Registered user ids.
    #[serde(default)]
    pub attendees: Vec<ResourceId>,
    /// Capacity; `None` means unlimited.
    #[serde(default)]
    pub max_attendees: Option<u32>,
    /// Announcements posted by the organiser.
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    /// Whether the event is promoted on the landing page.
    #[serde(default)]
    pub is_featured: bool,
}

impl Event {
    /// Whether the event has no free places left.
    ///
    /// An event holding exactly `max_attendees` registrations is full.
    pub fn is_full(&self) -> bool {
        self.remaining_places() == Some(0)
    }

    /// Remaining free places, `None` when capacity is unlimited.
    pub fn remaining_places(&self) -> Option<usize> {
        self.max_attendees
            .map(|max| (max as usize).saturating_sub(self.attendees.len()))
    }
}

/// An announcement embedded in an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Optional headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Announcement body.
    pub message: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/events` and `PUT /api/events/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Event title, required.
    pub title: String,
    /// Description, required.
    pub description: String,
    /// Start time.
    pub date: DateTime<Utc>,
    /// Venue, required.
    pub location: String,
    /// Optional listing category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
}

impl EventDraft {
    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)?;
        if self.max_attendees == Some(0) {
            return Err(DraftValidationError::BelowMinimum {
                field: "maxAttendees".to_owned(),
                min: 1,
            });
        }
        Ok(())
    }
}

/// Payload for `POST /api/events/:id/announcements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    /// Optional headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Announcement body, required.
    pub message: String,
}

impl NewAnnouncement {
    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("message", &self.message)
    }
}
