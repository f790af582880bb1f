//! User profile and the notifications it carries.
//!
//! Notifications have no endpoint of their own: they are read from the
//! profile and their read state is changed through a profile update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Profile of the signed-in user as returned by `GET /api/users/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Role such as `student` or `admin`.
    #[serde(default)]
    pub role: Option<String>,
    /// Notifications, newest first as sent by the server.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// A notification embedded in the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Text shown to the user.
    pub message: String,
    /// Source of the notification, e.g. `event` or `community`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// In-app link to the related record.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the user has seen it.
    #[serde(default)]
    pub read: bool,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `PUT /api/users/profile` carrying read-state changes.
///
/// # Examples
/// ```
/// use connect::domain::{ProfileUpdate, ResourceId};
///
/// let update = ProfileUpdate::mark_read(vec![ResourceId::new("n1").expect("valid id")]);
/// let body = serde_json::to_value(&update).expect("update serializes");
/// assert_eq!(body["notifications"][0]["_id"], "n1");
/// assert_eq!(body["notifications"][0]["read"], true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Notification read-state changes.
    pub notifications: Vec<NotificationReadState>,
}

impl ProfileUpdate {
    /// Mark each listed notification as read.
    pub fn mark_read(ids: Vec<ResourceId>) -> Self {
        Self {
            notifications: ids
                .into_iter()
                .map(|id| NotificationReadState { id, read: true })
                .collect(),
        }
    }
}

/// Read-state change for one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationReadState {
    /// Notification to change.
    #[serde(rename = "_id")]
    pub id: ResourceId,
    /// New read state.
    pub read: bool,
}

/// Number of notifications the user has not read yet.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
