//! Moderation reports and the resolution rule applied to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DraftValidationError, ResourceId, require_text};

/// Review state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Awaiting a moderator.
    #[default]
    Pending,
    /// Seen by a moderator, no outcome yet.
    Reviewed,
    /// Closed with a resolution.
    Resolved,
    /// Closed without action.
    Dismissed,
}

/// Outcome chosen by a moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportResolution {
    /// The reported content stays up.
    ContentKept,
    /// The reported content was taken down.
    ContentRemoved,
    /// The author received a warning.
    UserWarned,
    /// The author was suspended.
    UserSuspended,
}

impl ReportResolution {
    /// Action recorded alongside this resolution.
    ///
    /// # Examples
    /// ```
    /// use connect::domain::{ActionTaken, ReportResolution};
    ///
    /// assert_eq!(ReportResolution::ContentKept.action_taken(), ActionTaken::None);
    /// assert_eq!(ReportResolution::UserSuspended.action_taken(), ActionTaken::Warning);
    /// ```
    pub fn action_taken(self) -> ActionTaken {
        match self {
            Self::ContentKept => ActionTaken::None,
            Self::ContentRemoved | Self::UserWarned | Self::UserSuspended => ActionTaken::Warning,
        }
    }
}

/// Action recorded against the reported party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionTaken {
    /// Nothing was done.
    None,
    /// A warning was issued.
    Warning,
}

/// Thing a report points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTarget {
    /// Kind of record, e.g. `post`, `event`, `user`.
    pub kind: String,
    /// Identifier of the reported record.
    pub id: ResourceId,
}

/// A moderation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Reporting user.
    #[serde(default)]
    pub reporter: Option<ResourceId>,
    /// Reported record.
    pub target: ReportTarget,
    /// Short reason category.
    pub reason: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Review state.
    #[serde(default)]
    pub status: ReportStatus,
    /// Moderator outcome.
    #[serde(default)]
    pub resolution: Option<ReportResolution>,
    /// Action recorded with the outcome.
    #[serde(default)]
    pub action_taken: Option<ActionTaken>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    /// Reported record.
    pub target: ReportTarget,
    /// Short reason category, required.
    pub reason: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Resolution recorded at filing time, used when a moderator files a
    /// report against content they have already handled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ReportResolution>,
    /// Derived from `resolution`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<ActionTaken>,
}

impl NewReport {
    /// Build a report with no resolution.
    pub fn new(
        target: ReportTarget,
        reason: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            target,
            reason: reason.into(),
            description: description.into(),
            resolution: None,
            action_taken: None,
        }
    }

    /// Attach a resolution and the action it implies.
    pub fn with_resolution(mut self, resolution: ReportResolution) -> Self {
        self.resolution = Some(resolution);
        self.action_taken = Some(resolution.action_taken());
        self
    }

    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("reason", &self.reason)?;
        require_text("target.kind", &self.target.kind)
    }
}

/// Payload for `PUT /api/reports/:reportId/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusUpdate {
    /// New review state.
    pub status: ReportStatus,
    /// Outcome, present when resolving.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ReportResolution>,
    /// Derived from `resolution`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<ActionTaken>,
}

impl ReportStatusUpdate {
    /// Move a report to a state that carries no resolution.
    pub fn status(status: ReportStatus) -> Self {
        Self {
            status,
            resolution: None,
            action_taken: None,
        }
    }

    /// Resolve a report, deriving the recorded action.
    ///
    /// # Examples
    /// ```
    /// use connect::domain::{ActionTaken, ReportResolution, ReportStatus, ReportStatusUpdate};
    ///
    /// let update = ReportStatusUpdate::resolve(ReportResolution::ContentRemoved);
    /// assert_eq!(update.status, ReportStatus::Resolved);
    /// assert_eq!(update.action_taken, Some(ActionTaken::Warning));
    /// ```
    pub fn resolve(resolution: ReportResolution) -> Self {
        Self {
            status: ReportStatus::Resolved,
            resolution: Some(resolution),
            action_taken: Some(resolution.action_taken()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ReportResolution::ContentKept, ActionTaken::None)]
    #[case(ReportResolution::ContentRemoved, ActionTaken::Warning)]
    #[case(ReportResolution::UserWarned, ActionTaken::Warning)]
    #[case(ReportResolution::UserSuspended, ActionTaken::Warning)]
    fn resolution_determines_action(
        #[case] resolution: ReportResolution,
        #[case] action: ActionTaken,
    ) {
        let update = ReportStatusUpdate::resolve(resolution);
        assert_eq!(update.action_taken, Some(action));

        let target = ReportTarget {
            kind: "post".to_owned(),
            id: ResourceId::new("p1").expect("valid id"),
        };
        let report = NewReport::new(target, "spam", "").with_resolution(resolution);
        assert_eq!(report.action_taken, Some(action));
    }

    #[rstest]
    fn status_update_uses_wire_spelling() {
        let body = serde_json::to_value(ReportStatusUpdate::resolve(ReportResolution::ContentKept))
            .expect("update serializes");

        assert_eq!(
            body,
            json!({ "status": "resolved", "resolution": "CONTENT_KEPT", "actionTaken": "NONE" })
        );
    }

    #[rstest]
    fn plain_status_update_omits_resolution() {
        let body = serde_json::to_value(ReportStatusUpdate::status(ReportStatus::Dismissed))
            .expect("update serializes");
        assert_eq!(body, json!({ "status": "dismissed" }));
    }

    #[rstest]
    fn report_defaults_to_pending() {
        let report: Report = serde_json::from_value(json!({
            "_id": "r1",
            "target": { "kind": "event", "id": "e1" },
            "reason": "inappropriate"
        }))
        .expect("report decodes");

        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.resolution.is_none());
    }
}
