//! Job applications submitted by students.
//!
//! An application is created `pending` and afterwards only changes status.
//! Applications are never deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResourceId;

/// Stable identifier of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Awaiting the employer.
    #[default]
    Pending,
    /// Accepted by the employer.
    Accepted,
    /// Declined by the employer.
    Rejected,
}

impl ApplicationStatus {
    /// Wire and storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Only pending applications may be decided; decided ones are final.
    ///
    /// # Examples
    /// ```
    /// use connect::domain::ApplicationStatus;
    ///
    /// assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Accepted));
    /// assert!(!ApplicationStatus::Accepted.can_transition_to(ApplicationStatus::Rejected));
    /// ```
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownApplicationStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownApplicationStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownApplicationStatus(other.to_owned())),
        }
    }
}

/// A student's application to a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    job: ResourceId,
    applicant: ResourceId,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Application {
    /// Start a new pending application.
    pub fn submit(job: ResourceId, applicant: ResourceId, now: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::random(),
            job,
            applicant,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an application from storage.
    pub fn restore(
        id: ApplicationId,
        job: ResourceId,
        applicant: ResourceId,
        status: ApplicationStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            job,
            applicant,
            status,
            created_at,
            updated_at,
        }
    }

    /// Identifier.
    pub fn id(&self) -> ApplicationId {
        self.id
    }

    /// Job applied to.
    pub fn job(&self) -> &ResourceId {
        &self.job
    }

    /// Applying student.
    pub fn applicant(&self) -> &ResourceId {
        &self.applicant
    }

    /// Current status.
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Submission time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last status change.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
