//! Port for the moderation report endpoints of the Connect API.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{NewReport, Report, ReportStatusUpdate, ResourceId, Session};

/// Remote operations on moderation reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// `GET /api/reports`.
    async fn list(&self, session: &Session) -> Result<Vec<Report>, ApiError>;

    /// `POST /api/reports`.
    async fn create(&self, session: &Session, report: &NewReport) -> Result<Report, ApiError>;

    /// `PUT /api/reports/:reportId/status`.
    async fn update_status(
        &self,
        session: &Session,
        id: &ResourceId,
        update: &ReportStatusUpdate,
    ) -> Result<Report, ApiError>;
}
