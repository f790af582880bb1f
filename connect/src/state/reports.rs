//! Moderation reports slice.

use async_trait::async_trait;

use super::slice::{Slice, SliceState};
use crate::domain::ports::{ApiError, ReportApi};
use crate::domain::{NewReport, Report, ReportStatusUpdate, ResourceId, Session};

/// Operations on the reports slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCommand {
    /// Load every report.
    FetchAll,
    /// File a report.
    Create(NewReport),
    /// Change a report's review state.
    UpdateStatus {
        /// Report to change.
        id: ResourceId,
        /// New state and resolution.
        update: ReportStatusUpdate,
    },
}

/// Decoded results of [`ReportCommand`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPayload {
    /// Full list.
    All(Vec<Report>),
    /// Newly filed report.
    Created(Report),
    /// Server copy after a status change.
    Patched(Report),
}

/// Marker type for the reports slice.
#[derive(Debug, Clone, Copy)]
pub struct ReportsSlice;

#[async_trait]
impl Slice for ReportsSlice {
    type Item = Report;
    type Extra = ();
    type Command = ReportCommand;
    type Payload = ReportPayload;
    type Api = dyn ReportApi;

    const NAME: &'static str = "reports";

    fn is_mutation(command: &Self::Command) -> bool {
        !matches!(command, ReportCommand::FetchAll)
    }

    fn validate(_state: &SliceState<Self>, command: &Self::Command) -> Result<(), ApiError> {
        if let ReportCommand::Create(report) = command {
            report.validate()?;
        }
        Ok(())
    }

    async fn execute(
        api: &Self::Api,
        session: &Session,
        command: &Self::Command,
    ) -> Result<Self::Payload, ApiError> {
        Ok(match command {
            ReportCommand::FetchAll => ReportPayload::All(api.list(session).await?),
            ReportCommand::Create(report) => {
                ReportPayload::Created(api.create(session, report).await?)
            }
            ReportCommand::UpdateStatus { id, update } => {
                ReportPayload::Patched(api.update_status(session, id, update).await?)
            }
        })
    }

    fn apply(state: &mut SliceState<Self>, payload: Self::Payload) {
        match payload {
            ReportPayload::All(reports) => state.items = reports,
            ReportPayload::Created(report) => state.items.push(report),
            ReportPayload::Patched(report) => {
                if let Some(existing) = state.items.iter_mut().find(|r| r.id == report.id) {
                    *existing = report;
                }
            }
        }
    }
}
