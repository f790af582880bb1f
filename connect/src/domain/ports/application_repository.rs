//! Port for job application persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Application, ApplicationId, ApplicationStatus, ResourceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "application repository query failed: {message}",
    }
}

/// Port for storing applications and their status changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new application.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Find an application by id.
    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// List the applications for a job, oldest first.
    async fn list_for_job(
        &self,
        job: &ResourceId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Set the status of an application whose current status is `expected`.
    ///
    /// Returns `None` when no row matched, either because the id is unknown or
    /// because the status changed concurrently.
    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise application storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationRepository;

#[async_trait]
impl ApplicationRepository for FixtureApplicationRepository {
    async fn insert(&self, _application: &Application) -> Result<(), ApplicationRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(None)
    }

    async fn list_for_job(
        &self,
        _job: &ResourceId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        _id: &ApplicationId,
        _expected: ApplicationStatus,
        _next: ApplicationStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(None)
    }
}
