//! Submission and review of job applications.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationId, ApplicationStatus, Error, ResourceId};

fn map_repository_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
    }
}

/// Service owning the application lifecycle.
#[derive(Clone)]
pub struct ApplicationService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ApplicationService<R> {
    /// Create a service over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use connect::domain::ApplicationService;
    /// use connect::domain::ports::FixtureApplicationRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = ApplicationService::new(
    ///     Arc::new(FixtureApplicationRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository,
{
    /// Record a new pending application.
    pub async fn submit(
        &self,
        job: ResourceId,
        applicant: ResourceId,
    ) -> Result<Application, Error> {
        let application = Application::submit(job, applicant, self.clock.utc());
        self.repository
            .insert(&application)
            .await
            .map_err(map_repository_error)?;
        info!(
            application_id = %application.id(),
            job = %application.job(),
            "application submitted"
        );
        Ok(application)
    }

    /// Decide a pending application.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Conflict` when the application is not
    /// pending or was decided concurrently.
    pub async fn transition(
        &self,
        id: ApplicationId,
        next: ApplicationStatus,
    ) -> Result<Application, Error> {
        let current = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("application {id} not found")))?;

        if !current.status().can_transition_to(next) {
            return Err(Error::conflict(format!(
                "application {id} cannot move from {} to {next}",
                current.status()
            )));
        }

        let updated = self
            .repository
            .update_status(&id, current.status(), next, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::conflict(format!("application {id} was changed concurrently")))?;
        info!(application_id = %id, status = %next, "application status changed");
        Ok(updated)
    }

    /// List a job's applications, oldest first.
    pub async fn list_for_job(&self, job: &ResourceId) -> Result<Vec<Application>, Error> {
        self.repository
            .list_for_job(job)
            .await
            .map_err(map_repository_error)
    }
}
