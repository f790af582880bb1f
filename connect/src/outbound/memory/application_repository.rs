//! `ApplicationRepository` backed by a map keyed by id.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationId, ApplicationStatus, ResourceId};

/// Applications held in memory.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<ApplicationId, Application>>,
}

impl InMemoryApplicationRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut applications = self.applications.write().await;
        if applications.contains_key(&application.id()) {
            return Err(ApplicationRepositoryError::query(format!(
                "application {} already exists",
                application.id()
            )));
        }
        applications.insert(application.id(), application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(self.applications.read().await.get(id).cloned())
    }

    async fn list_for_job(
        &self,
        job: &ResourceId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut found: Vec<Application> = self
            .applications
            .read()
            .await
            .values()
            .filter(|application| application.job() == job)
            .cloned()
            .collect();
        found.sort_by_key(|application| (application.created_at(), *application.id().as_uuid()));
        Ok(found)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut applications = self.applications.write().await;
        let Some(current) = applications
            .get_mut(id)
            .filter(|application| application.status() == expected)
        else {
            return Ok(None);
        };
        *current = Application::restore(
            current.id(),
            current.job().clone(),
            current.applicant().clone(),
            next,
            current.created_at(),
            updated_at,
        );
        Ok(Some(current.clone()))
    }
}
