//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationId, ApplicationStatus, ResourceId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::applications;

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_pool_error(error, ApplicationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    let ApplicationRow {
        id,
        job_id,
        applicant_id,
        status,
        created_at,
        updated_at,
    } = row;

    let job = ResourceId::new(job_id)
        .map_err(|err| ApplicationRepositoryError::query(format!("stored job id: {err}")))?;
    let applicant = ResourceId::new(applicant_id)
        .map_err(|err| ApplicationRepositoryError::query(format!("stored applicant id: {err}")))?;
    let status = status
        .parse::<ApplicationStatus>()
        .map_err(|err| ApplicationRepositoryError::query(format!("stored status: {err}")))?;

    Ok(Application::restore(
        ApplicationId::from_uuid(id),
        job,
        applicant,
        status,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewApplicationRow {
            id: *application.id().as_uuid(),
            job_id: application.job().as_ref(),
            applicant_id: application.applicant().as_ref(),
            status: application.status().as_str(),
            created_at: application.created_at(),
            updated_at: application.updated_at(),
        };

        diesel::insert_into(applications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = applications::table
            .filter(applications::id.eq(id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_application).transpose()
    }

    async fn list_for_job(
        &self,
        job: &ResourceId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ApplicationRow> = applications::table
            .filter(applications::job_id.eq(job.as_ref()))
            .order((applications::created_at.asc(), applications::id.asc()))
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_application).collect()
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = diesel::update(applications::table)
            .filter(
                applications::id
                    .eq(id.as_uuid())
                    .and(applications::status.eq(expected.as_str())),
            )
            .set((
                applications::status.eq(next.as_str()),
                applications::updated_at.eq(updated_at),
            ))
            .returning(ApplicationRow::as_returning())
            .get_result::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_application).transpose()
    }
}
