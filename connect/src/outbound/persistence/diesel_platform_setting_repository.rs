//! PostgreSQL-backed `PlatformSettingRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{PlatformSettingRepository, PlatformSettingRepositoryError};
use crate::domain::{PlatformSetting, SettingCategory, SettingKey};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPlatformSettingRow, PlatformSettingRow};
use super::pool::{DbPool, PoolError};
use super::schema::platform_settings;

/// Diesel-backed implementation of the platform setting repository port.
#[derive(Clone)]
pub struct DieselPlatformSettingRepository {
    pool: DbPool,
}

impl DieselPlatformSettingRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PlatformSettingRepositoryError {
    map_pool_error(error, PlatformSettingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PlatformSettingRepositoryError {
    map_diesel_error(
        error,
        PlatformSettingRepositoryError::query,
        PlatformSettingRepositoryError::connection,
    )
}

/// Convert a stored row, rejecting keys or categories the domain refuses.
fn row_to_setting(
    row: PlatformSettingRow,
) -> Result<PlatformSetting, PlatformSettingRepositoryError> {
    let key = SettingKey::new(row.key)
        .map_err(|err| PlatformSettingRepositoryError::query(format!("stored key: {err}")))?;
    let category = row
        .category
        .parse::<SettingCategory>()
        .map_err(|err| PlatformSettingRepositoryError::query(format!("stored category: {err}")))?;

    Ok(PlatformSetting {
        key,
        value: row.value,
        category,
        description: row.description,
        is_public: row.is_public,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl PlatformSettingRepository for DieselPlatformSettingRepository {
    async fn find_by_key(
        &self,
        key: &SettingKey,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = platform_settings::table
            .filter(platform_settings::key.eq(key.as_ref()))
            .select(PlatformSettingRow::as_select())
            .first::<PlatformSettingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_setting).transpose()
    }

    async fn list(
        &self,
        public_only: bool,
    ) -> Result<Vec<PlatformSetting>, PlatformSettingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = platform_settings::table
            .order(platform_settings::key.asc())
            .select(PlatformSettingRow::as_select())
            .into_boxed();
        if public_only {
            query = query.filter(platform_settings::is_public.eq(true));
        }

        let rows: Vec<PlatformSettingRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_setting).collect()
    }

    async fn insert_if_absent(
        &self,
        setting: &PlatformSetting,
    ) -> Result<bool, PlatformSettingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewPlatformSettingRow {
            key: setting.key.as_ref(),
            value: &setting.value,
            category: setting.category.as_str(),
            description: setting.description.as_deref(),
            is_public: setting.is_public,
            updated_at: setting.updated_at,
        };

        let written = diesel::insert_into(platform_settings::table)
            .values(&new_row)
            .on_conflict(platform_settings::key)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(written > 0)
    }

    async fn update_value(
        &self,
        key: &SettingKey,
        value: &Value,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = diesel::update(platform_settings::table)
            .filter(platform_settings::key.eq(key.as_ref()))
            .set((
                platform_settings::value.eq(value),
                platform_settings::updated_at.eq(updated_at),
            ))
            .returning(PlatformSettingRow::as_returning())
            .get_result::<PlatformSettingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_setting).transpose()
    }
}
