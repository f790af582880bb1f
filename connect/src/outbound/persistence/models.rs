//! Diesel row types. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{applications, platform_settings};

/// Row read from `platform_settings`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = platform_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlatformSettingRow {
    pub key: String,
    pub value: serde_json::Value,
    pub category: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row written to `platform_settings`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = platform_settings)]
pub(crate) struct NewPlatformSettingRow<'a> {
    pub key: &'a str,
    pub value: &'a serde_json::Value,
    pub category: &'a str,
    pub description: Option<&'a str>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `applications`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub job_id: String,
    pub applicant_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row written to `applications`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub id: Uuid,
    pub job_id: &'a str,
    pub applicant_id: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
