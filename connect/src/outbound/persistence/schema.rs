//! Diesel table definitions; must match the SQL migrations.

diesel::table! {
    /// Platform-wide settings keyed by name.
    platform_settings (key) {
        /// Primary key, e.g. `siteName`.
        key -> Varchar,
        /// Setting value as JSON.
        value -> Jsonb,
        /// One of `general`, `appearance`, `privacy`, `notifications`, `system`.
        category -> Varchar,
        /// Explanation for administrators.
        description -> Nullable<Text>,
        /// Readable without authentication.
        is_public -> Bool,
        /// Time of the last write.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job applications.
    applications (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Job posting identifier.
        job_id -> Varchar,
        /// Applying user identifier.
        applicant_id -> Varchar,
        /// One of `pending`, `accepted`, `rejected`.
        status -> Varchar,
        /// Submission time.
        created_at -> Timestamptz,
        /// Time of the last status change.
        updated_at -> Timestamptz,
    }
}
