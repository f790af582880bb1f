//! Port for the user profile endpoints, which carry notifications.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{ProfileUpdate, Session, UserProfile};

/// Remote operations on the signed-in user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /api/users/profile`.
    async fn profile(&self, session: &Session) -> Result<UserProfile, ApiError>;

    /// `PUT /api/users/profile`, answering with the updated profile.
    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError>;
}
