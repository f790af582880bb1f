//! Port for the communities endpoints of the Connect API.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Community, CommunityDraft, Group, NewGroup, NewPost, Post, ResourceId, Session};

/// Remote operations on communities and their embedded posts and groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityApi: Send + Sync {
    /// `GET /api/communities`.
    async fn list(&self, session: &Session) -> Result<Vec<Community>, ApiError>;

    /// `GET /api/communities/:id`.
    async fn get(&self, session: &Session, id: &ResourceId) -> Result<Community, ApiError>;

    /// `POST /api/communities`.
    async fn create(&self, session: &Session, draft: &CommunityDraft)
    -> Result<Community, ApiError>;

    /// `POST /api/communities/:id/posts`, answering with the created post.
    async fn add_post(
        &self,
        session: &Session,
        community: &ResourceId,
        post: &NewPost,
    ) -> Result<Post, ApiError>;

    /// `POST /api/communities/:id/groups`, answering with the created group.
    async fn add_group(
        &self,
        session: &Session,
        community: &ResourceId,
        group: &NewGroup,
    ) -> Result<Group, ApiError>;
}
