//! Port for the events endpoints of the Connect API.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Event, EventDraft, NewAnnouncement, ResourceId, Session};

/// Remote operations on events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventApi: Send + Sync {
    /// `GET /api/events`.
    async fn list(&self, session: &Session) -> Result<Vec<Event>, ApiError>;

    /// `GET /api/events/featured`.
    async fn featured(&self, session: &Session) -> Result<Vec<Event>, ApiError>;

    /// `GET /api/events/:id`.
    async fn get(&self, session: &Session, id: &ResourceId) -> Result<Event, ApiError>;

    /// `POST /api/events`.
    async fn create(&self, session: &Session, draft: &EventDraft) -> Result<Event, ApiError>;

    /// `PUT /api/events/:id`.
    async fn update(
        &self,
        session: &Session,
        id: &ResourceId,
        draft: &EventDraft,
    ) -> Result<Event, ApiError>;

    /// `PUT /api/events/:id/register`, answering with the updated event.
    async fn register(&self, session: &Session, id: &ResourceId) -> Result<Event, ApiError>;

    /// `POST /api/events/:id/announcements`, answering with the updated event.
    async fn announce(
        &self,
        session: &Session,
        id: &ResourceId,
        announcement: &NewAnnouncement,
    ) -> Result<Event, ApiError>;
}
