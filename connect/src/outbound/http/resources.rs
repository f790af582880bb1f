//! API port implementations for [`ConnectHttpClient`].

use async_trait::async_trait;
use reqwest::Method;

use super::ConnectHttpClient;
use crate::domain::ports::{ApiError, CommunityApi, EventApi, ProfileApi, ReportApi};
use crate::domain::{
    Community, CommunityDraft, Event, EventDraft, Group, NewAnnouncement, NewGroup, NewPost,
    NewReport, Post, ProfileUpdate, Report, ReportStatusUpdate, ResourceId, Session, UserProfile,
};

#[async_trait]
impl CommunityApi for ConnectHttpClient {
    async fn list(&self, session: &Session) -> Result<Vec<Community>, ApiError> {
        self.get_json(session, &["api", "communities"]).await
    }

    async fn get(&self, session: &Session, id: &ResourceId) -> Result<Community, ApiError> {
        self.get_json(session, &["api", "communities", id.as_ref()])
            .await
    }

    async fn create(
        &self,
        session: &Session,
        draft: &CommunityDraft,
    ) -> Result<Community, ApiError> {
        self.send_json(Method::POST, session, &["api", "communities"], draft)
            .await
    }

    async fn add_post(
        &self,
        session: &Session,
        community: &ResourceId,
        post: &NewPost,
    ) -> Result<Post, ApiError> {
        self.send_json(
            Method::POST,
            session,
            &["api", "communities", community.as_ref(), "posts"],
            post,
        )
        .await
    }

    async fn add_group(
        &self,
        session: &Session,
        community: &ResourceId,
        group: &NewGroup,
    ) -> Result<Group, ApiError> {
        self.send_json(
            Method::POST,
            session,
            &["api", "communities", community.as_ref(), "groups"],
            group,
        )
        .await
    }
}

#[async_trait]
impl EventApi for ConnectHttpClient {
    async fn list(&self, session: &Session) -> Result<Vec<Event>, ApiError> {
        self.get_json(session, &["api", "events"]).await
    }

    async fn featured(&self, session: &Session) -> Result<Vec<Event>, ApiError> {
        self.get_json(session, &["api", "events", "featured"]).await
    }

    async fn get(&self, session: &Session, id: &ResourceId) -> Result<Event, ApiError> {
        self.get_json(session, &["api", "events", id.as_ref()]).await
    }

    async fn create(&self, session: &Session, draft: &EventDraft) -> Result<Event, ApiError> {
        self.send_json(Method::POST, session, &["api", "events"], draft)
            .await
    }

    async fn update(
        &self,
        session: &Session,
        id: &ResourceId,
        draft: &EventDraft,
    ) -> Result<Event, ApiError> {
        self.send_json(Method::PUT, session, &["api", "events", id.as_ref()], draft)
            .await
    }

    async fn register(&self, session: &Session, id: &ResourceId) -> Result<Event, ApiError> {
        self.send_json(
            Method::PUT,
            session,
            &["api", "events", id.as_ref(), "register"],
            &serde_json::json!({}),
        )
        .await
    }

    async fn announce(
        &self,
        session: &Session,
        id: &ResourceId,
        announcement: &NewAnnouncement,
    ) -> Result<Event, ApiError> {
        self.send_json(
            Method::POST,
            session,
            &["api", "events", id.as_ref(), "announcements"],
            announcement,
        )
        .await
    }
}

#[async_trait]
impl ProfileApi for ConnectHttpClient {
    async fn profile(&self, session: &Session) -> Result<UserProfile, ApiError> {
        self.get_json(session, &["api", "users", "profile"]).await
    }

    async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        self.send_json(Method::PUT, session, &["api", "users", "profile"], update)
            .await
    }
}

#[async_trait]
impl ReportApi for ConnectHttpClient {
    async fn list(&self, session: &Session) -> Result<Vec<Report>, ApiError> {
        self.get_json(session, &["api", "reports"]).await
    }

    async fn create(&self, session: &Session, report: &NewReport) -> Result<Report, ApiError> {
        self.send_json(Method::POST, session, &["api", "reports"], report)
            .await
    }

    async fn update_status(
        &self,
        session: &Session,
        id: &ResourceId,
        update: &ReportStatusUpdate,
    ) -> Result<Report, ApiError> {
        self.send_json(
            Method::PUT,
            session,
            &["api", "reports", id.as_ref(), "status"],
            update,
        )
        .await
    }
}
