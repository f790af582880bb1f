//! Notifications slice, backed by the user profile endpoints.

use async_trait::async_trait;

use super::slice::{Slice, SliceState};
use crate::domain::ports::{ApiError, ProfileApi};
use crate::domain::{Notification, ProfileUpdate, ResourceId, Session, UserProfile};

/// Operations on the notifications slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    /// Load the profile's notifications.
    Fetch,
    /// Mark the listed notifications as read.
    MarkRead(Vec<ResourceId>),
}

/// Marker type for the notifications slice.
#[derive(Debug, Clone, Copy)]
pub struct NotificationsSlice;

#[async_trait]
impl Slice for NotificationsSlice {
    type Item = Notification;
    type Extra = ();
    type Command = NotificationCommand;
    type Payload = UserProfile;
    type Api = dyn ProfileApi;

    const NAME: &'static str = "notifications";

    fn is_mutation(command: &Self::Command) -> bool {
        matches!(command, NotificationCommand::MarkRead(_))
    }

    async fn execute(
        api: &Self::Api,
        session: &Session,
        command: &Self::Command,
    ) -> Result<Self::Payload, ApiError> {
        match command {
            NotificationCommand::Fetch => api.profile(session).await,
            NotificationCommand::MarkRead(ids) => {
                api.update_profile(session, &ProfileUpdate::mark_read(ids.clone()))
                    .await
            }
        }
    }

    fn apply(state: &mut SliceState<Self>, payload: Self::Payload) {
        state.items = payload.notifications;
    }
}
