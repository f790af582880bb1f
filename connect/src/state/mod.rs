//! Client-side state for the Connect application.
//!
//! Each slice owns a [`ResourceState`] in its own [`SliceStore`]. Slices never
//! touch each other's state. [`ConnectStore`] groups the four slices over a
//! single API client.

mod cancel;
mod communities;
mod events;
mod notifications;
mod reports;
mod resource;
mod slice;
mod store;

use std::sync::Arc;

pub use cancel::{CancellationSource, CancellationToken};
pub use communities::{CommunitiesSlice, CommunityCommand, CommunityPayload};
pub use events::{EVENT_FULL_MESSAGE, EventCommand, EventPayload, EventsExtra, EventsSlice};
pub use notifications::{NotificationCommand, NotificationsSlice};
pub use reports::{ReportCommand, ReportPayload, ReportsSlice};
pub use resource::{Action, ResourceState, reduce};
pub use slice::{Slice, SliceState};
pub use store::{InFlight, LifecycleEvent, Phase, SliceStore};

use crate::domain::ports::{CommunityApi, EventApi, ProfileApi, ReportApi};

/// The four client slices sharing one API client.
#[derive(Clone)]
pub struct ConnectStore {
    /// Communities with embedded posts and groups.
    pub communities: SliceStore<CommunitiesSlice>,
    /// Events and the featured list.
    pub events: SliceStore<EventsSlice>,
    /// Notifications from the user profile.
    pub notifications: SliceStore<NotificationsSlice>,
    /// Moderation reports.
    pub reports: SliceStore<ReportsSlice>,
}

impl ConnectStore {
    /// Build every slice store over `client`.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use connect::config::ConnectSettings;
    /// use connect::outbound::http::ConnectHttpClient;
    /// use connect::state::ConnectStore;
    ///
    /// let client = ConnectHttpClient::from_settings(&ConnectSettings::local())
    ///     .expect("client builds");
    /// let store = ConnectStore::new(Arc::new(client));
    /// assert!(store.events.snapshot().items.is_empty());
    /// ```
    pub fn new<C>(client: Arc<C>) -> Self
    where
        C: CommunityApi + EventApi + ProfileApi + ReportApi + 'static,
    {
        let communities: Arc<dyn CommunityApi> = client.clone();
        let events: Arc<dyn EventApi> = client.clone();
        let notifications: Arc<dyn ProfileApi> = client.clone();
        let reports: Arc<dyn ReportApi> = client;
        Self {
            communities: SliceStore::new(communities),
            events: SliceStore::new(events),
            notifications: SliceStore::new(notifications),
            reports: SliceStore::new(reports),
        }
    }
}
