//! Events slice, including the featured list and registration capacity.

use async_trait::async_trait;

use super::slice::{Slice, SliceState};
use crate::domain::ports::{ApiError, EventApi};
use crate::domain::{Event, EventDraft, NewAnnouncement, ResourceId, Session};

/// Message stored when registering for an event without free places.
pub const EVENT_FULL_MESSAGE: &str = "Event is full";

/// Slice-specific state of the events slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsExtra {
    /// Events promoted on the landing page.
    pub featured: Vec<Event>,
}

/// Operations on the events slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCommand {
    /// Load every event into `items`.
    FetchAll,
    /// Load featured events into `extra.featured`.
    FetchFeatured,
    /// Load one event into `focused`.
    FetchOne(ResourceId),
    /// Create an event and append it.
    Create(EventDraft),
    /// Replace an event's editable fields.
    Update {
        /// Event to update.
        id: ResourceId,
        /// New field values.
        draft: EventDraft,
    },
    /// Register the signed-in user.
    Register(ResourceId),
    /// Post an announcement.
    Announce {
        /// Event to announce on.
        id: ResourceId,
        /// Announcement to post.
        announcement: NewAnnouncement,
    },
}

/// Decoded results of [`EventCommand`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Full list.
    All(Vec<Event>),
    /// Featured list.
    Featured(Vec<Event>),
    /// Single event.
    One(Event),
    /// Newly created event.
    Created(Event),
    /// Server copy of an event after a change.
    Patched(Event),
}

/// Marker type for the events slice.
#[derive(Debug, Clone, Copy)]
pub struct EventsSlice;

fn known_event<'a>(state: &'a SliceState<EventsSlice>, id: &ResourceId) -> Option<&'a Event> {
    state
        .focused
        .iter()
        .chain(state.items.iter())
        .find(|event| &event.id == id)
}

fn patch(state: &mut SliceState<EventsSlice>, event: Event) {
    let copies = state
        .items
        .iter_mut()
        .chain(state.extra.featured.iter_mut())
        .chain(state.focused.iter_mut())
        .filter(|existing| existing.id == event.id);
    for existing in copies {
        *existing = event.clone();
    }
}

#[async_trait]
impl Slice for EventsSlice {
    type Item = Event;
    type Extra = EventsExtra;
    type Command = EventCommand;
    type Payload = EventPayload;
    type Api = dyn EventApi;

    const NAME: &'static str = "events";

    fn is_mutation(command: &Self::Command) -> bool {
        !matches!(
            command,
            EventCommand::FetchAll | EventCommand::FetchFeatured | EventCommand::FetchOne(_)
        )
    }

    fn validate(state: &SliceState<Self>, command: &Self::Command) -> Result<(), ApiError> {
        match command {
            EventCommand::Create(draft) | EventCommand::Update { draft, .. } => draft.validate()?,
            EventCommand::Announce { announcement, .. } => announcement.validate()?,
            EventCommand::Register(id) => {
                if known_event(state, id).is_some_and(Event::is_full) {
                    return Err(ApiError::validation(EVENT_FULL_MESSAGE));
                }
            }
            EventCommand::FetchAll | EventCommand::FetchFeatured | EventCommand::FetchOne(_) => {}
        }
        Ok(())
    }

    async fn execute(
        api: &Self::Api,
        session: &Session,
        command: &Self::Command,
    ) -> Result<Self::Payload, ApiError> {
        Ok(match command {
            EventCommand::FetchAll => EventPayload::All(api.list(session).await?),
            EventCommand::FetchFeatured => EventPayload::Featured(api.featured(session).await?),
            EventCommand::FetchOne(id) => EventPayload::One(api.get(session, id).await?),
            EventCommand::Create(draft) => EventPayload::Created(api.create(session, draft).await?),
            EventCommand::Update { id, draft } => {
                EventPayload::Patched(api.update(session, id, draft).await?)
            }
            EventCommand::Register(id) => EventPayload::Patched(api.register(session, id).await?),
            EventCommand::Announce { id, announcement } => {
                EventPayload::Patched(api.announce(session, id, announcement).await?)
            }
        })
    }

    fn apply(state: &mut SliceState<Self>, payload: Self::Payload) {
        match payload {
            EventPayload::All(events) => state.items = events,
            EventPayload::Featured(events) => state.extra.featured = events,
            EventPayload::One(event) => state.focused = Some(event),
            EventPayload::Created(event) => state.items.push(event),
            EventPayload::Patched(event) => patch(state, event),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::BearerToken;
    use crate::domain::ports::MockEventApi;
    use crate::state::SliceStore;

    #[fixture]
    fn session() -> Session {
        Session::new(BearerToken::new("test-token").expect("valid token"))
    }

    fn id(raw: &str) -> ResourceId {
        ResourceId::new(raw).expect("valid id")
    }

    fn event(raw_id: &str, attendees: &[&str], max_attendees: Option<u32>) -> Event {
        serde_json::from_value(json!({
            "_id": raw_id,
            "title": "Career fair",
            "date": "2024-11-05T09:00:00Z",
            "attendees": attendees,
            "maxAttendees": max_attendees,
        }))
        .expect("event decodes")
    }

    fn store(api: MockEventApi) -> SliceStore<EventsSlice> {
        let api: Arc<dyn EventApi> = Arc::new(api);
        SliceStore::new(api)
    }

    #[rstest]
    #[case::one_place_left(&["u1"], Some(2), true)]
    #[case::exactly_full(&["u1", "u2"], Some(2), false)]
    #[case::unlimited(&["u1", "u2"], None, true)]
    #[tokio::test]
    async fn register_checks_capacity_before_calling(
        session: Session,
        #[case] attendees: &'static [&'static str],
        #[case] max_attendees: Option<u32>,
        #[case] reaches_server: bool,
    ) {
        let listed = event("e1", attendees, max_attendees);
        let mut api = MockEventApi::new();
        api.expect_list().return_once(move |_| Ok(vec![listed]));
        api.expect_register()
            .times(usize::from(reaches_server))
            .returning(move |_, _| Ok(event("e1", &["u1", "u2", "me"], max_attendees)));
        let store = store(api);
        store
            .dispatch(&session, EventCommand::FetchAll)
            .await
            .expect("fetch succeeds");

        let outcome = store
            .dispatch(&session, EventCommand::Register(id("e1")))
            .await;

        let state = store.snapshot();
        assert!(!state.loading);
        if reaches_server {
            outcome.expect("registration succeeds");
            assert_eq!(state.items[0].attendees.len(), 3);
            assert!(state.success);
        } else {
            assert_eq!(
                outcome.expect_err("registration rejected"),
                ApiError::validation(EVENT_FULL_MESSAGE)
            );
            assert_eq!(state.error.as_deref(), Some(EVENT_FULL_MESSAGE));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn full_focused_event_blocks_registration(session: Session) {
        let mut api = MockEventApi::new();
        api.expect_get()
            .return_once(|_, _| Ok(event("e2", &["u1"], Some(1))));
        api.expect_register().times(0);
        let store = store(api);
        store
            .dispatch(&session, EventCommand::FetchOne(id("e2")))
            .await
            .expect("fetch succeeds");

        store
            .dispatch(&session, EventCommand::Register(id("e2")))
            .await
            .expect_err("registration rejected");
    }

    #[rstest]
    #[tokio::test]
    async fn featured_events_live_in_extra(session: Session) {
        let mut api = MockEventApi::new();
        api.expect_featured()
            .times(1)
            .return_once(|_| Ok(vec![event("e3", &[], None)]));
        let store = store(api);

        store
            .dispatch(&session, EventCommand::FetchFeatured)
            .await
            .expect("fetch succeeds");

        let state = store.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.extra.featured.len(), 1);
        assert!(!state.success);
    }

    #[rstest]
    #[tokio::test]
    async fn announcement_patches_every_copy(session: Session) {
        let mut api = MockEventApi::new();
        api.expect_list()
            .return_once(|_| Ok(vec![event("e4", &[], None), event("e5", &[], None)]));
        api.expect_featured()
            .return_once(|_| Ok(vec![event("e4", &[], None)]));
        api.expect_announce()
            .withf(|_, id, announcement| {
                id.as_ref() == "e4" && announcement.message == "Room change"
            })
            .return_once(|_, _, _| {
                let mut updated = event("e4", &[], None);
                updated.announcements = vec![
                    serde_json::from_value(json!({ "_id": "a1", "message": "Room change" }))
                        .expect("announcement decodes"),
                ];
                Ok(updated)
            });
        let store = store(api);
        store
            .dispatch(&session, EventCommand::FetchAll)
            .await
            .expect("fetch succeeds");
        store
            .dispatch(&session, EventCommand::FetchFeatured)
            .await
            .expect("fetch succeeds");

        store
            .dispatch(
                &session,
                EventCommand::Announce {
                    id: id("e4"),
                    announcement: NewAnnouncement {
                        title: None,
                        message: "Room change".to_owned(),
                    },
                },
            )
            .await
            .expect("announce succeeds");

        let state = store.snapshot();
        assert_eq!(state.items[0].announcements.len(), 1);
        assert!(state.items[1].announcements.is_empty());
        assert_eq!(state.extra.featured[0].announcements.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn server_rejection_is_surfaced(session: Session) {
        let mut api = MockEventApi::new();
        api.expect_list()
            .return_once(|_| Err(ApiError::unauthorized("Not authorized, token failed")));
        let store = store(api);

        store
            .dispatch(&session, EventCommand::FetchAll)
            .await
            .expect_err("fetch fails");

        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some("Not authorized, token failed"));
        assert!(!state.loading);
    }
}
