//! Communities slice.

use async_trait::async_trait;

use super::slice::{Slice, SliceState};
use crate::domain::ports::{ApiError, CommunityApi};
use crate::domain::{
    Community, CommunityDraft, Group, NewGroup, NewPost, Post, ResourceId, Session,
};

/// Operations on the communities slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityCommand {
    /// Load every community into `items`.
    FetchAll,
    /// Load one community into `focused`.
    FetchOne(ResourceId),
    /// Create a community and append it.
    Create(CommunityDraft),
    /// Add a post to a community.
    AddPost {
        /// Target community.
        community: ResourceId,
        /// Post to create.
        post: NewPost,
    },
    /// Add a group to a community.
    AddGroup {
        /// Target community.
        community: ResourceId,
        /// Group to create.
        group: NewGroup,
    },
}

/// Decoded results of [`CommunityCommand`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum CommunityPayload {
    /// Full list.
    All(Vec<Community>),
    /// Single community.
    One(Community),
    /// Newly created community.
    Created(Community),
    /// Newly created post.
    PostAdded {
        /// Owning community.
        community: ResourceId,
        /// Created post.
        post: Post,
    },
    /// Newly created group.
    GroupAdded {
        /// Owning community.
        community: ResourceId,
        /// Created group.
        group: Group,
    },
}

/// Marker type for the communities slice.
#[derive(Debug, Clone, Copy)]
pub struct CommunitiesSlice;

fn for_each_copy(
    state: &mut SliceState<CommunitiesSlice>,
    id: &ResourceId,
    mut update: impl FnMut(&mut Community),
) {
    state
        .items
        .iter_mut()
        .filter(|community| &community.id == id)
        .for_each(&mut update);
    if let Some(focused) = state.focused.as_mut().filter(|community| &community.id == id) {
        update(focused);
    }
}

#[async_trait]
impl Slice for CommunitiesSlice {
    type Item = Community;
    type Extra = ();
    type Command = CommunityCommand;
    type Payload = CommunityPayload;
    type Api = dyn CommunityApi;

    const NAME: &'static str = "communities";

    fn is_mutation(command: &Self::Command) -> bool {
        !matches!(
            command,
            CommunityCommand::FetchAll | CommunityCommand::FetchOne(_)
        )
    }

    fn validate(_state: &SliceState<Self>, command: &Self::Command) -> Result<(), ApiError> {
        match command {
            CommunityCommand::Create(draft) => draft.validate()?,
            CommunityCommand::AddPost { post, .. } => post.validate()?,
            CommunityCommand::AddGroup { group, .. } => group.validate()?,
            CommunityCommand::FetchAll | CommunityCommand::FetchOne(_) => {}
        }
        Ok(())
    }

    async fn execute(
        api: &Self::Api,
        session: &Session,
        command: &Self::Command,
    ) -> Result<Self::Payload, ApiError> {
        Ok(match command {
            CommunityCommand::FetchAll => CommunityPayload::All(api.list(session).await?),
            CommunityCommand::FetchOne(id) => CommunityPayload::One(api.get(session, id).await?),
            CommunityCommand::Create(draft) => {
                CommunityPayload::Created(api.create(session, draft).await?)
            }
            CommunityCommand::AddPost { community, post } => CommunityPayload::PostAdded {
                community: community.clone(),
                post: api.add_post(session, community, post).await?,
            },
            CommunityCommand::AddGroup { community, group } => CommunityPayload::GroupAdded {
                community: community.clone(),
                group: api.add_group(session, community, group).await?,
            },
        })
    }

    fn apply(state: &mut SliceState<Self>, payload: Self::Payload) {
        match payload {
            CommunityPayload::All(communities) => state.items = communities,
            CommunityPayload::One(community) => state.focused = Some(community),
            CommunityPayload::Created(community) => state.items.push(community),
            CommunityPayload::PostAdded { community, post } => {
                for_each_copy(state, &community, |c| c.push_post(post.clone()));
            }
            CommunityPayload::GroupAdded { community, group } => {
                for_each_copy(state, &community, |c| c.push_group(group.clone()));
            }
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
    use crate::domain::ports::MockCommunityApi;
    use crate::state::SliceStore;

    #[fixture]
    fn session() -> Session {
        Session::new(BearerToken::new("test-token").expect("valid token"))
    }

    fn id(raw: &str) -> ResourceId {
        ResourceId::new(raw).expect("valid id")
    }

    fn community(raw_id: &str, name: &str) -> Community {
        serde_json::from_value(json!({ "_id": raw_id, "name": name })).expect("community decodes")
    }

    fn store(api: MockCommunityApi) -> SliceStore<CommunitiesSlice> {
        let api: Arc<dyn CommunityApi> = Arc::new(api);
        SliceStore::new(api)
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_all_replaces_items(session: Session) {
        let mut api = MockCommunityApi::new();
        api.expect_list()
            .times(1)
            .return_once(|_| Ok(vec![community("c1", "Chess"), community("c2", "Choir")]));
        let store = store(api);

        store
            .dispatch(&session, CommunityCommand::FetchAll)
            .await
            .expect("fetch succeeds");

        let state = store.snapshot();
        assert_eq!(state.items.len(), 2);
        assert!(!state.loading);
    }

    #[rstest]
    #[tokio::test]
    async fn added_post_lands_in_items_and_focused_copy(session: Session) {
        let mut api = MockCommunityApi::new();
        api.expect_list()
            .return_once(|_| Ok(vec![community("c1", "Chess"), community("c2", "Choir")]));
        api.expect_get()
            .return_once(|_, _| Ok(community("c1", "Chess")));
        api.expect_add_post()
            .withf(|_, community, post| community.as_ref() == "c1" && post.content == "Tournament")
            .times(1)
            .return_once(|_, _, post| {
                Ok(serde_json::from_value(json!({ "_id": "p9", "content": post.content }))
                    .expect("post decodes"))
            });
        let store = store(api);
        store
            .dispatch(&session, CommunityCommand::FetchAll)
            .await
            .expect("fetch succeeds");
        store
            .dispatch(&session, CommunityCommand::FetchOne(id("c1")))
            .await
            .expect("fetch succeeds");

        store
            .dispatch(
                &session,
                CommunityCommand::AddPost {
                    community: id("c1"),
                    post: NewPost {
                        content: "Tournament".to_owned(),
                    },
                },
            )
            .await
            .expect("post succeeds");

        let state = store.snapshot();
        assert_eq!(state.items[0].posts.len(), 1);
        assert!(state.items[1].posts.is_empty());
        let focused = state.focused.expect("focused community");
        assert_eq!(focused.posts[0].id.as_ref(), "p9");
        assert!(state.success);
    }

    #[rstest]
    #[tokio::test]
    async fn added_group_is_embedded(session: Session) {
        let mut api = MockCommunityApi::new();
        api.expect_create()
            .return_once(|_, draft| Ok(community("c3", &draft.name)));
        api.expect_add_group().return_once(|_, _, group| {
            Ok(serde_json::from_value(json!({ "_id": "g1", "name": group.name }))
                .expect("group decodes"))
        });
        let store = store(api);
        store
            .dispatch(
                &session,
                CommunityCommand::Create(CommunityDraft {
                    name: "Robotics".to_owned(),
                    description: "Build robots".to_owned(),
                    category: None,
                }),
            )
            .await
            .expect("create succeeds");

        store
            .dispatch(
                &session,
                CommunityCommand::AddGroup {
                    community: id("c3"),
                    group: NewGroup {
                        name: "Drones".to_owned(),
                        description: String::new(),
                    },
                },
            )
            .await
            .expect("group succeeds");

        assert_eq!(store.snapshot().items[0].groups[0].name, "Drones");
    }

    #[rstest]
    #[tokio::test]
    async fn blank_draft_is_rejected_locally(session: Session) {
        let mut api = MockCommunityApi::new();
        api.expect_create().times(0);
        let store = store(api);

        let error = store
            .dispatch(
                &session,
                CommunityCommand::Create(CommunityDraft {
                    name: " ".to_owned(),
                    description: "desc".to_owned(),
                    category: None,
                }),
            )
            .await
            .expect_err("draft rejected");

        assert_eq!(error.to_string(), "name is required");
        assert_eq!(store.snapshot().error.as_deref(), Some("name is required"));
    }
}
