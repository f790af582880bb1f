//! Communities and their embedded posts and groups.
//!
//! Posts and groups live inside their community document. When one is created
//! the client appends it to the embedded array of the community it already
//! holds; there is no separate posts or groups collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DraftValidationError, ResourceId, require_text};

/// A community students can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Grouping used by the community directory.
    #[serde(default)]
    pub category: Option<String>,
    /// User who created the community.
    #[serde(default)]
    pub creator: Option<ResourceId>,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<ResourceId>,
    /// Embedded posts, oldest first.
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Embedded sub-groups.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A post embedded in a community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Author user id.
    #[serde(default)]
    pub author: Option<ResourceId>,
    /// Post body.
    pub content: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A group embedded in a community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ResourceId,
    /// Group name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<ResourceId>,
}

/// Payload for `POST /api/communities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDraft {
    /// Display name, required.
    pub name: String,
    /// Description, required.
    pub description: String,
    /// Optional directory category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CommunityDraft {
    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }
}

/// Payload for `POST /api/communities/:id/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Post body, required.
    pub content: String,
}

impl NewPost {
    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("content", &self.content)
    }
}

/// Payload for `POST /api/communities/:id/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    /// Group name, required.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

impl NewGroup {
    /// Check required fields before submission.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_text("name", &self.name)
    }
}

impl Community {
    /// Append a freshly created post to the embedded list.
    pub fn push_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Append a freshly created group to the embedded list.
    pub fn push_group(&mut self, group: Group) {
        self.groups.push(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_server_document_with_embedded_arrays() {
        let community: Community = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Robotics Club",
            "description": "Build things",
            "members": ["u1", "u2"],
            "posts": [{ "_id": "p1", "author": "u1", "content": "Kickoff friday" }],
            "groups": [{ "_id": "g1", "name": "Drones" }],
            "createdAt": "2024-09-01T10:00:00Z"
        }))
        .expect("community decodes");

        assert_eq!(community.id.as_ref(), "c1");
        assert_eq!(community.members.len(), 2);
        assert_eq!(community.posts[0].content, "Kickoff friday");
        assert_eq!(community.groups[0].name, "Drones");
    }

    #[rstest]
    #[case("", "desc", "name")]
    #[case("Chess", "  ", "description")]
    fn draft_requires_name_and_description(
        #[case] name: &str,
        #[case] description: &str,
        #[case] field: &str,
    ) {
        let draft = CommunityDraft {
            name: name.to_owned(),
            description: description.to_owned(),
            category: None,
        };

        let error = draft.validate().expect_err("draft must be rejected");
        assert_eq!(error, DraftValidationError::missing(field));
    }

    #[rstest]
    fn new_post_requires_content() {
        let post = NewPost {
            content: "\n".to_owned(),
        };
        assert!(post.validate().is_err());
    }
}
