//! Scenarios
//!
//! A scenario is a TOML description of a cast: users, who follows whom, the
//! posts they write, and the views and comments on those posts. Replaying it
//! builds a fresh [`SocialGraph`] through the normal mutation operations, so
//! every invariant the graph enforces applies to scenario data too.
//!
//! ```toml
//! [[users]]
//! username = "Ari"
//! age = 25
//! gender = "Female"
//!
//! [[posts]]
//! key = "game_night"
//! author = "Ari"
//! content = "Great game tonight!"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{PostId, SocialGraph, UserId};

const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.toml");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub users: Vec<UserSpec>,
    #[serde(default)]
    pub follows: Vec<FollowSpec>,
    #[serde(default)]
    pub posts: Vec<PostSpec>,
    #[serde(default)]
    pub views: Vec<ViewSpec>,
    #[serde(default)]
    pub comments: Vec<CommentSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSpec {
    pub username: String,
    pub age: u32,
    pub gender: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowSpec {
    pub follower: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostSpec {
    /// Scenario-local name used by views and comments
    pub key: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewSpec {
    pub viewer: String,
    pub post: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentSpec {
    pub author: String,
    pub post: String,
    pub content: String,
}

/// A replayed scenario: the graph plus the post keys it was built with
#[derive(Debug)]
pub struct BuiltScenario {
    pub graph: SocialGraph,
    pub posts: HashMap<String, PostId>,
}

impl BuiltScenario {
    pub fn post(&self, key: &str) -> Option<PostId> {
        self.posts.get(key).copied()
    }
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::scenario(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// The bundled four-user demo cast
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SCENARIO)
    }

    /// Replay users, follows, posts, views and comments, in that order
    pub fn build(&self) -> Result<BuiltScenario> {
        let mut graph = SocialGraph::new();

        for user in &self.users {
            graph.add_user(&user.username, user.age, &user.gender)?;
        }

        for follow in &self.follows {
            let follower = lookup_user(&graph, &follow.follower)?;
            let target = lookup_user(&graph, &follow.target)?;
            graph.follow(follower, target)?;
        }

        let mut posts = HashMap::new();
        for spec in &self.posts {
            if posts.contains_key(&spec.key) {
                return Err(Error::scenario(format!(
                    "post key '{}' is used twice",
                    spec.key
                )));
            }
            let author = lookup_user(&graph, &spec.author)?;
            let id = graph.create_post(author, &spec.content)?;
            posts.insert(spec.key.clone(), id);
        }

        for view in &self.views {
            let viewer = lookup_user(&graph, &view.viewer)?;
            let post = lookup_post(&posts, &view.post)?;
            graph.view_post(viewer, post)?;
        }

        for comment in &self.comments {
            let author = lookup_user(&graph, &comment.author)?;
            let post = lookup_post(&posts, &comment.post)?;
            graph.comment_on_post(author, post, &comment.content)?;
        }

        info!(
            users = graph.user_count(),
            posts = graph.post_count(),
            comments = graph.comment_count(),
            "scenario replayed"
        );
        Ok(BuiltScenario { graph, posts })
    }
}

fn lookup_user(graph: &SocialGraph, username: &str) -> Result<UserId> {
    graph
        .user_by_name(username)
        .ok_or_else(|| Error::scenario(format!("unknown user '{}'", username)))
}

fn lookup_post(posts: &HashMap<String, PostId>, key: &str) -> Result<PostId> {
    posts
        .get(key)
        .copied()
        .ok_or_else(|| Error::scenario(format!("unknown post '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenario_builds() {
        let built = Scenario::demo().unwrap().build().unwrap();
        let graph = &built.graph;
        assert_eq!(graph.user_count(), 4);
        assert_eq!(graph.post_count(), 4);
        assert_eq!(graph.comment_count(), 5);

        let justin = graph.user_by_name("Justin").unwrap();
        assert_eq!(graph.user(justin).unwrap().follower_count(), 3);

        let apples = built.post("apples").unwrap();
        assert_eq!(graph.post(apples).unwrap().view_count(), 3);
        graph.verify_invariants().unwrap();
    }

    #[test]
    fn test_unknown_user_is_scenario_error() {
        let source = r#"
            [[users]]
            username = "A"
            age = 1
            gender = "Female"

            [[follows]]
            follower = "A"
            target = "Ghost"
        "#;
        let err = Scenario::from_toml_str(source).unwrap().build().unwrap_err();
        assert_eq!(err.error_code(), "SCENARIO_ERROR");
    }

    #[test]
    fn test_duplicate_post_key_rejected() {
        let source = r#"
            [[users]]
            username = "A"
            age = 1
            gender = "Female"

            [[posts]]
            key = "p"
            author = "A"
            content = "one"

            [[posts]]
            key = "p"
            author = "A"
            content = "two"
        "#;
        let err = Scenario::from_toml_str(source).unwrap().build().unwrap_err();
        assert!(err.to_string().contains("used twice"));
    }

    #[test]
    fn test_graph_errors_propagate() {
        let source = r#"
            [[users]]
            username = "A"
            age = 1
            gender = "Female"

            [[follows]]
            follower = "A"
            target = "A"
        "#;
        let err = Scenario::from_toml_str(source).unwrap().build().unwrap_err();
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Scenario::from_toml_str("[[users]]\nname = \"A\"\n").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_empty_document_is_empty_scenario() {
        let built = Scenario::from_toml_str("").unwrap().build().unwrap();
        assert_eq!(built.graph.user_count(), 0);
    }
}
