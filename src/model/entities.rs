//! Entity records
//!
//! Passive value records for users, posts, comments and views. Fields are only
//! written by [`SocialGraph`](super::graph::SocialGraph); everything outside the
//! model reads them through accessors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Handle to a user inside one graph instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

/// Handle to a post inside one graph instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PostId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

/// Handle to a comment inside one graph instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommentId {
    pub(crate) graph: u64,
    pub(crate) index: usize,
}

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    pub(crate) id: UserId,
    pub(crate) username: String,
    pub(crate) age: u32,
    pub(crate) gender: String,
    pub(crate) posts: Vec<PostId>,
    pub(crate) comments: Vec<CommentId>,
    pub(crate) viewed_posts: Vec<PostId>,
    /// Ordered by handle, i.e. by target registration order
    pub(crate) following: BTreeSet<UserId>,
    pub(crate) follower_count: usize,
}

impl User {
    pub(crate) fn new(id: UserId, username: String, age: u32, gender: String) -> Self {
        Self {
            id,
            username,
            age,
            gender,
            posts: Vec::new(),
            comments: Vec::new(),
            viewed_posts: Vec::new(),
            following: BTreeSet::new(),
            follower_count: 0,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Authored posts in creation order
    pub fn posts(&self) -> &[PostId] {
        &self.posts
    }

    /// Authored comments in creation order (secondary index; posts own them)
    pub fn comments(&self) -> &[CommentId] {
        &self.comments
    }

    /// Posts this user has viewed, first view only, in view order
    pub fn viewed_posts(&self) -> &[PostId] {
        &self.viewed_posts
    }

    pub fn following(&self) -> impl Iterator<Item = UserId> + '_ {
        self.following.iter().copied()
    }

    pub fn is_following(&self, target: UserId) -> bool {
        self.following.contains(&target)
    }

    pub fn following_count(&self) -> usize {
        self.following.len()
    }

    pub fn follower_count(&self) -> usize {
        self.follower_count
    }
}

/// A post owned by exactly one author
#[derive(Debug, Clone)]
pub struct Post {
    pub(crate) id: PostId,
    pub(crate) author: UserId,
    pub(crate) content: String,
    pub(crate) comments: Vec<CommentId>,
    pub(crate) viewer_set: HashSet<UserId>,
    pub(crate) view_count: usize,
    pub(crate) created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(id: PostId, author: UserId, content: String) -> Self {
        Self {
            id,
            author,
            content,
            comments: Vec::new(),
            viewer_set: HashSet::new(),
            view_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Comments in insertion order
    pub fn comments(&self) -> &[CommentId] {
        &self.comments
    }

    pub fn has_viewer(&self, user: UserId) -> bool {
        self.viewer_set.contains(&user)
    }

    pub fn viewers(&self) -> impl Iterator<Item = UserId> + '_ {
        self.viewer_set.iter().copied()
    }

    pub fn view_count(&self) -> usize {
        self.view_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A comment; the post is its owner, the author's list is an index
#[derive(Debug, Clone)]
pub struct Comment {
    pub(crate) id: CommentId,
    pub(crate) author: UserId,
    pub(crate) post: PostId,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(id: CommentId, author: UserId, post: PostId, content: String) -> Self {
        Self {
            id,
            author,
            post,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Transient record of a first view. Returned to the caller, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct View {
    pub viewer: UserId,
    pub post: PostId,
    pub occurred_at: DateTime<Utc>,
}

/// Result of [`SocialGraph::view_post`](super::graph::SocialGraph::view_post)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// First view by this user; counters were updated
    Recorded(View),
    /// The user had already viewed the post; nothing changed
    AlreadyViewed,
}

impl ViewOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ViewOutcome::Recorded(_))
    }
}

/// Result of [`SocialGraph::follow`](super::graph::SocialGraph::follow)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    AlreadyFollowing,
}
