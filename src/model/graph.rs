//! Social graph model
//!
//! `SocialGraph` owns every user, post and comment in arenas and is the only
//! place that mutates them. Each operation validates all of its handles before
//! touching any state, so a failed call leaves the graph exactly as it was.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument, trace};

use super::entities::{
    Comment, CommentId, FollowOutcome, Post, PostId, User, UserId, View, ViewOutcome,
};
use crate::error::{Error, Result};

static NEXT_GRAPH_TAG: AtomicU64 = AtomicU64::new(1);

/// Reserved in usernames; export node ids for posts are `{username}/post-{i}`
pub const USERNAME_SEPARATOR: char = '/';

/// In-memory graph of users, posts and comments
#[derive(Debug)]
pub struct SocialGraph {
    tag: u64,
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    usernames: HashMap<String, UserId>,
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialGraph {
    pub fn new() -> Self {
        Self {
            tag: NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed),
            users: Vec::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            usernames: HashMap::new(),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Register a user. Usernames are unique within the graph and may not contain
    /// [`USERNAME_SEPARATOR`].
    #[instrument(skip(self, gender))]
    pub fn add_user(&mut self, username: &str, age: u32, gender: &str) -> Result<UserId> {
        if username.trim().is_empty() {
            return Err(Error::invalid_operation("username cannot be empty"));
        }
        if username.contains(USERNAME_SEPARATOR) {
            return Err(Error::invalid_operation(format!(
                "username '{}' contains reserved character '{}'",
                username, USERNAME_SEPARATOR
            )));
        }
        if self.usernames.contains_key(username) {
            return Err(Error::invalid_operation(format!(
                "username '{}' is already taken",
                username
            )));
        }

        let id = UserId {
            graph: self.tag,
            index: self.users.len(),
        };
        self.users
            .push(User::new(id, username.to_string(), age, gender.to_string()));
        self.usernames.insert(username.to_string(), id);

        debug!(user = username, "user registered");
        Ok(id)
    }

    /// Create a post owned by `author`
    #[instrument(skip(self, content))]
    pub fn create_post(&mut self, author: UserId, content: &str) -> Result<PostId> {
        self.check_user(author)?;

        let id = PostId {
            graph: self.tag,
            index: self.posts.len(),
        };
        self.posts.push(Post::new(id, author, content.to_string()));
        self.users[author.index].posts.push(id);

        debug!(author = %self.users[author.index].username, post = id.index, "post created");
        Ok(id)
    }

    /// Attach a comment to `post`, indexed under `author` as well
    #[instrument(skip(self, content))]
    pub fn comment_on_post(
        &mut self,
        author: UserId,
        post: PostId,
        content: &str,
    ) -> Result<CommentId> {
        self.check_user(author)?;
        self.check_post(post)?;

        let id = CommentId {
            graph: self.tag,
            index: self.comments.len(),
        };
        self.comments
            .push(Comment::new(id, author, post, content.to_string()));
        self.posts[post.index].comments.push(id);
        self.users[author.index].comments.push(id);

        debug!(author = %self.users[author.index].username, post = post.index, "comment added");
        Ok(id)
    }

    /// Register a view. Repeat views by the same user are no-ops.
    #[instrument(skip(self))]
    pub fn view_post(&mut self, viewer: UserId, post: PostId) -> Result<ViewOutcome> {
        self.check_user(viewer)?;
        self.check_post(post)?;

        let target = &mut self.posts[post.index];
        if !target.viewer_set.insert(viewer) {
            trace!(post = post.index, "duplicate view ignored");
            return Ok(ViewOutcome::AlreadyViewed);
        }
        target.view_count += 1;
        self.users[viewer.index].viewed_posts.push(post);

        debug!(viewer = %self.users[viewer.index].username, post = post.index, "view recorded");
        Ok(ViewOutcome::Recorded(View {
            viewer,
            post,
            occurred_at: Utc::now(),
        }))
    }

    /// Make `follower` follow `target`. Repeat follows are no-ops; self-follow is rejected.
    #[instrument(skip(self))]
    pub fn follow(&mut self, follower: UserId, target: UserId) -> Result<FollowOutcome> {
        self.check_user(follower)?;
        self.check_user(target)?;
        if follower == target {
            return Err(Error::invalid_operation(format!(
                "user '{}' cannot follow itself",
                self.users[follower.index].username
            )));
        }

        if !self.users[follower.index].following.insert(target) {
            trace!("duplicate follow ignored");
            return Ok(FollowOutcome::AlreadyFollowing);
        }
        self.users[target.index].follower_count += 1;

        debug!(
            follower = %self.users[follower.index].username,
            target = %self.users[target.index].username,
            "follow recorded"
        );
        Ok(FollowOutcome::Followed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.check_user(id)?;
        Ok(&self.users[id.index])
    }

    pub fn post(&self, id: PostId) -> Result<&Post> {
        self.check_post(id)?;
        Ok(&self.posts[id.index])
    }

    pub fn comment(&self, id: CommentId) -> Result<&Comment> {
        if id.graph != self.tag || id.index >= self.comments.len() {
            return Err(Error::invalid_operation(
                "comment does not belong to this graph",
            ));
        }
        Ok(&self.comments[id.index])
    }

    pub fn user_by_name(&self, username: &str) -> Option<UserId> {
        self.usernames.get(username).copied()
    }

    /// Users in registration order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Posts grouped by author: authors in registration order, posts in creation order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.users
            .iter()
            .flat_map(move |user| user.posts.iter().map(move |p| &self.posts[p.index]))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Users following `user`, derived by scanning follow sets
    pub fn followers_of(&self, user: UserId) -> Result<Vec<UserId>> {
        self.check_user(user)?;
        Ok(self
            .users
            .iter()
            .filter(|u| u.following.contains(&user))
            .map(|u| u.id)
            .collect())
    }

    /// `(user, follower count)` pairs in registration order
    pub fn follower_snapshot(&self) -> Vec<(UserId, usize)> {
        self.users.iter().map(|u| (u.id, u.follower_count)).collect()
    }

    /// `(post, view count)` pairs in author-grouped post order
    pub fn view_snapshot(&self) -> Vec<(PostId, usize)> {
        self.posts().map(|p| (p.id, p.view_count)).collect()
    }

    /// Recompute every derived counter and cross-reference and compare against stored state
    pub fn verify_invariants(&self) -> Result<()> {
        let mut expected_followers = vec![0usize; self.users.len()];
        for user in &self.users {
            for target in &user.following {
                self.check_user(*target)?;
                if *target == user.id {
                    return Err(Error::invariant(format!(
                        "user '{}' follows itself",
                        user.username
                    )));
                }
                expected_followers[target.index] += 1;
            }
        }

        for (user, expected) in self.users.iter().zip(expected_followers) {
            if user.follower_count != expected {
                return Err(Error::invariant(format!(
                    "user '{}' has follower_count {} but {} followers",
                    user.username, user.follower_count, expected
                )));
            }
            for post in &user.posts {
                if self.post(*post)?.author != user.id {
                    return Err(Error::invariant(format!(
                        "user '{}' lists post {} authored by someone else",
                        user.username, post.index
                    )));
                }
            }
            for post in &user.viewed_posts {
                if !self.post(*post)?.viewer_set.contains(&user.id) {
                    return Err(Error::invariant(format!(
                        "user '{}' viewed post {} without being a viewer",
                        user.username, post.index
                    )));
                }
            }
        }

        let mut viewed_total = 0usize;
        for post in &self.posts {
            if post.view_count != post.viewer_set.len() {
                return Err(Error::invariant(format!(
                    "post {} has view_count {} but {} viewers",
                    post.id.index,
                    post.view_count,
                    post.viewer_set.len()
                )));
            }
            viewed_total += post.view_count;
            if !self.user(post.author)?.posts.contains(&post.id) {
                return Err(Error::invariant(format!(
                    "post {} is missing from its author's posts",
                    post.id.index
                )));
            }
        }
        let listed_total: usize = self.users.iter().map(|u| u.viewed_posts.len()).sum();
        if listed_total != viewed_total {
            return Err(Error::invariant(format!(
                "{} views recorded on posts but {} listed by viewers",
                viewed_total, listed_total
            )));
        }

        for comment in &self.comments {
            let author = self.user(comment.author)?;
            let post = self.post(comment.post)?;
            if !post.comments.contains(&comment.id) || !author.comments.contains(&comment.id) {
                return Err(Error::invariant(format!(
                    "comment {} is not indexed by both its post and its author",
                    comment.id.index
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Handle validation
    // ========================================================================

    fn check_user(&self, id: UserId) -> Result<()> {
        if id.graph != self.tag || id.index >= self.users.len() {
            return Err(Error::invalid_operation(
                "user does not belong to this graph",
            ));
        }
        Ok(())
    }

    fn check_post(&self, id: PostId) -> Result<()> {
        if id.graph != self.tag || id.index >= self.posts.len() {
            return Err(Error::invalid_operation(
                "post does not belong to this graph",
            ));
        }
        Ok(())
    }
}
