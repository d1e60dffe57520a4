//! Graph Model
//!
//! Entity records plus the graph that owns them and enforces their invariants.

pub mod entities;
pub mod graph;

pub use entities::{
    Comment, CommentId, FollowOutcome, Post, PostId, User, UserId, View, ViewOutcome,
};
pub use graph::{SocialGraph, USERNAME_SEPARATOR};
