//! Ranking Module
//!
//! Orders entities by a derived metric (follower count, view count).
//!
//! ## Algorithm
//!
//! A classic top-down merge sort, descending by metric. Stability is part of
//! the contract: entities with equal metrics come out in the order they went
//! in, so reports are reproducible for the same graph.

pub mod merge_sort;
pub mod report;

pub use merge_sort::merge_sort_desc;
pub use report::{
    top_posts_by_views, top_users_by_followers, PopularityReport, RankedPost, RankedUser,
};
