//! Popularity reports
//!
//! Snapshots `(entity, metric)` pairs out of a graph, runs them through the
//! stable merge sort and resolves the winners into serializable rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::merge_sort::merge_sort_desc;
use crate::error::Result;
use crate::metrics::PerformanceTimer;
use crate::model::SocialGraph;

/// A user ranked by follower count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    pub rank: usize,
    pub username: String,
    pub follower_count: usize,
}

/// A post ranked by view count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPost {
    pub rank: usize,
    pub author: String,
    pub content: String,
    pub view_count: usize,
}

/// Combined "most popular" report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityReport {
    pub generated_at: DateTime<Utc>,
    pub top_users: Vec<RankedUser>,
    pub top_posts: Vec<RankedPost>,
}

impl PopularityReport {
    pub fn build(graph: &SocialGraph, limit: Option<usize>) -> Result<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            top_users: top_users_by_followers(graph, limit)?,
            top_posts: top_posts_by_views(graph, limit)?,
        })
    }
}

/// Users by follower count, highest first; ties keep registration order.
/// `None` returns every user.
pub fn top_users_by_followers(
    graph: &SocialGraph,
    limit: Option<usize>,
) -> Result<Vec<RankedUser>> {
    let _timer = PerformanceTimer::new("rank_users_by_followers");

    let sorted = merge_sort_desc(&graph.follower_snapshot());
    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, (id, follower_count))| {
            Ok(RankedUser {
                rank: i + 1,
                username: graph.user(id)?.username().to_string(),
                follower_count,
            })
        })
        .collect()
}

/// Posts by view count, highest first; ties keep author-grouped post order.
pub fn top_posts_by_views(graph: &SocialGraph, limit: Option<usize>) -> Result<Vec<RankedPost>> {
    let _timer = PerformanceTimer::new("rank_posts_by_views");

    let sorted = merge_sort_desc(&graph.view_snapshot());
    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, (id, view_count))| {
            let post = graph.post(id)?;
            Ok(RankedPost {
                rank: i + 1,
                author: graph.user(post.author())?.username().to_string(),
                content: post.content().to_string(),
                view_count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[RankedUser]) -> Vec<&str> {
        rows.iter().map(|r| r.username.as_str()).collect()
    }

    #[test]
    fn test_users_ranked_by_followers_with_stable_ties() {
        let mut graph = SocialGraph::new();
        let a = graph.add_user("A", 20, "Female").unwrap();
        let b = graph.add_user("B", 21, "Male").unwrap();
        let c = graph.add_user("C", 22, "Female").unwrap();
        let d = graph.add_user("D", 23, "Male").unwrap();

        graph.follow(a, b).unwrap();
        graph.follow(d, b).unwrap();
        graph.follow(a, c).unwrap();
        graph.follow(b, c).unwrap();
        graph.follow(b, a).unwrap();

        let ranked = top_users_by_followers(&graph, None).unwrap();
        assert_eq!(names(&ranked), vec!["B", "C", "A", "D"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].follower_count, 0);
    }

    #[test]
    fn test_limit_truncates() {
        let mut graph = SocialGraph::new();
        for name in ["A", "B", "C"] {
            graph.add_user(name, 30, "Female").unwrap();
        }
        assert_eq!(top_users_by_followers(&graph, Some(2)).unwrap().len(), 2);
        assert!(top_users_by_followers(&graph, Some(0)).unwrap().is_empty());
    }

    #[test]
    fn test_posts_ranked_by_views() {
        let mut graph = SocialGraph::new();
        let a = graph.add_user("A", 20, "Female").unwrap();
        let b = graph.add_user("B", 21, "Male").unwrap();
        graph.create_post(a, "quiet").unwrap();
        let loud = graph.create_post(b, "loud").unwrap();
        graph.view_post(a, loud).unwrap();

        let ranked = top_posts_by_views(&graph, None).unwrap();
        assert_eq!(ranked[0].content, "loud");
        assert_eq!(ranked[0].author, "B");
        assert_eq!(ranked[1].view_count, 0);
    }

    #[test]
    fn test_empty_graph_report() {
        let report = PopularityReport::build(&SocialGraph::new(), Some(5)).unwrap();
        assert!(report.top_users.is_empty());
        assert!(report.top_posts.is_empty());
    }
}
