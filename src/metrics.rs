//! Graph statistics and performance timing

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

use crate::model::SocialGraph;

/// Size of a graph at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
    pub views: usize,
    pub follows: usize,
}

impl GraphStats {
    pub fn collect(graph: &SocialGraph) -> Self {
        Self {
            users: graph.user_count(),
            posts: graph.post_count(),
            comments: graph.comment_count(),
            views: graph.posts().map(|p| p.view_count()).sum(),
            follows: graph.users().map(|u| u.following_count()).sum(),
        }
    }

    /// Average followers per user (0 for an empty graph)
    pub fn mean_followers(&self) -> f64 {
        if self.users == 0 {
            return 0.0;
        }
        self.follows as f64 / self.users as f64
    }
}

/// Times one graph operation; logs the elapsed time when dropped
pub struct PerformanceTimer {
    operation: &'static str,
    started: Instant,
}

impl PerformanceTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Warn if the operation has run longer than `threshold_ms` so far
    pub fn log_if_slow(&self, threshold_ms: u64) -> bool {
        let elapsed_ms = self.elapsed_ms();
        let slow = elapsed_ms > threshold_ms;
        if slow {
            warn!(operation = self.operation, elapsed_ms, threshold_ms, "slow graph operation");
        }
        slow
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        debug!(operation = self.operation, elapsed_ms = self.elapsed_ms(), "operation finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_every_relation() {
        let mut graph = SocialGraph::new();
        let a = graph.add_user("A", 20, "Female").unwrap();
        let b = graph.add_user("B", 21, "Male").unwrap();
        let post = graph.create_post(b, "hi").unwrap();
        graph.follow(a, b).unwrap();
        graph.view_post(a, post).unwrap();
        graph.view_post(a, post).unwrap();
        graph.comment_on_post(a, post, "nice").unwrap();

        let stats = GraphStats::collect(&graph);
        assert_eq!(
            stats,
            GraphStats {
                users: 2,
                posts: 1,
                comments: 1,
                views: 1,
                follows: 1,
            }
        );
        assert!((stats.mean_followers() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_graph_mean() {
        assert_eq!(GraphStats::default().mean_followers(), 0.0);
    }

    #[test]
    fn test_timer_threshold() {
        let timer = PerformanceTimer::new("unit");
        assert!(!timer.log_if_slow(60_000));
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.log_if_slow(0));
    }
}
