//! Node/edge export
//!
//! Projects a [`SocialGraph`] into a neutral list of nodes and edges for an
//! external visualization layer. Layout, colors and shapes belong to that
//! layer; the export only carries identity, labels, tooltips and a weight.
//!
//! Exports are deterministic: the same unmutated graph always yields the same
//! ids in the same order.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::metrics::PerformanceTimer;
use crate::model::{Post, SocialGraph, User, USERNAME_SEPARATOR};

/// Default per-follower size step for user nodes
pub const DEFAULT_USER_WEIGHT_BASE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    User,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// author -> post
    Authorship,
    /// follower -> followed
    Follow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// Export tuning
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// User node weight is `(followers + 1) * user_weight_base`
    pub user_weight_base: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            user_weight_base: DEFAULT_USER_WEIGHT_BASE,
        }
    }
}

/// The exported snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphExport {
    /// Build the export for `graph`
    pub fn from_graph(graph: &SocialGraph, options: &ExportOptions) -> Result<Self> {
        let _timer = PerformanceTimer::new("graph_export");
        let mut export = GraphExport::default();

        for user in graph.users() {
            export.nodes.push(user_node(user, options));
        }

        for user in graph.users() {
            for (index, post_id) in user.posts().iter().enumerate() {
                let post = graph.post(*post_id)?;
                let id = post_node_id(user.username(), index);
                export.nodes.push(Node {
                    id: id.clone(),
                    label: post.content().to_string(),
                    tooltip: post_tooltip(graph, post)?,
                    kind: NodeKind::Post,
                    visual_weight: None,
                });
                export.edges.push(Edge {
                    from: user.username().to_string(),
                    to: id,
                    kind: EdgeKind::Authorship,
                });
            }
        }

        for user in graph.users() {
            for target in user.following() {
                export.edges.push(Edge {
                    from: user.username().to_string(),
                    to: graph.user(target)?.username().to_string(),
                    kind: EdgeKind::Follow,
                });
            }
        }

        debug!(
            nodes = export.nodes.len(),
            edges = export.edges.len(),
            "graph exported"
        );
        Ok(export)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the JSON document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        std::fs::write(path, json).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to write export to {}: {}", path.display(), e),
            ))
        })?;
        info!(path = %path.display(), "export written");
        Ok(())
    }
}

/// Stable id of the `index`-th post of `author`. Usernames never contain the
/// separator, so these ids cannot collide with user node ids.
pub fn post_node_id(author: &str, index: usize) -> String {
    format!("{}{}post-{}", author, USERNAME_SEPARATOR, index)
}

fn user_node(user: &User, options: &ExportOptions) -> Node {
    Node {
        id: user.username().to_string(),
        label: user.username().to_string(),
        tooltip: format!("Followers: {}", user.follower_count()),
        kind: NodeKind::User,
        visual_weight: Some((user.follower_count() as f64 + 1.0) * options.user_weight_base),
    }
}

fn post_tooltip(graph: &SocialGraph, post: &Post) -> Result<String> {
    let mut tooltip = format!("Views: {}\nComments:", post.view_count());
    for comment_id in post.comments() {
        let comment = graph.comment(*comment_id)?;
        let author = graph.user(comment.author())?;
        tooltip.push_str(&format!("\n{}: {}", author.username(), comment.content()));
    }
    Ok(tooltip)
}
