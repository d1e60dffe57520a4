//! SocialGraph library crate
//!
//! In-memory social graph (users, posts, comments, views, follows), a stable
//! popularity ranking over it, and a neutral node/edge export for rendering.

pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod model;
pub mod ranking;
pub mod scenario;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use export::{Edge, EdgeKind, ExportOptions, GraphExport, Node, NodeKind};
pub use model::*;
pub use ranking::{merge_sort_desc, PopularityReport};
pub use scenario::Scenario;
