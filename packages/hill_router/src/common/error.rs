//! Defines the error taxonomy for the route search core and the loading
//! layer. Errors which a user can trigger (bad constraints, disconnected
//! endpoints) are kept separate from errors which indicate an internal
//! invariant violation (resolving a path which no search should have
//! produced).

use thiserror::Error;

/// Convenient result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// The requested length budget would forbid even the shortest path
    #[error("percent_shortest_path must be at least 1.0, got {value}")]
    InvalidConstraint { value: f64 },

    /// Raised when a route mode string is not recognised
    #[error("unknown route mode: {mode}")]
    InvalidRouteMode { mode: String },

    /// Raised when source and target are disconnected in the graph
    #[error("no path exists between nodes {source_id} and {target}")]
    NoPath { source_id: i64, target: i64 },

    /// Raised when a node id is not present in the graph
    #[error("node {id} is not in the graph")]
    NodeNotFound { id: i64 },

    /// Raised when an ordered node pair has no connecting edge
    #[error("no edge connects node {src} to node {dst}")]
    NoEdge { src: i64, dst: i64 },

    /// Raised when resolving a path with fewer than two nodes
    #[error("a path must contain at least two nodes")]
    EmptyPath,

    /// Raised when consecutive nodes of a supplied path share no edge.
    /// Paths produced by the search engines never trigger this; it guards
    /// against malformed externally supplied paths
    #[error("path is disconnected between nodes {src} and {dst}")]
    DisconnectedPath { src: i64, dst: i64 },

    /// Raised when an operation requires a non-empty graph
    #[error("the graph contains no nodes")]
    EmptyGraph,

    /// Wrapper for IO errors raised while reading a graph file
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for deserialization errors raised while parsing a graph file
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {

    use super::*;

    /// Check that user-facing messages name the offending values
    #[test]
    fn test_error_display() {
        let err = Error::InvalidConstraint { value: 0.5 };
        assert_eq!(
            err.to_string(),
            "percent_shortest_path must be at least 1.0, got 0.5"
        );

        let err = Error::NoPath {
            source_id: 12,
            target: 34,
        };
        assert_eq!(err.to_string(), "no path exists between nodes 12 and 34");
    }
}
