//! This module focuses on reading a serialized city graph from disk and
//! using it to generate a petgraph graph object.

pub mod file;
pub mod petgraph;
