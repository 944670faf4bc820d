//! Error types for the graph coloring crate.
//!
//! An exhausted search is not an error: it is reported through
//! [`SearchOutcome::Exhausted`](crate::search::tabucol::SearchOutcome).

use thiserror::Error;

use crate::color::VertexId;

/// Result type alias used throughout the crate.
pub type ColorResult<T> = Result<T, ColorError>;

/// Errors raised while building instances or starting a search.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Invalid search parameter (number of colors, tabu size, repetitions, iterations).
    #[error("configuration error: {message}")]
    Config {
        /// description of the invalid parameter
        message: String,
    },

    /// The graph contains an edge (v,v).
    #[error("self-loop on vertex {vertex}")]
    SelfLoop {
        /// vertex carrying the loop
        vertex: VertexId,
    },

    /// An edge refers to a vertex that does not exist.
    #[error("vertex {vertex} out of range (graph has {nb_vertices} vertices)")]
    VertexOutOfRange {
        /// offending vertex id (0-based)
        vertex: VertexId,
        /// number of vertices declared by the graph
        nb_vertices: usize,
    },

    /// Conflicts remain but no vertex touches a conflicting edge.
    /// Cannot happen unless the conflict evaluation is broken.
    #[error("internal error: {conflicts} conflicts but no move candidate")]
    EmptyMoveCandidates {
        /// conflict count reported by the evaluator
        conflicts: usize,
    },

    /// Malformed instance file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// what went wrong
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorError {
    /// builds a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ColorError::config("k must be at least 1").to_string(),
            "configuration error: k must be at least 1"
        );
        assert_eq!(ColorError::SelfLoop { vertex: 3 }.to_string(), "self-loop on vertex 3");
        assert_eq!(
            ColorError::VertexOutOfRange { vertex: 5, nb_vertices: 4 }.to_string(),
            "vertex 5 out of range (graph has 4 vertices)"
        );
    }
}
