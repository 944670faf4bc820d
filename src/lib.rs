//! TABUCOL: tabu search for the graph coloring problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]


/// graph, solutions and checker
pub mod color;

/// error types
pub mod error;

/// read DIMACS instances
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;

/// tabu search for the graph coloring problem
pub mod search;

pub use color::{Color, Graph, Solution, VertexId};
pub use error::{ColorError, ColorResult};
pub use search::tabucol::{tabucol, tabucol_decreasing, SearchOutcome, TabuColParams, TraceEvent};
