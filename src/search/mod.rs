//! Tabu search for the graph coloring problem.

/// conflict evaluation of a coloring
pub mod conflicts;

/// tabu list and aspiration levels
pub mod tabu;

/// stochastic neighbor generation and acceptance criterion
pub mod sampler;

/// TABUCOL search loop
pub mod tabucol;
