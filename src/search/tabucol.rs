use std::mem;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::color::{Color, Graph, Solution, VertexId};
use crate::error::{ColorError, ColorResult};
use crate::search::conflicts::ConflictEvaluator;
use crate::search::sampler::{Acceptance, MoveSampler};
use crate::search::tabu::{AspirationTable, Move, TabuList};


/** parameters of the TABUCOL search */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuColParams {
    /// number of moves kept in the tabu list
    pub tabu_size: usize,
    /// maximum number of sampled moves per iteration
    pub reps: usize,
    /// iteration budget
    pub max_iterations: usize,
}

impl Default for TabuColParams {
    fn default() -> Self {
        Self { tabu_size: 7, reps: 100, max_iterations: 10_000 }
    }
}

impl TabuColParams {
    /// sets the tabu list size
    pub fn with_tabu_size(mut self, tabu_size:usize) -> Self {
        self.tabu_size = tabu_size;
        self
    }

    /// sets the number of sampled moves per iteration
    pub fn with_reps(mut self, reps:usize) -> Self {
        self.reps = reps;
        self
    }

    /// sets the iteration budget
    pub fn with_max_iterations(mut self, max_iterations:usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /** checks the parameters for a search using k colors.

    # Errors
    `Config` if k, tabu_size, reps or max_iterations is 0.
    */
    pub fn validate(&self, k:usize) -> ColorResult<()> {
        let checks = [
            ("number of colors", k),
            ("tabu_size", self.tabu_size),
            ("reps", self.reps),
            ("max_iterations", self.max_iterations),
        ];
        for (name, value) in checks.iter() {
            if *value < 1 {
                return Err(ColorError::config(format!("{} must be at least 1 (got {})", name, value)));
            }
        }
        Ok(())
    }
}


/** events reported to the trace observer of a search */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// start of an iteration
    Iteration {
        /// iteration number (0-based)
        iteration: usize,
        /// conflicts of the current solution
        conflicts: usize,
    },
    /// a move was applied
    Transition {
        /// iteration number
        iteration: usize,
        /// conflicts before the move
        from: usize,
        /// conflicts after the move
        to: usize,
        /// recolored vertex
        vertex: VertexId,
        /// new color of the vertex
        color: Color,
        /// move made tabu: the vertex with the color it left
        tabu_entry: Move,
        /// tabu list size after recording the move
        tabu_len: usize,
    },
    /// a tabu move was permitted by the aspiration criterion
    TabuPermitted {
        /// iteration number
        iteration: usize,
        /// conflicts before the move
        from: usize,
        /// conflicts after the move
        to: usize,
        /// recolored vertex
        vertex: VertexId,
        /// new color of the vertex
        color: Color,
    },
    /// the aspiration level of a conflict count was lowered
    AspirationUpdated {
        /// conflict count
        level: usize,
        /// new bound
        bound: i64,
    },
    /// a proper coloring was found
    Converged {
        /// iteration number
        iteration: usize,
    },
    /// the iteration budget is exhausted
    Exhausted {
        /// iteration number (equals the budget)
        iteration: usize,
        /// conflicts remaining
        conflicts: usize,
    },
}


/** result of a TABUCOL search */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// proper coloring found
    Converged {
        /// the coloring
        solution: Solution,
        /// number of iterations performed
        iterations: usize,
    },
    /// no proper coloring found within the iteration budget
    Exhausted {
        /// number of iterations performed (the budget)
        iterations: usize,
        /// conflicts of the last solution
        conflicts: usize,
    },
}

impl SearchOutcome {
    /// true if a proper coloring was found
    pub fn is_converged(&self) -> bool { matches!(self, SearchOutcome::Converged { .. }) }

    /// the coloring, if found
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Converged { solution, .. } => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// consumes the outcome, returns the coloring if found
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Converged { solution, .. } => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// number of iterations performed
    pub fn iterations(&self) -> usize {
        match self {
            SearchOutcome::Converged { iterations, .. } => *iterations,
            SearchOutcome::Exhausted { iterations, .. } => *iterations,
        }
    }
}


/**
Runs the TABUCOL local search: looks for a proper coloring of `graph` using
at most k colors.

Starts from a uniformly random coloring. Each iteration:
 1. counts conflicting edges, and stops if there is none
 2. samples recoloring moves on conflicting vertices (see `MoveSampler`)
 3. makes the previous color of the recolored vertex tabu, and moves

All random draws use `rng`. `trace`, if given, observes the search.

# Errors
 - `Config` if a parameter is invalid (checked before searching)
 - `EmptyMoveCandidates` on an internal invariant breach
*/
pub fn tabucol<R:Rng+?Sized>(
    graph:&Graph,
    k:usize,
    params:&TabuColParams,
    rng:&mut R,
    mut trace:Option<&mut dyn FnMut(&TraceEvent)>,
) -> ColorResult<SearchOutcome> {
    params.validate(k)?;
    let mut emit = |event:TraceEvent| {
        if let Some(f) = trace.as_deref_mut() { f(&event) }
    };
    let mut evaluator = ConflictEvaluator::new(graph);
    let sampler = MoveSampler::new(k, params.reps);
    let mut tabu = TabuList::new(params.tabu_size);
    let mut aspiration = AspirationTable::default();
    let mut current = Solution::random(graph.nb_vertices(), k, rng);
    let mut next = current.clone();
    let mut candidates:Vec<VertexId> = Vec::with_capacity(graph.nb_vertices());
    let mut iteration = 0;
    loop {
        let conflicts = evaluator.evaluate(&current, &mut candidates);
        emit(TraceEvent::Iteration { iteration, conflicts });
        if conflicts == 0 {
            tracing::info!(k, iteration, "found a coloring");
            emit(TraceEvent::Converged { iteration });
            return Ok(SearchOutcome::Converged { solution: current, iterations: iteration });
        }
        if iteration >= params.max_iterations {
            tracing::info!(k, iteration, conflicts, "no coloring found");
            emit(TraceEvent::Exhausted { iteration, conflicts });
            return Ok(SearchOutcome::Exhausted { iterations: iteration, conflicts });
        }
        let candidate = match sampler.sample(
            &evaluator, &current, conflicts, &candidates,
            &mut tabu, &mut aspiration, &mut next, rng,
        )? {
            Some(c) => c,
            None => { // single color: the solution can never change
                iteration = params.max_iterations;
                continue;
            }
        };
        if candidate.acceptance == Acceptance::Aspiration {
            emit(TraceEvent::AspirationUpdated { level: conflicts, bound: candidate.conflicts as i64 - 1 });
        }
        if candidate.tabu_overridden {
            tracing::debug!(iteration, from = conflicts, to = candidate.conflicts, "tabu permitted");
            emit(TraceEvent::TabuPermitted {
                iteration,
                from: conflicts,
                to: candidate.conflicts,
                vertex: candidate.mv.vertex,
                color: candidate.mv.color,
            });
        } else if candidate.acceptance.is_accepted() {
            tracing::debug!(iteration, from = conflicts, to = candidate.conflicts, "improved");
        }
        // the color the vertex leaves becomes tabu
        let tabu_entry = Move::new(candidate.mv.vertex, candidate.previous_color);
        tabu.push(tabu_entry);
        emit(TraceEvent::Transition {
            iteration,
            from: conflicts,
            to: candidate.conflicts,
            vertex: candidate.mv.vertex,
            color: candidate.mv.color,
            tabu_entry,
            tabu_len: tabu.len(),
        });
        mem::swap(&mut current, &mut next);
        iteration += 1;
        if iteration % 500 == 0 {
            tracing::trace!(iteration, conflicts = candidate.conflicts, "iteration");
        }
    }
}


/**
Repeats TABUCOL with fewer and fewer colors. Starts with max_degree+1 colors
(always feasible), and after each success, searches again with one color less
than the number of colors actually used. Stops at the first failure.

returns the best coloring found (None only if the very first search fails).
*/
pub fn tabucol_decreasing<R:Rng+?Sized>(
    graph:&Graph,
    params:&TabuColParams,
    rng:&mut R,
    mut trace:Option<&mut dyn FnMut(&TraceEvent)>,
) -> ColorResult<Option<Solution>> {
    let mut sink = |event:&TraceEvent| {
        if let Some(f) = trace.as_deref_mut() { f(event) }
    };
    let mut k = graph.max_degree() + 1;
    let mut best:Option<Solution> = None;
    loop {
        tracing::debug!(k, "starting search");
        match tabucol(graph, k, params, rng, Some(&mut sink))? {
            SearchOutcome::Converged { solution, .. } => {
                let solution = solution.compacted();
                let nb_colors = solution.nb_colors_used();
                tracing::info!(nb_colors, "new best coloring");
                best = Some(solution);
                if nb_colors <= 1 { break; }
                k = nb_colors - 1;
            }
            SearchOutcome::Exhausted { .. } => break,
        }
    }
    Ok(best)
}
