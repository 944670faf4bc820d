use bit_set::BitSet;

use crate::color::{Graph, Solution, VertexId};

/**
Counts the conflicting edges of a coloring (adjacent vertices sharing a color).
Runs in O(m) using the edge list. Keeps a bitset buffer so that evaluating
every iteration does not allocate.
*/
#[derive(Debug)]
pub struct ConflictEvaluator<'a> {
    /// reference instance
    graph: &'a Graph,
    /// vertices touching a conflicting edge during the last evaluation
    marked: BitSet,
}

impl<'a> ConflictEvaluator<'a> {
    /// creates an evaluator for the given graph
    pub fn new(graph:&'a Graph) -> Self {
        Self { graph, marked: BitSet::with_capacity(graph.nb_vertices()) }
    }

    /// graph being evaluated
    pub fn graph(&self) -> &'a Graph { self.graph }

    /// number of conflicting edges of sol
    pub fn count(&self, sol:&Solution) -> usize {
        self.graph.edges().iter()
            .filter(|(u,v)| sol.color(*u) == sol.color(*v))
            .count()
    }

    /**
    returns the number of conflicting edges and fills candidates with the
    distinct vertices appearing in at least one of them (increasing order).
    */
    pub fn evaluate(&mut self, sol:&Solution, candidates:&mut Vec<VertexId>) -> usize {
        self.marked.clear();
        candidates.clear();
        let mut nb_conflicts = 0;
        for &(u,v) in self.graph.edges() {
            if sol.color(u) == sol.color(v) {
                nb_conflicts += 1;
                self.marked.insert(u);
                self.marked.insert(v);
            }
        }
        candidates.extend(self.marked.iter());
        nb_conflicts
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_triangle_with_tail() {
        // triangle 0-1-2 and tail 2-3
        let g = Graph::from_edges(4, &[(0,1),(1,2),(2,0),(2,3)]).unwrap();
        let mut evaluator = ConflictEvaluator::new(&g);
        let mut candidates = Vec::new();
        let sol = Solution::new(vec![0,0,1,1]);
        assert_eq!(evaluator.evaluate(&sol, &mut candidates), 2);
        assert_eq!(candidates, vec![0,1,2,3]);
        assert_eq!(evaluator.count(&sol), 2);
        // the buffer is reset between calls
        let sol = Solution::new(vec![0,1,2,0]);
        assert_eq!(evaluator.evaluate(&sol, &mut candidates), 0);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_single_color_counts_every_edge() {
        let g = Graph::from_dimacs_file("insts/other-instances/peterson.col").unwrap();
        let mut evaluator = ConflictEvaluator::new(&g);
        let mut candidates = Vec::new();
        assert_eq!(evaluator.evaluate(&Solution::new(vec![0 ; 10]), &mut candidates), 15);
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn test_no_edges_no_conflict() {
        let g = Graph::from_edges(5, &[]).unwrap();
        let mut evaluator = ConflictEvaluator::new(&g);
        let mut candidates = vec![3];
        assert_eq!(evaluator.evaluate(&Solution::new(vec![0 ; 5]), &mut candidates), 0);
        assert!(candidates.is_empty());
    }
}
