use rand::Rng;

use crate::color::{Color, Solution, VertexId};
use crate::error::{ColorError, ColorResult};
use crate::search::conflicts::ConflictEvaluator;
use crate::search::tabu::{AspirationTable, Move, TabuList};


/** outcome of the acceptance test for one sampled move */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// improving and reaching the aspiration level: accepted even if tabu
    Aspiration,
    /// improving and not tabu: accepted
    Improving,
    /// improving but tabu, and not good enough to aspire: rejected
    TabuRejected,
    /// not improving: rejected (may still be used as the fallback move)
    NotImproving,
}

impl Acceptance {
    /// true if sampling stops on this move
    pub fn is_accepted(self) -> bool {
        matches!(self, Acceptance::Aspiration | Acceptance::Improving)
    }
}

/**
acceptance test of a move going from `conflicts` to `new_conflicts`.
`aspiration_bound` is A(conflicts).
*/
pub fn acceptance(conflicts:usize, new_conflicts:usize, is_tabu:bool, aspiration_bound:i64) -> Acceptance {
    if new_conflicts >= conflicts {
        Acceptance::NotImproving
    } else if (new_conflicts as i64) <= aspiration_bound {
        Acceptance::Aspiration
    } else if is_tabu {
        Acceptance::TabuRejected
    } else {
        Acceptance::Improving
    }
}

/**
draws a color uniformly among the k-1 colors different from `current`.
requires k ≥ 2.
*/
pub fn sample_other_color<R:Rng+?Sized>(current:Color, k:usize, rng:&mut R) -> Color {
    let c = rng.gen_range(0..k-1);
    if c >= current { c+1 } else { c }
}


/** record of a sampled move */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// vertex and its new color
    pub mv: Move,
    /// color of the vertex before the move
    pub previous_color: Color,
    /// conflicts after the move
    pub conflicts: usize,
    /// acceptance test result
    pub acceptance: Acceptance,
    /// true if the move was tabu and got permitted by the aspiration criterion
    pub tabu_overridden: bool,
}


/**
Proposes recoloring moves on conflicting vertices, at most `reps` per iteration.
Stops at the first accepted move; otherwise the last sampled move is used,
improving or not.
*/
#[derive(Debug, Clone, Copy)]
pub struct MoveSampler {
    /// number of colors
    k: usize,
    /// maximum number of sampled moves per iteration
    reps: usize,
}

impl MoveSampler {
    /// creates a sampler for k colors and reps attempts per iteration
    pub fn new(k:usize, reps:usize) -> Self { Self { k, reps } }

    /**
    samples moves from `current` (having `conflicts` conflicts).
    On return, `next` holds the solution produced by the returned candidate.
    An aspiration move updates A(conflicts) and is removed from the tabu list.

    Returns `Ok(None)` if no move exists (single color, or no attempt allowed).

    # Errors
    `EmptyMoveCandidates` if conflicts > 0 but candidates is empty.
    */
    #[allow(clippy::too_many_arguments)]
    pub fn sample<R:Rng+?Sized>(
        &self,
        evaluator:&ConflictEvaluator,
        current:&Solution,
        conflicts:usize,
        candidates:&[VertexId],
        tabu:&mut TabuList,
        aspiration:&mut AspirationTable,
        next:&mut Solution,
        rng:&mut R,
    ) -> ColorResult<Option<Candidate>> {
        if candidates.is_empty() && conflicts > 0 {
            return Err(ColorError::EmptyMoveCandidates { conflicts });
        }
        if self.k < 2 || candidates.is_empty() {
            return Ok(None);
        }
        let mut last = None;
        for _ in 0..self.reps {
            let vertex = candidates[rng.gen_range(0..candidates.len())];
            let previous_color = current.color(vertex);
            let color = sample_other_color(previous_color, self.k, rng);
            let mv = Move::new(vertex, color);
            next.copy_from(current);
            next.set_color(vertex, color);
            let new_conflicts = evaluator.count(next);
            let is_tabu = tabu.contains(&mv);
            let bound = if new_conflicts < conflicts {
                aspiration.get_or_default(conflicts)
            } else {
                i64::MIN // not consulted
            };
            let res = acceptance(conflicts, new_conflicts, is_tabu, bound);
            let mut tabu_overridden = false;
            if res == Acceptance::Aspiration {
                aspiration.set(conflicts, new_conflicts as i64 - 1);
                tabu_overridden = is_tabu && tabu.remove(&mv);
            }
            let candidate = Candidate {
                mv, previous_color, conflicts: new_conflicts, acceptance: res, tabu_overridden
            };
            if res.is_accepted() {
                return Ok(Some(candidate));
            }
            last = Some(candidate);
        }
        Ok(last)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::color::Graph;

    #[test]
    fn test_acceptance_rules() {
        // not improving
        assert_eq!(acceptance(3, 3, false, 2), Acceptance::NotImproving);
        assert_eq!(acceptance(3, 5, true, 2), Acceptance::NotImproving);
        // improving and reaching the aspiration level, tabu or not
        assert_eq!(acceptance(3, 2, true, 2), Acceptance::Aspiration);
        assert_eq!(acceptance(3, 0, false, 2), Acceptance::Aspiration);
        // improving but the level was already reached before
        assert_eq!(acceptance(3, 2, true, 1), Acceptance::TabuRejected);
        assert_eq!(acceptance(3, 2, false, 1), Acceptance::Improving);
        assert!(Acceptance::Improving.is_accepted());
        assert!(!Acceptance::TabuRejected.is_accepted());
    }

    #[test]
    fn test_other_color_is_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize ; 4];
        for _ in 0..4000 {
            counts[sample_other_color(2, 4, &mut rng)] += 1;
        }
        assert_eq!(counts[2], 0);
        for c in &[0,1,3] {
            assert!(counts[*c] > 1100 && counts[*c] < 1570, "{:?}", counts);
        }
    }

    #[test]
    fn test_aspiration_overrides_tabu() {
        // single edge: any recoloring removes the only conflict
        let g = Graph::from_edges(2, &[(0,1)]).unwrap();
        let evaluator = ConflictEvaluator::new(&g);
        let current = Solution::new(vec![0,0]);
        let mut next = current.clone();
        let mut tabu = TabuList::new(7);
        tabu.push(Move::new(0,1));
        tabu.push(Move::new(1,1));
        let mut aspiration = AspirationTable::default();
        let mut rng = StdRng::seed_from_u64(0);
        let candidate = MoveSampler::new(2, 100)
            .sample(&evaluator, &current, 1, &[0,1], &mut tabu, &mut aspiration, &mut next, &mut rng)
            .unwrap().unwrap();
        assert_eq!(candidate.acceptance, Acceptance::Aspiration);
        assert!(candidate.tabu_overridden);
        assert_eq!(candidate.conflicts, 0);
        assert_eq!(candidate.previous_color, 0);
        assert_eq!(candidate.mv.color, 1);
        assert!(!tabu.contains(&candidate.mv));
        assert_eq!(tabu.len(), 1);
        assert_eq!(aspiration.get(1), Some(-1));
        assert_eq!(next.color(candidate.mv.vertex), 1);
        assert_eq!(current, Solution::new(vec![0,0]));
    }

    #[test]
    fn test_fallback_is_last_sample() {
        // triangle colored [0,0,1] with 2 colors: every move keeps one conflict
        let g = Graph::from_edges(3, &[(0,1),(1,2),(2,0)]).unwrap();
        let evaluator = ConflictEvaluator::new(&g);
        let current = Solution::new(vec![0,0,1]);
        let mut next = current.clone();
        let mut tabu = TabuList::new(7);
        let mut aspiration = AspirationTable::default();
        let mut rng = StdRng::seed_from_u64(3);
        let candidate = MoveSampler::new(2, 5)
            .sample(&evaluator, &current, 1, &[0,1], &mut tabu, &mut aspiration, &mut next, &mut rng)
            .unwrap().unwrap();
        assert_eq!(candidate.acceptance, Acceptance::NotImproving);
        assert_eq!(candidate.conflicts, 1);
        assert_eq!(evaluator.count(&next), 1);
        assert_eq!(next.color(candidate.mv.vertex), candidate.mv.color);
        assert!(aspiration.is_empty());
    }

    #[test]
    fn test_single_color_has_no_move() {
        let g = Graph::from_edges(2, &[(0,1)]).unwrap();
        let evaluator = ConflictEvaluator::new(&g);
        let current = Solution::new(vec![0,0]);
        let mut next = current.clone();
        let mut rng = StdRng::seed_from_u64(0);
        let res = MoveSampler::new(1, 100).sample(
            &evaluator, &current, 1, &[0,1],
            &mut TabuList::new(7), &mut AspirationTable::default(), &mut next, &mut rng
        ).unwrap();
        assert_eq!(res, None);
    }

    #[test]
    fn test_empty_candidates_is_fatal() {
        let g = Graph::from_edges(2, &[(0,1)]).unwrap();
        let evaluator = ConflictEvaluator::new(&g);
        let current = Solution::new(vec![0,0]);
        let mut next = current.clone();
        let mut rng = StdRng::seed_from_u64(0);
        let res = MoveSampler::new(2, 100).sample(
            &evaluator, &current, 1, &[],
            &mut TabuList::new(7), &mut AspirationTable::default(), &mut next, &mut rng
        );
        assert!(matches!(res, Err(ColorError::EmptyMoveCandidates { conflicts: 1 })));
    }
}
