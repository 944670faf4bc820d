use std::collections::{HashMap, VecDeque};

use serde::{Serialize, Deserialize};

use crate::color::{Color, VertexId};

/**
Decision of changing the color of a vertex.
Stored in the tabu list as (vertex, color it left), which forbids reverting.
*/
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// vertex to color
    pub vertex: VertexId,
    /// color to use
    pub color: Color,
}

impl Move {
    /// creates a move
    pub fn new(vertex:VertexId, color:Color) -> Self { Self { vertex, color } }
}


/**
FIFO memory of the last `capacity` moves.
Pushing into a full list evicts the oldest entry.
*/
#[derive(Debug, Clone)]
pub struct TabuList {
    /// maximum number of moves kept
    capacity: usize,
    /// moves, oldest first
    moves: VecDeque<Move>,
}

impl TabuList {
    /** creates an empty tabu list.

    # Panics
    Panics if `capacity` is 0.
    */
    pub fn new(capacity:usize) -> Self {
        assert!(capacity > 0, "called `TabuList::new()` with zero capacity");
        Self { capacity, moves: VecDeque::with_capacity(capacity+1) }
    }

    /// true if the move is currently tabu
    pub fn contains(&self, m:&Move) -> bool { self.moves.contains(m) }

    /// appends a move, returns the evicted one if the list was full
    pub fn push(&mut self, m:Move) -> Option<Move> {
        self.moves.push_back(m);
        if self.moves.len() > self.capacity {
            self.moves.pop_front()
        } else {
            None
        }
    }

    /// removes the oldest occurrence of m (others keep their order). returns true if found
    pub fn remove(&mut self, m:&Move) -> bool {
        match self.moves.iter().position(|e| e == m) {
            None => false,
            Some(i) => { self.moves.remove(i); true }
        }
    }

    /// number of tabu moves
    pub fn len(&self) -> usize { self.moves.len() }

    /// true if no move is tabu
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }

    /// maximum number of moves kept
    pub fn capacity(&self) -> usize { self.capacity }

    /// moves, oldest first
    pub fn iter(&self) -> impl Iterator<Item=&Move> + '_ { self.moves.iter() }
}


/**
Aspiration levels A(z): for each conflict count z, the bound a candidate
leaving z must reach (f(s') <= A(z)) to be accepted even if tabu.
A(z) defaults to z-1 and callers only ever lower it.
*/
#[derive(Debug, Clone, Default)]
pub struct AspirationTable {
    /// levels[z]: current bound for conflict count z
    levels: HashMap<usize, i64>,
}

impl AspirationTable {
    /// bound for level z, initialized to z-1 on first access
    pub fn get_or_default(&mut self, z:usize) -> i64 {
        *self.levels.entry(z).or_insert(z as i64 - 1)
    }

    /// bound for level z if already set
    pub fn get(&self, z:usize) -> Option<i64> { self.levels.get(&z).copied() }

    /// overwrites the bound for level z. callers must only lower it
    pub fn set(&mut self, z:usize, value:i64) {
        debug_assert!(
            self.levels.get(&z).map_or(true, |b| value < *b),
            "aspiration level {} can only decrease", z
        );
        self.levels.insert(z, value);
    }

    /// number of levels encountered
    pub fn len(&self) -> usize { self.levels.len() }

    /// true if no level was encountered
    pub fn is_empty(&self) -> bool { self.levels.is_empty() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_list_evicts_oldest() {
        let mut tabu = TabuList::new(2);
        assert_eq!(tabu.push(Move::new(0,1)), None);
        assert_eq!(tabu.push(Move::new(1,1)), None);
        assert_eq!(tabu.push(Move::new(2,0)), Some(Move::new(0,1)));
        assert_eq!(tabu.len(), 2);
        assert!(!tabu.contains(&Move::new(0,1)));
        assert!(tabu.contains(&Move::new(2,0)));
    }

    #[test]
    fn test_tabu_list_remove_keeps_order() {
        let mut tabu = TabuList::new(7);
        for v in 0..4 { tabu.push(Move::new(v,0)); }
        assert!(tabu.remove(&Move::new(1,0)));
        assert!(!tabu.remove(&Move::new(1,0)));
        let remaining:Vec<VertexId> = tabu.iter().map(|m| m.vertex).collect();
        assert_eq!(remaining, vec![0,2,3]);
    }

    #[test]
    fn test_tabu_list_duplicates() {
        let mut tabu = TabuList::new(3);
        tabu.push(Move::new(0,0));
        tabu.push(Move::new(0,0));
        assert!(tabu.remove(&Move::new(0,0)));
        assert!(tabu.contains(&Move::new(0,0)));
    }

    #[test]
    #[should_panic]
    fn test_tabu_list_zero_capacity() {
        TabuList::new(0);
    }

    #[test]
    fn test_aspiration_default_and_update() {
        let mut aspiration = AspirationTable::default();
        assert_eq!(aspiration.get(5), None);
        assert_eq!(aspiration.get_or_default(5), 4);
        assert_eq!(aspiration.get(5), Some(4));
        aspiration.set(5, 1);
        assert_eq!(aspiration.get_or_default(5), 1);
        assert_eq!(aspiration.get_or_default(1), 0);
        assert_eq!(aspiration.len(), 2);
    }
}
