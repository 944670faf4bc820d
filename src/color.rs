use std::fs;

use bit_set::BitSet;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{ColorError, ColorResult};

/** Vertex Id (0-based) */
pub type VertexId = usize;

/** Color, an integer in [0,k) */
pub type Color = usize;

/** models an undirected graph without self-loops.
The graph is read-only once built: the search only queries it.
*/
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl Graph {

    /// builds a graph with n vertices from an edge list.
    /// Duplicated edges (in any direction) are only counted once.
    ///
    /// # Errors
    ///  - `SelfLoop` if some edge is (v,v)
    ///  - `VertexOutOfRange` if an endpoint is not in [0,n)
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> ColorResult<Self> {
        let mut adj_list = vec![Vec::new() ; n];
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        let mut res_edges = Vec::with_capacity(edges.len());
        for &(u,v) in edges {
            for &w in &[u,v] {
                if w >= n {
                    return Err(ColorError::VertexOutOfRange { vertex: w, nb_vertices: n });
                }
            }
            if u == v {
                return Err(ColorError::SelfLoop { vertex: u });
            }
            if adj_matrix[u].contains(v) { continue; } // duplicated edge
            adj_matrix[u].insert(v);
            adj_matrix[v].insert(u);
            adj_list[u].push(v);
            adj_list[v].push(u);
            res_edges.push((u.min(v), u.max(v)));
        }
        Ok(Self { n, edges: res_edges, adj_list, adj_matrix })
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// list of vertices adjacent to u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// maximum degree (0 on a graph without vertices)
    pub fn max_degree(&self) -> usize {
        self.adj_list.iter().map(|l| l.len()).max().unwrap_or(0)
    }

    /// edge list, each edge (u,v) given once with u < v
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// returns if u and v are adjacent (O(1))
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = (0..self.n).map(|i| self.degree(i)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
    }

    /** writes a solution into a file. each line corresponds to a color. */
    pub fn write_solution(&self, filename:&str, solution:&Solution) -> ColorResult<()> {
        fs::write(filename, solution_to_string(solution))?;
        Ok(())
    }
}


/** Solution of a graph coloring problem.
colors[v] is the color of vertex v. Stored as a flat vector so cloning
is a bulk copy and recoloring a vertex is a single write.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    colors: Vec<Color>,
}

impl Solution {
    /// creates a solution from a color vector
    pub fn new(colors:Vec<Color>) -> Self { Self { colors } }

    /// n independent uniform draws over k colors (k ≥ 1)
    pub fn random<R:Rng+?Sized>(n:usize, k:usize, rng:&mut R) -> Self {
        Self { colors: (0..n).map(|_| rng.gen_range(0..k)).collect() }
    }

    /// color of vertex v
    pub fn color(&self, v:VertexId) -> Color { self.colors[v] }

    /// recolors vertex v
    pub fn set_color(&mut self, v:VertexId, c:Color) { self.colors[v] = c; }

    /// overwrites this solution with other, reusing the allocation
    pub fn copy_from(&mut self, other:&Solution) { self.colors.clone_from(&other.colors); }

    /// colors of all vertices
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// number of vertices colored
    pub fn len(&self) -> usize { self.colors.len() }

    /// true if no vertex is colored
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// number of distinct colors used
    pub fn nb_colors_used(&self) -> usize {
        let used:BitSet = self.colors.iter().copied().collect();
        used.len()
    }

    /** partition representation: one class per used color, classes ordered
    by color, vertices in increasing order. Unused colors are skipped.
    */
    pub fn to_partition(&self) -> Vec<Vec<VertexId>> {
        let nb = self.colors.iter().max().map_or(0, |c| c+1);
        let mut res:Vec<Vec<VertexId>> = vec![vec![] ; nb];
        for (v,c) in self.colors.iter().enumerate() {
            res[*c].push(v);
        }
        res.into_iter().filter(|e| !e.is_empty()).collect()
    }

    /** relabels colors so that the used ones are exactly [0, nb_colors_used) */
    pub fn compacted(&self) -> Self {
        let mut res = vec![0 ; self.colors.len()];
        for (c,class) in self.to_partition().iter().enumerate() {
            for v in class { res[*v] = c; }
        }
        Self { colors: res }
    }
}


/** writes a string encoding the solution (use this to export the solution) */
pub fn solution_to_string(solution:&Solution) -> String {
    let mut res = String::default();
    for e in solution.to_partition() {
        for v in e {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    res
}


/** result of the solution checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid coloring, using the given number of colors
    Ok(usize),
    /// the solution does not color every vertex (expected, got)
    WrongNumberOfVertices(usize, usize),
    /// two adjacent vertices share a color
    ConflictingEdge(VertexId, VertexId),
}

/**
checks a solution by brute force (every pair of vertices).
returns the number of colors used if the coloring is proper.
*/
pub fn checker(graph:&Graph, sol:&Solution) -> CheckerResult {
    if sol.len() != graph.nb_vertices() {
        return CheckerResult::WrongNumberOfVertices(graph.nb_vertices(), sol.len());
    }
    for u in 0..graph.nb_vertices() {
        for v in u+1..graph.nb_vertices() {
            if graph.are_adjacent(u, v) && sol.color(u) == sol.color(v) {
                return CheckerResult::ConflictingEdge(u, v);
            }
        }
    }
    CheckerResult::Ok(sol.nb_colors_used())
}
