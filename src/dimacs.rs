use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::multi::many1;
use nom::sequence::{preceded, terminated, tuple};

use crate::color::{Graph, VertexId};
use crate::error::{ColorError, ColorResult};


impl Graph {
    /// creates a graph from a DIMACS file
    pub fn from_dimacs_file(filename:&str) -> ColorResult<Self> {
        let (n,_,edges) = read_from_file(filename)?;
        Self::from_edges(n, &edges)
    }

    /// creates a graph from the content of a DIMACS file
    pub fn from_dimacs_str(s:&str) -> ColorResult<Self> {
        let (n,_,edges) = read_from_str(s)?;
        Self::from_edges(n, &edges)
    }
}


/// reads an instance from file, returns (n,m,edges) with 0-based vertex ids
pub fn read_from_file(filename:&str) -> ColorResult<(usize, usize, Vec<(VertexId,VertexId)>)> {
    let content = fs::read_to_string(filename)?;
    read_from_str(&content)
}

/**
reads a DIMACS instance, returns (n,m,edges).
 - lines starting with 'c' are comments, blank lines are ignored
 - header: "p edge n m" (or "p col n m")
 - edges: "e u v" (WARNING: indices start at 1 in the DIMACS format),
   several records may share a line
*/
pub fn read_from_str(s:&str) -> ColorResult<(usize, usize, Vec<(VertexId,VertexId)>)> {
    let mut header:Option<(usize,usize)> = None;
    let mut edges = Vec::new();
    for (i,raw_line) in s.lines().enumerate() {
        let line = raw_line.trim();
        let line_nb = i+1;
        if line.is_empty() || line.starts_with('c') { continue; }
        let parse_error = |message:String| ColorError::Parse { line: line_nb, message };
        if line.starts_with('p') {
            if header.is_some() {
                return Err(parse_error("duplicated header".to_string()));
            }
            let (_,nm) = all_consuming(terminated(read_header, space0))(line)
                .map_err(|e| parse_error(e.to_string()))?;
            header = Some(nm);
        } else if line.starts_with('e') {
            let n = match header {
                None => return Err(parse_error("edge before header".to_string())),
                Some((n,_)) => n,
            };
            let (_,records) = all_consuming(many1(terminated(read_edge, space0)))(line)
                .map_err(|e| parse_error(e.to_string()))?;
            for (a,b) in records {
                for &x in &[a,b] {
                    if x == 0 || x > n {
                        return Err(parse_error(format!("vertex {} not in [1,{}]", x, n)));
                    }
                }
                edges.push((a-1, b-1));
            }
        } else {
            return Err(parse_error(format!("unknown record \"{}\"", line)));
        }
    }
    match header {
        None => Err(ColorError::Parse { line: 0, message: "missing header".to_string() }),
        Some((n,m)) => {
            if edges.len() != m && 2*edges.len() != m {
                tracing::warn!(declared = m, read = edges.len(), "DIMACS edge count mismatch");
            }
            Ok((n, m, edges))
        }
    }
}

/// reads an unsigned integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(s)
}

/// reads two integers, each preceded by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    tuple((preceded(space1, integer), preceded(space1, integer)))(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(alt((tag("p edge"), tag("p col"))), read_two_integers)(s)
}

/// reads an edge record (1-based indices)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tag("e"), read_two_integers)(s)
}
