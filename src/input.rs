use crate::graph::Graph;
use crate::types::InternalError;
use hashbrown::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};

/// This is equivalent to [`adjacency_list_from_str`], but takes a file
/// path as input.
pub fn adjacency_list_from_file(path: &str) -> Result<Graph, InternalError> {
    let file = File::open(path).map_err(|_| InternalError("adjacency list file not readable"))?;
    parse_adjacency_list(BufReader::new(file))
}

/// Reads a graph in adjacency-list format:
///
/// ```text
/// N=4
/// 0: 1 2 -1
/// 1: 0 -1
/// 2: 0 -1
/// 3: -1
/// 4: -1
/// ```
///
/// The header names the vertex count, each vertex line ends with -1, and
/// the trailing line repeats the vertex count. Both directions of an edge
/// may be listed; duplicates collapse.
pub fn adjacency_list_from_str(input: &str) -> Result<Graph, InternalError> {
    parse_adjacency_list(BufReader::new(Cursor::new(input)))
}

fn parse_adjacency_list<R: BufRead>(reader: R) -> Result<Graph, InternalError> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .and_then(|l| l.ok())
        .ok_or(InternalError("adjacency list is missing its header"))?;
    let n: usize = header
        .trim()
        .strip_prefix("N=")
        .and_then(|v| v.parse().ok())
        .ok_or(InternalError("adjacency list header is not N=<count>"))?;

    let mut g = Graph::new();
    g.init_graph(n);
    let mut seen = HashSet::new();

    for line in lines {
        let line = line.map_err(|_| InternalError("adjacency list line not readable"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (vertex, rest) = line
            .split_once(':')
            .ok_or(InternalError("adjacency list line is missing its colon"))?;
        let u: usize = vertex
            .trim()
            .parse()
            .map_err(|_| InternalError("adjacency list vertex is not a number"))?;
        if u == n {
            // The trailing "<N>: -1" line closes the list.
            break;
        }
        if u > n {
            return Err(InternalError("adjacency list vertex out of range"));
        }

        let mut terminated = false;
        for token in rest.split_whitespace() {
            if token == "-1" {
                terminated = true;
                break;
            }
            let v: usize = token
                .parse()
                .map_err(|_| InternalError("adjacency list neighbor is not a number"))?;
            if v >= n {
                return Err(InternalError("adjacency list neighbor out of range"));
            }
            if v != u && seen.insert((u.min(v), u.max(v))) {
                g.add_edge(u, v)?;
            }
        }
        if !terminated {
            return Err(InternalError("adjacency list line is missing its -1 mark"));
        }
    }

    Ok(g)
}

/// Reads a graph in adjacency-matrix format: N lines of N ASCII bits.
pub fn adjacency_matrix_from_str(input: &str) -> Result<Graph, InternalError> {
    let rows: Vec<&str> = input.lines().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();
    let n = rows.len();

    let mut g = Graph::new();
    g.init_graph(n);

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(InternalError("adjacency matrix is not square"));
        }
        for (j, bit) in row.bytes().enumerate() {
            match bit {
                b'0' => {}
                b'1' => {
                    if i < j {
                        g.add_edge(i, j)?;
                    }
                }
                _ => return Err(InternalError("adjacency matrix cell is not a bit")),
            }
        }
    }

    Ok(g)
}

/// This is equivalent to [`adjacency_matrix_from_str`], but takes a file
/// path as input.
pub fn adjacency_matrix_from_file(path: &str) -> Result<Graph, InternalError> {
    let content =
        std::fs::read_to_string(path).map_err(|_| InternalError("matrix file not readable"))?;
    adjacency_matrix_from_str(&content)
}

/// Reads a test capture: a graph name line, then 1-based "u v" edge pairs,
/// terminated by "0 0".
pub fn test_dat_from_str(input: &str) -> Result<(String, Graph), InternalError> {
    let mut lines = input.lines();
    let name = lines
        .next()
        .ok_or(InternalError("test capture is missing its name line"))?
        .trim()
        .to_string();

    let mut edges = Vec::new();
    let mut max_vertex = 0;
    let mut terminated = false;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let u: usize = parts
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(InternalError("test capture edge is malformed"))?;
        let v: usize = parts
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(InternalError("test capture edge is malformed"))?;
        if (u, v) == (0, 0) {
            terminated = true;
            break;
        }
        if u == 0 || v == 0 {
            return Err(InternalError("test capture vertices are 1-based"));
        }
        max_vertex = max_vertex.max(u).max(v);
        edges.push((u - 1, v - 1));
    }
    if !terminated {
        return Err(InternalError("test capture is missing its 0 0 terminator"));
    }

    let mut g = Graph::new();
    g.init_graph(max_vertex);
    let mut seen = HashSet::new();
    for (u, v) in edges {
        if u != v && seen.insert((u.min(v), u.max(v))) {
            g.add_edge(u, v)?;
        }
    }
    Ok((name, g))
}

/// This is equivalent to [`test_dat_from_str`], but takes a file path.
pub fn test_dat_from_file(path: &str) -> Result<(String, Graph), InternalError> {
    let content =
        std::fs::read_to_string(path).map_err(|_| InternalError("test capture not readable"))?;
    test_dat_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_list_from_str() {
        let input = "N=3\n0: 1 2 -1\n1: 0 -1\n2: 0 -1\n3: -1\n";
        let g = adjacency_list_from_str(input).unwrap();
        assert_eq!(g.order(), 3);
        assert_eq!(g.size(), 2);
        assert_eq!(g.adjacency_list_of(0), vec![1, 2]);
    }

    #[test]
    fn test_adjacency_list_rejects_bad_header() {
        assert!(adjacency_list_from_str("3 vertices\n").is_err());
        assert!(adjacency_list_from_str("N=2\n0: 1\n").is_err());
    }

    #[test]
    fn test_adjacency_matrix_from_str() {
        let g = adjacency_matrix_from_str("011\n101\n110\n").unwrap();
        assert_eq!(g.order(), 3);
        assert_eq!(g.size(), 3);
        assert!(adjacency_matrix_from_str("01\n1\n").is_err());
    }

    #[test]
    fn test_test_dat_from_str() {
        let (name, g) = test_dat_from_str("triangle\n1 2\n2 3\n3 1\n0 0\n").unwrap();
        assert_eq!(name, "triangle");
        assert_eq!(g.order(), 3);
        assert_eq!(g.size(), 3);
        assert!(test_dat_from_str("unterminated\n1 2\n").is_err());
    }
}
