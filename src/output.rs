use crate::graph::Graph;
use crate::types::{InternalError, NIL};

/// Renders the graph in adjacency-list format, the inverse of
/// [`crate::input::adjacency_list_from_str`]. On an embedded graph the
/// neighbor order is the rotation order around each vertex.
pub fn adjacency_list_to_string(g: &Graph) -> String {
    let n = g.order();
    let mut out = format!("N={}\n", n);
    for v in 0..n {
        out.push_str(&format!("{}:", v));
        for w in g.adjacency_list_of(v) {
            out.push_str(&format!(" {}", w));
        }
        out.push_str(" -1\n");
    }
    out.push_str(&format!("{}: -1\n", n));
    out
}

/// Renders the graph as N lines of N ASCII bits.
pub fn adjacency_matrix_to_string(g: &Graph) -> String {
    let n = g.order();
    let mut bits = vec![false; n * n];
    for (u, v) in g.edge_pairs() {
        bits[u * n + v] = true;
        bits[v * n + u] = true;
    }
    let mut out = String::with_capacity(n * (n + 1));
    for i in 0..n {
        for j in 0..n {
            out.push(if bits[i * n + j] { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// Renders a test capture: the graph name, 1-based edge pairs, and the
/// "0 0" terminator.
pub fn test_dat_to_string(name: &str, g: &Graph) -> String {
    let mut out = format!("{}\n", name);
    for (u, v) in g.edge_pairs() {
        out.push_str(&format!("{} {}\n", u + 1, v + 1));
    }
    out.push_str("0 0\n");
    out
}

/// Returns the embedding in DOT format, with each vertex's neighbors in
/// rotation order.
///
/// Intended to be used with `neato`.
pub fn draw_embedding(g: &Graph) -> String {
    let mut output = String::from("graph {\n");
    output.push_str("  mode=sgd;\n");
    output.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

    let n = g.order();
    for slot in 0..n {
        output.push_str(&format!("  {} [label=\"{}\"];\n", slot, g.label[slot]));
    }

    for slot in 0..n {
        let mut j = g.first_arc[slot];
        while j != NIL {
            let w = g.neighbor[j];
            if slot <= w {
                output.push_str(&format!("  {} -- {};\n", slot, w));
            }
            j = g.next_arc[j];
        }
    }
    output.push_str("}\n");
    output
}

/// Writes a string to a file.
pub fn to_file(content: &str, path: &str) -> Result<(), InternalError> {
    std::fs::write(path, content).map_err(|_| InternalError("output file not writable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{adjacency_list_from_str, adjacency_matrix_from_str, test_dat_from_str};

    fn sorted_edges(g: &Graph) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = g
            .edge_pairs()
            .into_iter()
            .map(|(u, v)| (u.min(v), u.max(v)))
            .collect();
        edges.sort();
        edges
    }

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(2, 3).unwrap();
        g
    }

    #[test]
    fn test_adjacency_list_round_trip() {
        let g = sample();
        let text = adjacency_list_to_string(&g);
        let h = adjacency_list_from_str(&text).unwrap();
        assert_eq!(g.order(), h.order());
        assert_eq!(sorted_edges(&g), sorted_edges(&h));
    }

    #[test]
    fn test_adjacency_list_exact_format() {
        let mut g = Graph::new();
        g.init_graph(2);
        g.add_edge(0, 1).unwrap();
        assert_eq!(adjacency_list_to_string(&g), "N=2\n0: 1 -1\n1: 0 -1\n2: -1\n");
    }

    #[test]
    fn test_adjacency_matrix_round_trip() {
        let g = sample();
        let text = adjacency_matrix_to_string(&g);
        let h = adjacency_matrix_from_str(&text).unwrap();
        assert_eq!(sorted_edges(&g), sorted_edges(&h));
    }

    #[test]
    fn test_test_dat_round_trip() {
        let g = sample();
        let text = test_dat_to_string("sample", &g);
        assert!(text.ends_with("0 0\n"));
        let (name, h) = test_dat_from_str(&text).unwrap();
        assert_eq!(name, "sample");
        assert_eq!(sorted_edges(&g), sorted_edges(&h));
    }

    #[test]
    fn test_to_file_round_trips_through_disk() {
        let g = sample();
        let path = std::env::temp_dir().join("planar_embed_adjlist_roundtrip.txt");
        let path = path.to_str().unwrap();
        to_file(&adjacency_list_to_string(&g), path).unwrap();
        let h = crate::input::adjacency_list_from_file(path).unwrap();
        assert_eq!(sorted_edges(&g), sorted_edges(&h));
        assert!(to_file("x", "/nonexistent-dir/planar_embed.txt").is_err());
    }

    #[test]
    fn test_draw_embedding_lists_all_edges() {
        let g = sample();
        let dot = draw_embedding(&g);
        assert!(dot.starts_with("graph {"));
        assert_eq!(dot.matches(" -- ").count(), 4);
    }
}
