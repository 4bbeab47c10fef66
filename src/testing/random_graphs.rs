use crate::EdgeLabel;
use crate::UnGraph;
use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generates a random undirected connected graph on a spanning tree,
/// avoiding self-loops and duplicate edges.
pub(crate) fn random_connected_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();
    let mut present = vec![false; n * n];

    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
        if i > 0 {
            let j = rng.random_range(0..i);
            present[i * n + j] = true;
            present[j * n + i] = true;
            graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
        }
    }

    let mut num_edges = n.saturating_sub(1);
    let limit = n * (n - 1) / 2;

    while num_edges < m.min(limit) {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        if s == t || present[s * n + t] {
            continue;
        }
        present[s * n + t] = true;
        present[t * n + s] = true;
        graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
        num_edges += 1;
    }

    graph
}

/// Generates a random tree.
pub(crate) fn random_tree(n: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
        if i > 0 {
            let j = rng.random_range(0..i);
            graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
        }
    }

    graph
}

/// A random maximal outerplanar graph: a cycle with nested, non-crossing
/// chords. Useful for exercising the outerplanar embedder on positives.
pub(crate) fn random_fan_graph(n: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
    }
    for i in 0..n {
        graph.add_edge(graph.from_index(i), graph.from_index((i + 1) % n), EdgeLabel::Real);
    }
    // Nested chords: each (lo, hi) cycle stretch splits recursively, so
    // chords never cross.
    let mut spans = vec![(0usize, n - 1)];
    while let Some((lo, hi)) = spans.pop() {
        if hi - lo < 3 {
            continue;
        }
        let mid = rng.random_range(lo + 2..hi);
        graph.add_edge(graph.from_index(lo), graph.from_index(mid), EdgeLabel::Real);
        spans.push((lo, mid));
        spans.push((mid, hi));
    }

    graph
}
