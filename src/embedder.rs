use hashbrown::HashSet;
use petgraph::visit::EdgeRef;

use crate::embedder_blocks::embed::embed_core;
use crate::embedder_blocks::hooks::CoreOps;
use crate::graph::Graph;
use crate::types::{DiGraph, EdgeLabel, EmbedMode, EmbedOutcome, InternalError, NIL, UnGraph};

/// Loads a petgraph graph into the engine's flat store. Parallel edges
/// and self-loops are dropped; the engine embeds simple graphs.
pub fn load_graph(graph: &UnGraph) -> Result<Graph, InternalError> {
    let mut g = Graph::new();
    g.init_graph(graph.node_count());
    g.ensure_edge_capacity(graph.edge_count().max(1));
    let mut seen = HashSet::new();
    for e in graph.edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        if u == v {
            continue;
        }
        if seen.insert((u.min(v), u.max(v))) {
            g.add_edge(u, v)?;
        }
    }
    Ok(g)
}

/// Runs the embedder on a petgraph graph under the given mode and returns
/// the outcome together with the engine graph, which holds either the
/// embedding or the obstruction witness.
pub fn embed_graph(graph: &UnGraph, mode: EmbedMode) -> Result<(EmbedOutcome, Graph), InternalError> {
    let mut g = load_graph(graph)?;
    let outcome = g.embed(mode)?;
    Ok((outcome, g))
}

/// Tests planarity by edge addition. Assumes a simple graph.
///
/// Returns whether the graph is planar, and a directed graph that holds
/// the rotation system on success (the out-edges of every vertex appear
/// in the cyclic order of a crossing-free drawing) or, when
/// `with_obstruction` is set, the isolated subgraph homeomorphic to K5 or
/// K3,3 on failure.
///
/// Reference:
/// [On the Cutting Edge: Simplified O(n) Planarity by Edge Addition](https://www.emis.de/journals/JGAA/accepted/2004/BoyerMyrvold2004.8.3.pdf)
pub fn is_planar(graph: &UnGraph, with_obstruction: bool) -> (bool, DiGraph) {
    mode_check(graph, EmbedMode::Planar, with_obstruction)
}

/// Tests outerplanarity: planarity with every vertex on the outer face.
/// On failure the witness is homeomorphic to K4 or K2,3.
pub fn is_outerplanar(graph: &UnGraph, with_obstruction: bool) -> (bool, DiGraph) {
    mode_check(graph, EmbedMode::Outerplanar, with_obstruction)
}

fn mode_check(graph: &UnGraph, mode: EmbedMode, with_obstruction: bool) -> (bool, DiGraph) {
    let mut g = load_graph(graph).expect("graph loads into the engine store");
    let outcome = if with_obstruction {
        g.embed(mode)
    } else {
        let ops = match mode {
            EmbedMode::Outerplanar => CoreOps::OUTERPLANAR_DECIDE,
            _ => CoreOps::PLANAR_DECIDE,
        };
        g.mode = Some(mode);
        embed_core(&mut g, &ops)
    }
    .expect("embedder invariants hold");

    match outcome {
        EmbedOutcome::Embedded => (true, embedding_to_digraph(&g)),
        EmbedOutcome::Nonembeddable => {
            let mut out = DiGraph::new();
            for v in 0..graph.node_count() {
                out.add_node(v as u32);
            }
            if with_obstruction {
                for &(u, v) in g.obstruction_edges() {
                    let (a, b) = (petgraph::graph::NodeIndex::new(u), petgraph::graph::NodeIndex::new(v));
                    out.add_edge(a, b, EdgeLabel::Real);
                    out.add_edge(b, a, EdgeLabel::Real);
                }
            }
            (false, out)
        }
    }
}

/// The rotation system of an embedded graph as a directed graph: each
/// vertex's out-edges are inserted in rotation order.
pub fn embedding_to_digraph(g: &Graph) -> DiGraph {
    let n = g.order();
    let mut out = DiGraph::new();
    let mut node = vec![petgraph::graph::NodeIndex::new(0); n];
    for v in 0..n {
        node[v] = out.add_node(v as u32);
    }
    for slot in 0..n {
        let from = g.label[slot];
        let mut j = g.first_arc[slot];
        while j != NIL {
            let to = g.label[g.neighbor[j]];
            out.add_edge(node[from], node[to], EdgeLabel::Real);
            j = g.next_arc[j];
        }
    }
    out
}
