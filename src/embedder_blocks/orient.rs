use crate::embedder_blocks::merge::{invert_vertex, merge_vertex};
use crate::graph::Graph;
use crate::types::{EdgeType, NIL};

/// Imposes one orientation per bicomp on every vertex of the embedding.
///
/// Each surviving root copy (a virtual slot with a non-empty adjacency)
/// roots a bicomp whose vertices may still disagree on rotation
/// direction: merges recorded pending flips as signs on tree-child arcs
/// instead of flipping whole subtrees.
pub(crate) fn orient_vertices_in_embedding(g: &mut Graph) {
    for r in g.n..2 * g.n {
        if g.first_arc[r] != NIL {
            orient_vertices_in_bicomp(g, r, false);
        }
    }
}

/// DFS from the bicomp root along tree-child arcs, carrying the xor of
/// the inversion signs on the path; a vertex whose cumulative sign is set
/// gets inverted. With `preserve_signs`, the signs are left in place so a
/// second invocation can restore the bicomp's prior state.
pub(crate) fn orient_vertices_in_bicomp(g: &mut Graph, bicomp_root: usize, preserve_signs: bool) {
    let mut stack: Vec<(usize, bool)> = vec![(bicomp_root, false)];

    while let Some((v, inverted)) = stack.pop() {
        if inverted {
            invert_vertex(g, v);
        }

        let mut j = g.first_arc[v];
        while j != NIL {
            if g.edge_type[j] == EdgeType::TreeChild {
                stack.push((g.neighbor[j], inverted ^ g.inverted[j]));
                if !preserve_signs {
                    g.inverted[j] = false;
                }
            }
            j = g.next_arc[j];
        }
    }
}

/// Merges every bicomp still rooted at a virtual slot into its parent
/// copy. A separable or disconnected input leaves such roots behind; the
/// result is one adjacency structure per input vertex, with no root
/// copies in play.
pub(crate) fn join_bicomps(g: &mut Graph) {
    for r in g.n..2 * g.n {
        if g.first_arc[r] != NIL {
            let parent = g.parent[r - g.n];
            merge_vertex(g, parent, 0, r);
        }
    }
}
