use crate::graph::Graph;
use crate::types::NIL;

/// One journaled bicomp merge of a draw-planar embedding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MergeRecord {
    /// DFI of the step vertex whose Walkdown triggered the merge.
    pub step: usize,
    pub cut_vertex: usize,
    pub in_link: usize,
    pub child_root: usize,
    /// The child bicomp was entered against its outbound side and flipped.
    pub flipped: bool,
}

/// Span data backing a visibility representation: each vertex occupies a
/// horizontal span of columns on its row, each edge one column crossing
/// the rows of its endpoints. Rendering is left to callers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VisibilityData {
    /// Row per vertex slot, in DFI order.
    pub vertex_row: Vec<usize>,
    /// Inclusive column span per vertex slot.
    pub vertex_span: Vec<(usize, usize)>,
    /// Column per edge.
    pub edge_column: Vec<usize>,
    /// The merges that shaped the embedding, in the order they happened.
    pub merges: Vec<MergeRecord>,
}

/// Assigns columns by a left-to-right sweep of the final rotation system
/// and gives every vertex the span of its incident columns.
pub(crate) fn derive_spans(g: &Graph) -> VisibilityData {
    let n = g.n;
    let m = g.m;

    let mut edge_column = vec![NIL; m];
    let mut vertex_span = vec![(0usize, 0usize); n];
    let mut vertex_row = vec![0usize; n];
    let mut next_col = 0;

    for v in 0..n {
        vertex_row[v] = v;
        let mut lo = NIL;
        let mut hi = 0;
        let mut j = g.first_arc[v];
        while j != NIL {
            let e = j / 2;
            if edge_column[e] == NIL {
                edge_column[e] = next_col;
                next_col += 1;
            }
            let col = edge_column[e];
            if lo == NIL || col < lo {
                lo = col;
            }
            if col > hi {
                hi = col;
            }
            j = g.next_arc[j];
        }
        if lo != NIL {
            vertex_span[v] = (lo, hi);
        }
    }

    VisibilityData {
        vertex_row,
        vertex_span,
        edge_column,
        merges: g.merge_journal.clone(),
    }
}
