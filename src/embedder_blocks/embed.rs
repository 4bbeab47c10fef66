use crate::embedder_blocks::hooks::{CoreOps, DrawOps, EmbedderOps};
use crate::embedder_blocks::isolate::{
    ObstructionKind, contains_k23_homeomorph, isolate_k23_homeomorph, isolate_obstruction,
    minor_flag_for,
};
use crate::embedder_blocks::preprocess::{
    create_sorted_separated_dfs_child_lists, embedding_initialize,
};
use crate::embedder_blocks::walkdown::walk_down;
use crate::embedder_blocks::walkup::walk_up;
use crate::graph::Graph;
use crate::types::{EmbedMode, EmbedOutcome, InternalError, NIL};

impl Graph {
    /// Embeds the graph under the given mode.
    ///
    /// On `Embedded`, the graph holds a combinatorial embedding: the
    /// cyclic arc order around each vertex admits a crossing-free drawing
    /// on the sphere (with all vertices on the outer face for the
    /// outerplanar modes). On `Nonembeddable`, the graph is reduced to a
    /// witness subgraph homeomorphic to a topological obstruction, and
    /// [`Graph::minor_type`] names it.
    ///
    /// The graph must be freshly loaded (edges added, not yet embedded);
    /// reinitialize and reload to embed again.
    pub fn embed(&mut self, mode: EmbedMode) -> Result<EmbedOutcome, InternalError> {
        self.mode = Some(mode);
        match mode {
            EmbedMode::Planar => embed_core(self, &CoreOps::PLANAR),
            EmbedMode::Outerplanar => embed_core(self, &CoreOps::OUTERPLANAR),
            EmbedMode::DrawPlanar => {
                self.merge_journal.clear();
                self.visibility = None;
                embed_core(self, &DrawOps)
            }
            EmbedMode::SearchK33 => search_k33(self),
            EmbedMode::SearchK23 => search_k23(self),
        }
    }
}

/// The edge-addition driver: in reverse DFI order, establish pertinence
/// with Walkups over the step vertex's forward arcs, then embed with a
/// Walkdown per pertinent DFS child.
///
/// Vertex settings made in step `i` are consumed when ancestors of `i`
/// are processed, which the reverse order guarantees. Visited info is
/// stamped with `n` at the start of each step, so any value above `i`
/// reads as "unvisited in this step" without a clearing pass.
pub(crate) fn embed_core(
    g: &mut Graph,
    ops: &dyn EmbedderOps,
) -> Result<EmbedOutcome, InternalError> {
    g.snapshot_edges();

    let n = g.n;
    if n == 0 {
        return ops.embed_postprocess(g, 0, EmbedOutcome::Embedded);
    }

    // Edge-count bound: beyond it the graph cannot embed, and the
    // obstruction isolator does not need a blocked embedding to work.
    let over_bound = if ops.outerplanar() {
        n >= 2 && g.m > 2 * n - 3
    } else {
        n >= 3 && g.m > 3 * n - 6
    };
    if over_bound {
        return ops.embed_postprocess(g, n - 1, EmbedOutcome::Nonembeddable);
    }

    embedding_initialize(g)?;
    create_sorted_separated_dfs_child_lists(g);

    let mut ret = EmbedOutcome::Embedded;
    let mut last_step = 0;

    for i in (0..n).rev() {
        ret = EmbedOutcome::Embedded;
        g.visited_info[i] = n;

        // Pertinence: one Walkup per cycle edge from i to a descendant.
        let mut j = g.fwd_arc_list[i];
        while j != NIL {
            walk_up(g, i, j);
            j = g.next_arc[j];
            if j == g.fwd_arc_list[i] {
                j = NIL;
            }
        }

        // Embedding: one Walkdown per pertinent DFS child bicomp.
        let head = g.sorted_dfs_child_list[i];
        let mut child = head;
        while child != NIL {
            if g.pertinent_bicomp_list[child] != NIL {
                let r = walk_down(g, ops, i, child + n)?;
                if r == EmbedOutcome::Nonembeddable {
                    ret = r;
                    break;
                }
            }
            child = g.sorted_dfs_child_lists.next_item(head, child);
        }

        // The Walkup may have recorded pertinent roots on i itself to
        // avoid extra tests; they are dealt with in later steps.
        g.pertinent_bicomp_list[i] = NIL;

        if g.fwd_arc_list[i] != NIL || ret == EmbedOutcome::Nonembeddable {
            ret = ops.handle_blocked_embed_iteration(g, i)?;
            if ret != EmbedOutcome::Embedded {
                last_step = i;
                break;
            }
        }
    }

    ops.embed_postprocess(g, last_step, ret)
}

/// SEARCH-K3,3: repeated planarity with reduction of innocuous K5
/// homeomorphs. When the isolated Kuratowski subgraph is a K5, one of its
/// edges is removed and the embedder retries; only an isolated K3,3 is
/// reported as found. Each round removes an edge, so the loop terminates.
fn search_k33(g: &mut Graph) -> Result<EmbedOutcome, InternalError> {
    loop {
        let outcome = embed_core(g, &CoreOps::PLANAR_DECIDE)?;
        if outcome == EmbedOutcome::Embedded {
            return Ok(EmbedOutcome::Embedded);
        }

        let snapshot = g.edge_snapshot.clone();
        let found = isolate_obstruction(g.n, &snapshot, false)?;
        if found.kind == ObstructionKind::K33 {
            g.reload_from_edges(&found.edges)?;
            g.mode = Some(EmbedMode::SearchK33);
            g.minor_type = minor_flag_for(found.kind);
            g.obstruction = found.edges;
            return Ok(EmbedOutcome::Nonembeddable);
        }

        log::debug!("search-K3,3: reducing an innocuous {:?} homeomorph", found.kind);
        let drop = found.edges[0];
        let reduced: Vec<(usize, usize)> =
            snapshot.into_iter().filter(|&e| e != drop).collect();
        g.reload_from_edges(&reduced)?;
        g.mode = Some(EmbedMode::SearchK33);
    }
}

/// SEARCH-K2,3: decides K2,3-homeomorph containment exactly (two
/// vertices with three internally disjoint paths of length at least two
/// between them) and isolates a witness when one exists. A graph whose
/// only outerplanarity obstructions are K4 homeomorphs reports "not
/// found" and is embedded as far as outerplanarity allows.
fn search_k23(g: &mut Graph) -> Result<EmbedOutcome, InternalError> {
    g.snapshot_edges();
    let snapshot = g.edge_snapshot.clone();

    if contains_k23_homeomorph(g.n, &snapshot) {
        let found = isolate_k23_homeomorph(g.n, &snapshot)?;
        g.reload_from_edges(&found.edges)?;
        g.mode = Some(EmbedMode::SearchK23);
        g.minor_type = minor_flag_for(found.kind);
        g.obstruction = found.edges;
        return Ok(EmbedOutcome::Nonembeddable);
    }

    // No K2,3 homeomorph anywhere; the outerplanar embedding either
    // succeeds or is blocked only by K4 homeomorphs, which this mode
    // treats as innocuous.
    let outcome = embed_core(g, &CoreOps::OUTERPLANAR_DECIDE)?;
    if outcome == EmbedOutcome::Nonembeddable {
        g.reload_from_edges(&snapshot)?;
        g.mode = Some(EmbedMode::SearchK23);
    }
    Ok(EmbedOutcome::Embedded)
}
