use crate::embedder_blocks::hooks::{EmbedderOps, VertexActivity, pertinent};
use crate::graph::Graph;
use crate::types::{EmbedOutcome, InternalError, NIL};

/// Walks both external face paths emanating from `root_vertex` (a root
/// copy of the step vertex `i`), embedding every back edge whose
/// pertinence the Walkup recorded, and merging pertinent child bicomps
/// into the growing bicomp as it descends into them.
///
/// Per vertex W of the walk: a pertinent W first triggers the pending
/// merges on the stack and receives its back edge, forming a new proper
/// face. If W has a pertinent child bicomp, the walk hops to that child's
/// root, choosing the next vertex by priority: an internally active
/// vertex on either side first, otherwise a pertinent one; if neither
/// side offers one, the bicomp is blocked and the blocked-descendant
/// handler decides; the core algorithm stops and leaves the blocked root
/// on the stack for obstruction isolation. An inactive W is skipped and later
/// short-circuited off the external face; an externally active W with
/// nothing pertinent is a stopping vertex, since embedding past it would
/// enclose its path to an ancestor of `i`.
///
/// After each side, the root's external face link is short-circuited to
/// the stopping vertex, so inactive stretches are never walked again.
pub(crate) fn walk_down(
    g: &mut Graph,
    ops: &dyn EmbedderOps,
    i: usize,
    root_vertex: usize,
) -> Result<EmbedOutcome, InternalError> {
    log::trace!("walkdown i={} root={}", i, root_vertex);

    g.stack.clear();

    for root_side in 0..2 {
        let mut w = g.ext_face[root_vertex][root_side];
        let mut w_prev;

        if g.ext_face[w][0] == g.ext_face[w][1] {
            // Singleton bicomp: treat the external face as a two-edge
            // cycle with the root and W equally oriented. The inversion
            // flag cannot be set here, because a singleton that was
            // flipped and merged is no longer pertinent.
            w_prev = 1 ^ root_side;
        } else {
            w_prev = if g.ext_face[w][0] == root_vertex { 0 } else { 1 };
            if g.ext_face[w][w_prev] != root_vertex {
                return Err(InternalError("corrupt external face link at bicomp root"));
            }
        }

        while w != root_vertex {
            if g.adjacent_to[w] != NIL {
                // Merge the cut-vertex chain gathered on the stack, then
                // add the back edge (root, w) to form a new proper face.
                if !g.stack.is_empty() {
                    let ret = ops.merge_bicomps(g, i, root_vertex, w, w_prev)?;
                    if ret != EmbedOutcome::Embedded {
                        return Ok(ret);
                    }
                }
                ops.embed_back_edge_to_descendant(g, root_side, root_vertex, w, w_prev)?;
                g.adjacent_to[w] = NIL;
            }

            if g.pertinent_bicomp_list[w] != NIL {
                g.stack.push((w, w_prev));

                // Internally active bicomps were prepended by the Walkup,
                // so the head of the list is the right one to enter.
                let r = g.pertinent_bicomp_list[w] + g.n;

                let x = g.ext_face[r][0];
                let mut x_prev = if g.ext_face[x][1] == r { 1 } else { 0 };
                let y = g.ext_face[r][1];
                let mut y_prev = if g.ext_face[y][0] == r { 0 } else { 1 };

                // Two external face vertices only: the non-root vertex may
                // be oriented against the root under the relaxed
                // orientation scheme.
                if x == y && g.ext_face_inverted[x] {
                    x_prev = 0;
                    y_prev = 1;
                }

                let mut rout = 0;
                if ops.vertex_active_status(g, x, i) == VertexActivity::Internal {
                    w = x;
                    w_prev = x_prev;
                    rout = 0;
                } else if ops.vertex_active_status(g, y, i) == VertexActivity::Internal {
                    w = y;
                    w_prev = y_prev;
                    rout = 1;
                } else if pertinent(g, x) {
                    w = x;
                    w_prev = x_prev;
                    rout = 0;
                } else if pertinent(g, y) {
                    w = y;
                    w_prev = y_prev;
                    rout = 1;
                } else {
                    let ret = ops.handle_blocked_descendant_bicomp(
                        g,
                        i,
                        root_vertex,
                        r,
                        &mut rout,
                        &mut w,
                        &mut w_prev,
                    )?;
                    if ret != EmbedOutcome::Embedded {
                        return Ok(ret);
                    }
                }

                g.stack.push((r, rout));
            } else if ops.vertex_active_status(g, w, i) == VertexActivity::Inactive {
                ops.handle_inactive_vertex(g, root_vertex, &mut w, &mut w_prev)?;
            } else {
                // Externally active, nothing pertinent: stopping vertex.
                break;
            }
        }

        g.ext_face[root_vertex][root_side] = w;
        g.ext_face[w][w_prev] = root_vertex;

        // With only root and W left on the external face, record whether
        // W ended up oriented against the root; a future Walkdown into
        // this bicomp needs that to pick its entry link. The flag must be
        // cleared otherwise, as W may carry a stale setting from an
        // earlier two-vertex configuration.
        g.ext_face_inverted[w] =
            g.ext_face[w][0] == g.ext_face[w][1] && w_prev == root_side;

        if w == root_vertex {
            // Walked all the way around: no external activity remains.
            break;
        }
    }

    Ok(EmbedOutcome::Embedded)
}
