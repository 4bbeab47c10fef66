use crate::graph::Graph;
use crate::types::{EdgeType, EmbedOutcome, InternalError, NIL};

/// Reverses the rotation of a single vertex: next/prev swap in every arc,
/// first/last swap, and the external face pair swaps with them.
pub(crate) fn invert_vertex(g: &mut Graph, v: usize) {
    log::trace!("invert vertex {}", v);

    let mut j = g.first_arc[v];
    while j != NIL {
        let temp = g.next_arc[j];
        g.next_arc[j] = g.prev_arc[j];
        g.prev_arc[j] = temp;
        j = temp;
    }

    let temp = g.first_arc[v];
    g.first_arc[v] = g.last_arc[v];
    g.last_arc[v] = temp;

    g.ext_face[v].swap(0, 1);
}

/// Joins the adjacency list of the root copy `r` into the cut vertex `w`.
///
/// Every arc into `r` is first redirected to `w`; once redirected to a
/// parent copy an arc is never redirected again, so the cost is constant
/// per edge over the whole embedding. Then the two circular lists are
/// unioned: `e_w` (w's arc on link `w_prev`) and `e_r` (r's arc on the
/// opposing link) become consecutive, and `e_ext` (r's arc on link
/// `w_prev`) becomes w's new link-`w_prev` arc, keeping w attached to the
/// external face. If `w` has no arcs (a DFS tree root during the final
/// join), it simply receives r's list.
pub(crate) fn merge_vertex(g: &mut Graph, w: usize, w_prev: usize, r: usize) {
    log::trace!("merge vertex r={} into w={} w_in={}", r, w, w_prev);

    let mut j = g.first_arc[r];
    while j != NIL {
        let jtwin = g.twin(j);
        g.neighbor[jtwin] = w;
        j = g.next_arc[j];
    }

    let e_w = g.arc_slot(w, w_prev);
    let e_r = g.arc_slot(r, 1 ^ w_prev);
    let e_ext = g.arc_slot(r, w_prev);

    if e_w != NIL {
        g.set_link(e_w, 1 ^ w_prev, e_r);
        g.set_link(e_r, w_prev, e_w);
        g.set_arc_slot(w, w_prev, e_ext);
        g.set_link(e_ext, 1 ^ w_prev, NIL);
    } else {
        g.set_arc_slot(w, 1 ^ w_prev, e_r);
        g.set_link(e_r, w_prev, NIL);
        g.set_arc_slot(w, w_prev, e_ext);
        g.set_link(e_ext, 1 ^ w_prev, NIL);
    }

    // The root copy is defunct; zero it for reuse.
    g.init_vertex_rec(r);
}

/// Merges all bicomps whose cut vertices have accumulated on the stack.
///
/// Each stack entry pair records a cut vertex with its inbound link and a
/// child bicomp root with its outbound link. Per pop: the external faces
/// are stitched at the cut vertex, the bicomp is flipped when the inbound
/// and outbound links oppose, the child is delisted from the cut vertex's
/// pertinent and separated lists, and the root copy is merged away.
pub(crate) fn merge_bicomps(
    g: &mut Graph,
    _i: usize,
    _root_vertex: usize,
    _w: usize,
    _w_prev: usize,
) -> Result<EmbedOutcome, InternalError> {
    while !g.stack.is_empty() {
        let (r, rout) = g
            .stack
            .pop()
            .ok_or(InternalError("merge stack underflow"))?;
        let (z, z_prev) = g
            .stack
            .pop()
            .ok_or(InternalError("merge stack lost its cut vertex entry"))?;

        // One corner at z joins the new proper face; the other becomes the
        // new external face corner. Update z's links first.
        let ext_face_vertex = g.ext_face[r][1 ^ rout];
        g.ext_face[z][z_prev] = ext_face_vertex;

        if g.ext_face[ext_face_vertex][0] == g.ext_face[ext_face_vertex][1] {
            let link = rout ^ (g.ext_face_inverted[ext_face_vertex] as usize);
            g.ext_face[ext_face_vertex][link] = z;
        } else {
            let link = if g.ext_face[ext_face_vertex][0] == r { 0 } else { 1 };
            g.ext_face[ext_face_vertex][link] = z;
        }

        // Entering z against r's outbound side means the bicomp rooted at
        // r is upside down: invert the root now and leave a sign on its
        // tree edge so the descendants flip during post-processing. The
        // xor accommodates signs promoted onto the root edge by edge
        // reductions in extension algorithms.
        if z_prev == rout {
            if g.first_arc[r] != g.last_arc[r] {
                invert_vertex(g, r);
            }
            let mut j = g.first_arc[r];
            while j != NIL {
                if g.edge_type[j] == EdgeType::TreeChild {
                    g.inverted[j] ^= true;
                    break;
                }
                j = g.next_arc[j];
            }
        }

        // The root slot less n is the DFS child of the root edge and names
        // this bicomp in the cut vertex's lists.
        let child = r - g.n;

        let head = g.pertinent_bicomp_list[z];
        g.pertinent_bicomp_list[z] = g.bicomp_lists.delete(head, child);

        let head = g.separated_dfs_child_list[z];
        g.separated_dfs_child_list[z] = g.dfs_child_lists.delete(head, child);

        merge_vertex(g, z, z_prev, r);
    }

    Ok(EmbedOutcome::Embedded)
}

/// Embeds the back edge from the bicomp root down to the pertinent
/// descendant `w`, forming a new proper face.
///
/// The forward arc leaves the fwd-arc list of the root's parent copy and
/// is spliced into the root's adjacency on `root_side`; its twin, the back
/// arc, is spliced into w on `w_prev` and retargeted at the root. The
/// external face short-circuit then links root and w directly.
pub(crate) fn embed_back_edge_to_descendant(
    g: &mut Graph,
    root_side: usize,
    root_vertex: usize,
    w: usize,
    w_prev: usize,
) -> Result<(), InternalError> {
    let fwd_arc = g.adjacent_to[w];
    if fwd_arc == NIL {
        return Err(InternalError("back edge requested at a non-pertinent vertex"));
    }
    let back_arc = g.twin(fwd_arc);
    let parent_copy = g.parent[root_vertex - g.n];

    log::trace!(
        "embed back edge v={} r={} r_out={} w={} w_in={}",
        parent_copy,
        root_vertex,
        root_side,
        w,
        w_prev
    );

    if g.fwd_arc_list[parent_copy] == fwd_arc {
        g.fwd_arc_list[parent_copy] = g.next_arc[fwd_arc];
        if g.fwd_arc_list[parent_copy] == fwd_arc {
            g.fwd_arc_list[parent_copy] = NIL;
        }
    }
    let p = g.prev_arc[fwd_arc];
    let x = g.next_arc[fwd_arc];
    g.next_arc[p] = x;
    g.prev_arc[x] = p;

    // The adjacency lists of both endpoints are non-empty here, so no NIL
    // guards are needed on the splices.
    let root_slot_arc = g.arc_slot(root_vertex, root_side);
    g.set_link(fwd_arc, 1 ^ root_side, NIL);
    g.set_link(fwd_arc, root_side, root_slot_arc);
    g.set_link(root_slot_arc, 1 ^ root_side, fwd_arc);
    g.set_arc_slot(root_vertex, root_side, fwd_arc);

    let w_slot_arc = g.arc_slot(w, w_prev);
    g.set_link(back_arc, 1 ^ w_prev, NIL);
    g.set_link(back_arc, w_prev, w_slot_arc);
    g.set_link(w_slot_arc, 1 ^ w_prev, back_arc);
    g.set_arc_slot(w, w_prev, back_arc);

    g.neighbor[back_arc] = root_vertex;

    g.ext_face[root_vertex][root_side] = w;
    g.ext_face[w][w_prev] = root_vertex;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_vertex_reverses_rotation() {
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(0, 3).unwrap();
        let before = g.adjacency_list_of(0);
        g.ext_face[0] = [1, 3];
        invert_vertex(&mut g, 0);
        let mut reversed = g.adjacency_list_of(0);
        reversed.reverse();
        assert_eq!(reversed, before);
        assert_eq!(g.ext_face[0], [3, 1]);
        invert_vertex(&mut g, 0);
        assert_eq!(g.adjacency_list_of(0), before);
    }

    #[test]
    fn test_merge_vertex_into_empty_list() {
        // A root copy with a single arc merges into a vertex with no arcs,
        // as happens for DFS tree roots during the final join.
        let mut g = Graph::new();
        g.init_graph(2);
        g.add_edge(0, 1).unwrap();
        // Move 0's arc to the virtual slot 2 by hand.
        let j = g.first_arc[0];
        g.first_arc[0] = NIL;
        g.last_arc[0] = NIL;
        g.first_arc[2] = j;
        g.last_arc[2] = j;
        let twin_j = g.twin(j);
        g.neighbor[twin_j] = 2;

        merge_vertex(&mut g, 0, 0, 2);
        assert_eq!(g.first_arc[0], j);
        assert_eq!(g.last_arc[0], j);
        assert_eq!(g.neighbor[g.twin(j)], 0);
        assert_eq!(g.first_arc[2], NIL);
    }
}
