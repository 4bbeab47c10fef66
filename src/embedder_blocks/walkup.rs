use crate::graph::Graph;
use crate::types::NIL;

/// Establishes pertinence for step `i` along the forward arc `j`.
///
/// The descendant endpoint W of the back edge is marked pertinent by
/// storing `j` in its pertinent-adjacency slot. Two walkers, Zig and Zag,
/// then climb the external faces of the bicomps between W and `i` in
/// opposite directions. Whichever finds the bicomp root first identifies
/// the root edge; the walk hops to the root's parent copy, records the
/// child bicomp in that copy's pertinent list, and repeats until it
/// arrives at `i`.
///
/// Every vertex either walker touches gets its visited info stamped with
/// `i`, and a walker that meets an already-stamped vertex stops: an
/// earlier Walkup of this step has recorded the rest of the ancestor
/// path. The two walkers together therefore do work proportional to the
/// external-face path that the Walkdown will later remove, which is what
/// keeps the whole step linear.
pub(crate) fn walk_up(g: &mut Graph, i: usize, j: usize) {
    let n = g.n;
    let w = g.neighbor[j];

    g.adjacent_to[w] = j;

    let (mut zig, mut zag) = (w, w);
    let (mut zig_prev, mut zag_prev) = (1usize, 0usize);

    log::trace!("walkup i={} w={}", i, w);

    while zig != i {
        let mut r = NIL;
        let next_zig;
        let next_zag;

        let candidate_zig = g.ext_face[zig][1 ^ zig_prev];
        if candidate_zig >= n {
            // Zig reached a bicomp root first.
            if g.visited_info[zig] == i {
                break;
            }
            r = candidate_zig;
            next_zig = candidate_zig;
            next_zag = g.ext_face[r][if g.ext_face[r][0] == zig { 1 } else { 0 }];
            if g.visited_info[next_zag] == i {
                break;
            }
        } else {
            let candidate_zag = g.ext_face[zag][1 ^ zag_prev];
            if candidate_zag >= n {
                // Zag reached a bicomp root first.
                if g.visited_info[zag] == i {
                    break;
                }
                r = candidate_zag;
                next_zag = candidate_zag;
                next_zig = g.ext_face[r][if g.ext_face[r][0] == zag { 1 } else { 0 }];
                if g.visited_info[next_zig] == i {
                    break;
                }
            } else {
                if g.visited_info[zig] == i || g.visited_info[zag] == i {
                    break;
                }
                next_zig = candidate_zig;
                next_zag = candidate_zag;
            }
        }

        g.visited_info[zig] = i;
        g.visited_info[zag] = i;

        if r == NIL {
            // Neither direction hit the root yet; advance both walkers.
            zig_prev = if g.ext_face[next_zig][0] == zig { 0 } else { 1 };
            zig = next_zig;
            zag_prev = if g.ext_face[next_zag][0] == zag { 0 } else { 1 };
            zag = next_zag;
        } else {
            // The slot of the root copy, less n, is the DFS child in the
            // bicomp's root edge and names the bicomp in the lists.
            let child = r - n;
            let parent_copy = g.parent[child];

            // Prepend internally active bicomps, append externally active
            // ones: the Walkdown drains the list head first, so internal
            // activity is always resolved before external activity. A
            // bicomp is externally active iff the lowpoint of its root
            // edge's DFS child reaches an ancestor of i.
            let head = g.pertinent_bicomp_list[parent_copy];
            g.pertinent_bicomp_list[parent_copy] = if g.lowpoint[child] < i {
                g.bicomp_lists.append(head, child)
            } else {
                g.bicomp_lists.prepend(head, child)
            };

            zig = parent_copy;
            zag = parent_copy;
            zig_prev = 1;
            zag_prev = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder_blocks::preprocess::{
        create_sorted_separated_dfs_child_lists, embedding_initialize,
    };

    #[test]
    fn test_walkup_records_ancestor_path_on_triangle() {
        let mut g = Graph::new();
        g.init_graph(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        embedding_initialize(&mut g).unwrap();
        create_sorted_separated_dfs_child_lists(&mut g);

        let i = 0;
        g.visited_info[i] = g.n;
        let j = g.fwd_arc_list[i];
        assert_ne!(j, NIL);
        walk_up(&mut g, i, j);

        // The deepest vertex is pertinent, and each bicomp on the path up
        // to the step vertex is recorded at its parent copy.
        let w = g.neighbor[j];
        assert_eq!(w, 2);
        assert_eq!(g.adjacent_to[w], j);
        assert_eq!(g.pertinent_bicomp_list[1], 2);
        assert_eq!(g.pertinent_bicomp_list[0], 1);
    }

    #[test]
    fn test_walkup_short_circuits_on_visited_info() {
        // Two back edges from the step vertex into the same subtree: the
        // second walkup must stop at the first stamped vertex instead of
        // re-recording the whole path.
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(3, 0).unwrap();
        g.add_edge(2, 0).unwrap();
        embedding_initialize(&mut g).unwrap();
        create_sorted_separated_dfs_child_lists(&mut g);

        let i = 0;
        g.visited_info[i] = g.n;
        let head = g.fwd_arc_list[i];
        let second = g.next_arc[head];
        assert_ne!(second, head);

        walk_up(&mut g, i, head);
        let root_list_after_first = g.pertinent_bicomp_list[0];
        walk_up(&mut g, i, second);

        // The second walkup records its own singleton bicomp at the shared
        // cut vertex, then stops there: the step vertex's list is not
        // appended to again.
        assert_eq!(g.pertinent_bicomp_list[0], root_list_after_first);
        assert_eq!(
            g.bicomp_lists.next_item(g.pertinent_bicomp_list[0], g.pertinent_bicomp_list[0]),
            NIL
        );
        assert_ne!(g.adjacent_to[g.neighbor[second]], NIL);
    }
}
