use crate::graph::Graph;
use crate::types::{EdgeType, InternalError, NIL};

/// DFS-numbers the graph and builds every index the Walkup/Walkdown needs:
/// edge types, sorted DFS child lists, forward-arc lists, least ancestors,
/// lowpoints, and the DFS-tree embedding of singleton bicomps.
///
/// The DFS is a single iterative pass. Tree edges are typed when their
/// child end is popped; edges to already-visited vertices are typed as
/// back/forward pairs on the spot, and the forward arc is moved from the
/// ancestor's adjacency list into its circular forward-arc list. Vertices
/// are then sorted into DFI order, lowpoints are computed by a descending
/// sweep, and each tree edge becomes its own biconnected component rooted
/// at the child's virtual vertex.
pub(crate) fn embedding_initialize(g: &mut Graph) -> Result<(), InternalError> {
    let n = g.n;

    if g.stack_capacity < 2 * g.arc_capacity {
        return Err(InternalError("stack capacity below twice the arc capacity"));
    }
    if g.sorted_by_dfi {
        return Err(InternalError("graph is already DFS-numbered"));
    }

    g.stack.clear();
    g.visited.clear();

    let mut dfi = 0;
    for root in 0..n {
        if dfi >= n {
            break;
        }
        if g.visited.contains(root) {
            continue;
        }

        // DFS one connected component. The sentinel frame carries the
        // component root; stale frames to already-visited vertices are
        // simply dropped when popped.
        g.stack.push((NIL, NIL));
        while let Some((uparent, e)) = g.stack.pop() {
            let u = if uparent == NIL { root } else { g.neighbor[e] };
            if g.visited.contains(u) {
                continue;
            }

            log::trace!("dfs visit v={} dfi={} parent={}", u, dfi, uparent as isize);

            g.visited.insert(u);
            g.index[u] = dfi;
            dfi += 1;
            g.parent[u] = uparent;

            if e != NIL {
                g.edge_type[e] = EdgeType::TreeChild;
                let twin_e = g.twin(e);
                g.edge_type[twin_e] = EdgeType::TreeParent;

                let head = g.sorted_dfs_child_list[uparent];
                g.sorted_dfs_child_list[uparent] =
                    g.sorted_dfs_child_lists.append(head, g.index[u]);

                // Seed the virtual vertex paired with u's DFI with the
                // tree-child arc; the DFS-tree embedding below finishes it.
                let r = g.index[u] + n;
                g.first_arc[r] = e;
                g.last_arc[r] = e;
            }

            let mut j = g.first_arc[u];
            while j != NIL {
                let w = g.neighbor[j];
                if !g.visited.contains(w) {
                    g.stack.push((u, j));
                } else if g.edge_type[j] != EdgeType::TreeParent {
                    g.edge_type[j] = EdgeType::Back;
                    let jtwin = g.twin(j);
                    g.edge_type[jtwin] = EdgeType::Forward;

                    // Unlink the forward arc from the ancestor's adjacency.
                    let jprev = g.prev_arc[jtwin];
                    let jnext = g.next_arc[jtwin];
                    if jprev != NIL {
                        g.next_arc[jprev] = jnext;
                    } else {
                        g.first_arc[w] = jnext;
                    }
                    if jnext != NIL {
                        g.prev_arc[jnext] = jprev;
                    } else {
                        g.last_arc[w] = jprev;
                    }

                    // Splice it at the tail of the ancestor's circular
                    // forward-arc list. Back edges are discovered in
                    // ascending descendant DFI, so the list stays sorted.
                    let head = g.fwd_arc_list[w];
                    if head != NIL {
                        let tail = g.prev_arc[head];
                        g.prev_arc[jtwin] = tail;
                        g.next_arc[jtwin] = head;
                        g.prev_arc[head] = jtwin;
                        g.next_arc[tail] = jtwin;
                    } else {
                        g.fwd_arc_list[w] = jtwin;
                        g.prev_arc[jtwin] = jtwin;
                        g.next_arc[jtwin] = jtwin;
                    }

                    let wdfi = g.index[w];
                    if wdfi < g.least_ancestor[u] {
                        g.least_ancestor[u] = wdfi;
                    }
                }
                j = g.next_arc[j];
            }
        }
    }

    g.sort_vertices();

    // Descending sweep: every child is processed before its parent.
    for i in (0..n).rev() {
        let mut least = i;
        let head = g.sorted_dfs_child_list[i];
        let mut child = head;
        while child != NIL {
            if g.lowpoint[child] < least {
                least = g.lowpoint[child];
            }
            child = g.sorted_dfs_child_lists.next_item(head, child);
        }
        if g.least_ancestor[i] < least {
            least = g.least_ancestor[i];
        }
        g.lowpoint[i] = least;
    }

    create_dfs_tree_embedding(g);

    Ok(())
}

/// Reduces every vertex's adjacency to its tree-parent arc and gives the
/// tree-child arc to the child's virtual vertex, so each tree edge starts
/// out as a singleton bicomp with its external face links in place.
///
/// Back arcs vanish from the lists here; each one is reachable as the twin
/// of a forward arc and is relinked when that forward arc is embedded.
pub(crate) fn create_dfs_tree_embedding(g: &mut Graph) {
    let n = g.n;
    for i in 0..n {
        let r = i + n;
        if g.parent[i] == NIL {
            g.first_arc[i] = NIL;
            g.last_arc[i] = NIL;
        } else {
            let j = g.first_arc[r];
            g.prev_arc[j] = NIL;
            g.next_arc[j] = NIL;

            let jtwin = g.twin(j);
            g.neighbor[jtwin] = r;
            g.first_arc[i] = jtwin;
            g.last_arc[i] = jtwin;
            g.prev_arc[jtwin] = NIL;
            g.next_arc[jtwin] = NIL;

            g.ext_face[r] = [i, i];
            g.ext_face[i] = [r, r];
        }
    }
}

/// Builds each vertex's `separatedDFSChildList`, sorted by child lowpoint.
///
/// A bucket sort over the lowpoint values gives O(n) worst case: lowpoints
/// lie in [0, n), collisions only happen between equal keys, so draining
/// the buckets in order appends children in non-descending lowpoint order.
pub(crate) fn create_sorted_separated_dfs_child_lists(g: &mut Graph) {
    let n = g.n;

    g.bin.reset();
    g.buckets.fill(NIL);

    for i in 0..n {
        let l = g.lowpoint[i];
        g.buckets[l] = g.bin.append(g.buckets[l], i);
    }

    for b in 0..n {
        let head = g.buckets[b];
        let mut item = head;
        while item != NIL {
            let p = g.parent[item];
            if p != NIL {
                g.separated_dfs_child_list[p] =
                    g.dfs_child_lists.append(g.separated_dfs_child_list[p], item);
            }
            item = g.bin.next_item(head, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        g.init_graph(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g
    }

    #[test]
    fn test_dfi_assignment_on_triangle() {
        let mut g = triangle();
        embedding_initialize(&mut g).unwrap();
        assert!(g.sorted_by_dfi);
        // The DFS explores the last-pushed arc first: 0, then 2, then 1.
        assert_eq!(g.label[0], 0);
        assert_eq!(g.label[1], 2);
        assert_eq!(g.label[2], 1);
        for i in 0..3 {
            assert_eq!(g.index[i], i);
        }
        assert_eq!(g.parent[0], NIL);
        assert_eq!(g.parent[1], 0);
        assert_eq!(g.parent[2], 1);
    }

    #[test]
    fn test_edge_types_and_fwd_arc_list() {
        let mut g = triangle();
        embedding_initialize(&mut g).unwrap();
        // Exactly one back/forward pair: the cycle-closing edge, whose
        // forward arc belongs to the DFS root's forward-arc list.
        let back = (0..6).filter(|&j| g.edge_type[j] == EdgeType::Back).count();
        let fwd = (0..6).filter(|&j| g.edge_type[j] == EdgeType::Forward).count();
        assert_eq!((back, fwd), (1, 1));
        for j in 0..6 {
            assert!(g.edge_type[j].is_twin_of(g.edge_type[g.twin(j)]));
        }
        let j = g.fwd_arc_list[0];
        assert_ne!(j, NIL);
        assert_eq!(g.edge_type[j], EdgeType::Forward);
        assert_eq!(g.neighbor[j], 2);
    }

    #[test]
    fn test_lowpoint_on_triangle() {
        let mut g = triangle();
        embedding_initialize(&mut g).unwrap();
        assert_eq!(g.lowpoint, {
            let mut lp = vec![NIL; 6];
            lp[0] = 0;
            lp[1] = 0;
            lp[2] = 0;
            lp
        });
        assert_eq!(g.least_ancestor[2], 0);
    }

    #[test]
    fn test_lowpoint_on_path() {
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        embedding_initialize(&mut g).unwrap();
        // A path has no back edges, so each lowpoint is the DFI itself.
        for i in 0..4 {
            assert_eq!(g.lowpoint[i], i);
            assert_eq!(g.least_ancestor[i], NIL);
            assert_eq!(g.fwd_arc_list[i], NIL);
        }
    }

    #[test]
    fn test_singleton_bicomps_after_initialize() {
        let mut g = triangle();
        embedding_initialize(&mut g).unwrap();
        let n = 3;
        for i in 1..3 {
            let r = i + n;
            // The child holds only the tree-parent arc, retargeted at the
            // root copy; the root copy holds only the tree-child arc.
            let jtwin = g.first_arc[i];
            assert_eq!(g.last_arc[i], jtwin);
            assert_eq!(g.neighbor[jtwin], r);
            let j = g.first_arc[r];
            assert_eq!(g.twin(jtwin), j);
            assert_eq!(g.neighbor[j], i);
            assert_eq!(g.ext_face[r], [i, i]);
            assert_eq!(g.ext_face[i], [r, r]);
        }
        // The DFS root starts with an empty adjacency list.
        assert_eq!(g.first_arc[0], NIL);
    }

    #[test]
    fn test_separated_child_lists_sorted_by_lowpoint() {
        // Vertex 0 with two subtrees: one hanging free (lowpoint = own
        // DFI), one tied back to 0 (lowpoint 0). The tied-back child must
        // come first.
        let mut g = Graph::new();
        g.init_graph(5);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(0, 3).unwrap();
        g.add_edge(3, 4).unwrap();
        embedding_initialize(&mut g).unwrap();
        create_sorted_separated_dfs_child_lists(&mut g);

        let head = g.separated_dfs_child_list[0];
        let mut lows = Vec::new();
        let mut c = head;
        while c != NIL {
            lows.push(g.lowpoint[c]);
            c = g.dfs_child_lists.next_item(head, c);
        }
        assert_eq!(lows.len(), 2);
        assert!(lows[0] <= lows[1]);
        assert_eq!(lows[0], 0);
    }

    #[test]
    fn test_disconnected_components_get_distinct_roots() {
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(2, 3).unwrap();
        embedding_initialize(&mut g).unwrap();
        let roots = (0..4).filter(|&i| g.parent[i] == NIL).count();
        assert_eq!(roots, 2);
        for i in 0..4 {
            assert_eq!(g.index[i], i);
        }
    }

    #[test]
    fn test_initialize_twice_is_an_error() {
        let mut g = triangle();
        embedding_initialize(&mut g).unwrap();
        assert!(embedding_initialize(&mut g).is_err());
    }
}
