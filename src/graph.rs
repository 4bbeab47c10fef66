use fixedbitset::FixedBitSet;

use crate::embedder_blocks::visibility::{MergeRecord, VisibilityData};
use crate::list_collection::ListCollection;
use crate::types::{EdgeType, EmbedMode, InternalError, MinorType, NIL};

/// The flat graph store of the edge-addition embedder.
///
/// Vertices occupy 2N slots: real vertices at [0, N), virtual "root copy"
/// vertices at [N, 2N). The root copy paired with DFS child `c` lives at
/// slot `c + N` and stands in for c's parent at the root of the singleton
/// bicomp created from the tree edge (parent(c), c). Arcs come in twin
/// pairs: arc `j` and arc `j ^ 1` are the two directions of one edge.
///
/// All storage is allocated by [`Graph::init_graph`] and reused in place;
/// merging a bicomp reclaims its root-copy slot by zeroing it.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) n: usize,
    pub(crate) m: usize,
    pub(crate) arc_capacity: usize,
    pub(crate) stack_capacity: usize,
    pub(crate) sorted_by_dfi: bool,
    pub(crate) mode: Option<EmbedMode>,
    pub(crate) minor_type: MinorType,

    // Per-vertex fields, 2N slots each.
    pub(crate) index: Vec<usize>,
    pub(crate) label: Vec<usize>,
    pub(crate) parent: Vec<usize>,
    pub(crate) least_ancestor: Vec<usize>,
    pub(crate) lowpoint: Vec<usize>,
    pub(crate) visited: FixedBitSet,
    pub(crate) visited_info: Vec<usize>,
    pub(crate) adjacent_to: Vec<usize>,
    pub(crate) sorted_dfs_child_list: Vec<usize>,
    pub(crate) separated_dfs_child_list: Vec<usize>,
    pub(crate) pertinent_bicomp_list: Vec<usize>,
    pub(crate) fwd_arc_list: Vec<usize>,
    pub(crate) first_arc: Vec<usize>,
    pub(crate) last_arc: Vec<usize>,
    pub(crate) ext_face: Vec<[usize; 2]>,
    pub(crate) ext_face_inverted: Vec<bool>,

    // Per-arc fields, 2 * arc_capacity slots each.
    pub(crate) neighbor: Vec<usize>,
    pub(crate) next_arc: Vec<usize>,
    pub(crate) prev_arc: Vec<usize>,
    pub(crate) edge_type: Vec<EdgeType>,
    pub(crate) inverted: Vec<bool>,

    // Shared collections and scratch.
    pub(crate) sorted_dfs_child_lists: ListCollection,
    pub(crate) dfs_child_lists: ListCollection,
    pub(crate) bicomp_lists: ListCollection,
    pub(crate) bin: ListCollection,
    pub(crate) buckets: Vec<usize>,
    pub(crate) stack: Vec<(usize, usize)>,

    pub(crate) edge_snapshot: Vec<(usize, usize)>,
    pub(crate) obstruction: Vec<(usize, usize)>,
    pub(crate) merge_journal: Vec<MergeRecord>,
    pub(crate) visibility: Option<VisibilityData>,
}

impl Graph {
    /// An empty graph. Call [`Graph::init_graph`] before adding edges.
    pub fn new() -> Self {
        Self {
            n: 0,
            m: 0,
            arc_capacity: 0,
            stack_capacity: 0,
            sorted_by_dfi: false,
            mode: None,
            minor_type: MinorType::NONE,
            index: Vec::new(),
            label: Vec::new(),
            parent: Vec::new(),
            least_ancestor: Vec::new(),
            lowpoint: Vec::new(),
            visited: FixedBitSet::new(),
            visited_info: Vec::new(),
            adjacent_to: Vec::new(),
            sorted_dfs_child_list: Vec::new(),
            separated_dfs_child_list: Vec::new(),
            pertinent_bicomp_list: Vec::new(),
            fwd_arc_list: Vec::new(),
            first_arc: Vec::new(),
            last_arc: Vec::new(),
            ext_face: Vec::new(),
            ext_face_inverted: Vec::new(),
            neighbor: Vec::new(),
            next_arc: Vec::new(),
            prev_arc: Vec::new(),
            edge_type: Vec::new(),
            inverted: Vec::new(),
            sorted_dfs_child_lists: ListCollection::new(0),
            dfs_child_lists: ListCollection::new(0),
            bicomp_lists: ListCollection::new(0),
            bin: ListCollection::new(0),
            buckets: Vec::new(),
            stack: Vec::new(),
            edge_snapshot: Vec::new(),
            obstruction: Vec::new(),
            merge_journal: Vec::new(),
            visibility: None,
        }
    }

    /// Allocates storage for `n` vertices and the default arc capacity of
    /// `3n` edges (above the 3n-6 planar bound). All per-embedding state
    /// is reset.
    pub fn init_graph(&mut self, n: usize) {
        self.n = n;
        let arc_capacity = 3 * n;
        self.index = vec![NIL; 2 * n];
        self.label = vec![NIL; 2 * n];
        self.parent = vec![NIL; 2 * n];
        self.least_ancestor = vec![NIL; 2 * n];
        self.lowpoint = vec![NIL; 2 * n];
        self.visited = FixedBitSet::with_capacity(2 * n);
        self.visited_info = vec![NIL; 2 * n];
        self.adjacent_to = vec![NIL; 2 * n];
        self.sorted_dfs_child_list = vec![NIL; 2 * n];
        self.separated_dfs_child_list = vec![NIL; 2 * n];
        self.pertinent_bicomp_list = vec![NIL; 2 * n];
        self.fwd_arc_list = vec![NIL; 2 * n];
        self.first_arc = vec![NIL; 2 * n];
        self.last_arc = vec![NIL; 2 * n];
        self.ext_face = vec![[NIL; 2]; 2 * n];
        self.ext_face_inverted = vec![false; 2 * n];
        self.sorted_dfs_child_lists = ListCollection::new(n);
        self.dfs_child_lists = ListCollection::new(n);
        self.bicomp_lists = ListCollection::new(n);
        self.bin = ListCollection::new(n);
        self.buckets = vec![NIL; n];
        self.m = 0;
        self.arc_capacity = 0;
        self.neighbor = Vec::new();
        self.next_arc = Vec::new();
        self.prev_arc = Vec::new();
        self.edge_type = Vec::new();
        self.inverted = Vec::new();
        self.ensure_edge_capacity(arc_capacity);
        self.sorted_by_dfi = false;
        self.mode = None;
        self.minor_type = MinorType::NONE;
        self.edge_snapshot.clear();
        self.obstruction.clear();
        self.merge_journal.clear();
        self.visibility = None;
        for v in 0..n {
            self.label[v] = v;
            self.index[v] = v;
        }
    }

    /// Grows arc storage to hold `m` edges. Valid before preprocessing only.
    pub fn ensure_edge_capacity(&mut self, m: usize) {
        if m <= self.arc_capacity {
            return;
        }
        self.arc_capacity = m;
        self.neighbor.resize(2 * m, NIL);
        self.next_arc.resize(2 * m, NIL);
        self.prev_arc.resize(2 * m, NIL);
        self.edge_type.resize(2 * m, EdgeType::Unknown);
        self.inverted.resize(2 * m, false);
        self.stack_capacity = 2 * m;
        self.stack.reserve(self.stack_capacity.saturating_sub(self.stack.capacity()));
    }

    /// Resets all per-embedding state without reallocating. The vertex
    /// count is kept; all edges are dropped.
    pub fn reinitialize_graph(&mut self) {
        let n = self.n;
        for v in 0..2 * n {
            self.init_vertex_rec(v);
        }
        for v in 0..n {
            self.label[v] = v;
            self.index[v] = v;
        }
        self.visited.clear();
        self.neighbor.fill(NIL);
        self.next_arc.fill(NIL);
        self.prev_arc.fill(NIL);
        self.edge_type.fill(EdgeType::Unknown);
        self.inverted.fill(false);
        self.sorted_dfs_child_lists.reset();
        self.dfs_child_lists.reset();
        self.bicomp_lists.reset();
        self.bin.reset();
        self.buckets.fill(NIL);
        self.stack.clear();
        self.m = 0;
        self.sorted_by_dfi = false;
        self.mode = None;
        self.minor_type = MinorType::NONE;
        self.edge_snapshot.clear();
        self.obstruction.clear();
        self.merge_journal.clear();
        self.visibility = None;
    }

    /// Zeroes one vertex record. Used when a merged root copy is reclaimed.
    pub(crate) fn init_vertex_rec(&mut self, v: usize) {
        self.index[v] = NIL;
        self.label[v] = NIL;
        self.parent[v] = NIL;
        self.least_ancestor[v] = NIL;
        self.lowpoint[v] = NIL;
        self.visited_info[v] = NIL;
        self.adjacent_to[v] = NIL;
        self.sorted_dfs_child_list[v] = NIL;
        self.separated_dfs_child_list[v] = NIL;
        self.pertinent_bicomp_list[v] = NIL;
        self.fwd_arc_list[v] = NIL;
        self.first_arc[v] = NIL;
        self.last_arc[v] = NIL;
        self.ext_face[v] = [NIL; 2];
        self.ext_face_inverted[v] = false;
    }

    /// Adds the undirected edge (u, v) as a twin arc pair, appended at the
    /// tails of both adjacency lists. Preprocessing-time only; the graph
    /// must be simple.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), InternalError> {
        if u == v {
            return Err(InternalError("self-loops are not supported"));
        }
        if u >= self.n || v >= self.n {
            return Err(InternalError("edge endpoint out of range"));
        }
        if self.m == self.arc_capacity {
            let grown = (self.arc_capacity * 2).max(1);
            self.ensure_edge_capacity(grown);
        }
        let j = 2 * self.m;
        let jtwin = j + 1;
        self.m += 1;
        self.neighbor[j] = v;
        self.neighbor[jtwin] = u;
        self.append_arc(u, j);
        self.append_arc(v, jtwin);
        Ok(())
    }

    fn append_arc(&mut self, v: usize, j: usize) {
        let tail = self.last_arc[v];
        self.prev_arc[j] = tail;
        self.next_arc[j] = NIL;
        if tail == NIL {
            self.first_arc[v] = j;
        } else {
            self.next_arc[tail] = j;
        }
        self.last_arc[v] = j;
    }

    /// Replaces the contents of `self` with a copy of `src`.
    pub fn copy_graph(&mut self, src: &Graph) {
        *self = src.clone();
    }

    /// Returns an independent copy of the graph.
    pub fn dup_graph(&self) -> Graph {
        self.clone()
    }

    /// Number of real vertices.
    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of edges.
    pub fn size(&self) -> usize {
        self.m
    }

    pub fn mode(&self) -> Option<EmbedMode> {
        self.mode
    }

    /// Obstruction tag recorded by the most recent NONEMBEDDABLE result.
    pub fn minor_type(&self) -> MinorType {
        self.minor_type
    }

    /// Edges of the isolated obstruction, by original vertex label.
    /// Empty unless the last embed returned NONEMBEDDABLE.
    pub fn obstruction_edges(&self) -> &[(usize, usize)] {
        &self.obstruction
    }

    /// Visibility span data recorded by a draw-planar embedding.
    pub fn visibility(&self) -> Option<&VisibilityData> {
        self.visibility.as_ref()
    }

    /// Toggles between input-label order and DFI order by swapping vertex
    /// records and translating all vertex references through the
    /// permutation. After sorting into DFI order, `index(i) == i`.
    pub fn sort_vertices(&mut self) {
        let n = self.n;
        let mut target = vec![0usize; n];
        for s in 0..n {
            let t = if self.sorted_by_dfi { self.label[s] } else { self.index[s] };
            target[s] = t;
        }

        permute(&mut self.index, &target);
        permute(&mut self.label, &target);
        permute(&mut self.parent, &target);
        permute(&mut self.least_ancestor, &target);
        permute(&mut self.lowpoint, &target);
        permute(&mut self.visited_info, &target);
        permute(&mut self.adjacent_to, &target);
        permute(&mut self.sorted_dfs_child_list, &target);
        permute(&mut self.separated_dfs_child_list, &target);
        permute(&mut self.pertinent_bicomp_list, &target);
        permute(&mut self.fwd_arc_list, &target);
        permute(&mut self.first_arc, &target);
        permute(&mut self.last_arc, &target);
        permute(&mut self.ext_face, &target);
        permute(&mut self.ext_face_inverted, &target);

        let mut visited = FixedBitSet::with_capacity(2 * n);
        for s in 0..n {
            if self.visited.contains(s) {
                visited.insert(target[s]);
            }
        }
        for v in n..2 * n {
            if self.visited.contains(v) {
                visited.insert(v);
            }
        }
        self.visited = visited;

        // Translate vertex references held in parent fields and arcs.
        for v in 0..2 * n {
            if self.parent[v] != NIL {
                self.parent[v] = target[self.parent[v]];
            }
        }
        for j in 0..2 * self.m {
            if self.neighbor[j] != NIL && self.neighbor[j] < n {
                self.neighbor[j] = target[self.neighbor[j]];
            }
        }

        self.sorted_by_dfi = !self.sorted_by_dfi;
    }

    /// Endpoint pairs of all edges, by original vertex label.
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        (0..self.m)
            .map(|k| {
                let v = self.neighbor[2 * k];
                let u = self.neighbor[2 * k + 1];
                (self.label[u], self.label[v])
            })
            .collect()
    }

    /// Neighbors of the vertex with original label `v`, in rotation order.
    pub fn adjacency_list_of(&self, v: usize) -> Vec<usize> {
        let slot = self.slot_of_label(v);
        let mut out = Vec::new();
        let mut j = self.first_arc[slot];
        while j != NIL {
            out.push(self.label[self.neighbor[j]]);
            j = self.next_arc[j];
        }
        out
    }

    pub(crate) fn slot_of_label(&self, v: usize) -> usize {
        if self.sorted_by_dfi {
            self.label
                .iter()
                .take(self.n)
                .position(|&l| l == v)
                .unwrap_or(NIL)
        } else {
            v
        }
    }

    /// Rebuilds the graph from the given edge list (original labels),
    /// keeping the vertex count.
    pub(crate) fn reload_from_edges(
        &mut self,
        edges: &[(usize, usize)],
    ) -> Result<(), InternalError> {
        self.reinitialize_graph();
        self.ensure_edge_capacity(edges.len().max(1));
        for &(u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    /// Records the current edge set (by label) before embedding mangles
    /// arc targets. The isolator and the integrity checker read this.
    pub(crate) fn snapshot_edges(&mut self) {
        self.edge_snapshot = self.edge_pairs();
    }

    // Low-level arc plumbing shared by the embedder blocks. A vertex's two
    // arc slots are first (link 0) and last (link 1); an arc's two links
    // are next (link 0) and prev (link 1).

    #[inline]
    pub(crate) fn twin(&self, j: usize) -> usize {
        j ^ 1
    }

    #[inline]
    pub(crate) fn arc_slot(&self, v: usize, link: usize) -> usize {
        if link == 0 { self.first_arc[v] } else { self.last_arc[v] }
    }

    #[inline]
    pub(crate) fn set_arc_slot(&mut self, v: usize, link: usize, j: usize) {
        if link == 0 {
            self.first_arc[v] = j;
        } else {
            self.last_arc[v] = j;
        }
    }

    #[inline]
    pub(crate) fn set_link(&mut self, j: usize, link: usize, x: usize) {
        if link == 0 {
            self.next_arc[j] = x;
        } else {
            self.prev_arc[j] = x;
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

fn permute<T: Clone>(field: &mut [T], target: &[usize]) {
    let n = target.len();
    let old: Vec<T> = field[..n].to_vec();
    for (s, item) in old.into_iter().enumerate() {
        field[target[s]] = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_twin_pairing() {
        let mut g = Graph::new();
        g.init_graph(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        assert_eq!(g.size(), 2);
        for j in 0..2 * g.size() {
            assert_eq!(g.twin(g.twin(j)), j);
        }
        // Arc j points at one endpoint, its twin at the other.
        assert_eq!((g.neighbor[1], g.neighbor[0]), (0, 1));
        assert_eq!((g.neighbor[3], g.neighbor[2]), (1, 2));
        assert_eq!(g.adjacency_list_of(1), vec![0, 2]);
    }

    #[test]
    fn test_add_edge_rejects_self_loop() {
        let mut g = Graph::new();
        g.init_graph(2);
        assert!(g.add_edge(0, 0).is_err());
        assert!(g.add_edge(0, 2).is_err());
    }

    #[test]
    fn test_capacity_growth() {
        let mut g = Graph::new();
        g.init_graph(2);
        for _ in 0..1 {
            g.add_edge(0, 1).unwrap();
        }
        let before = g.arc_capacity;
        g.ensure_edge_capacity(before * 4);
        assert_eq!(g.arc_capacity, before * 4);
        assert_eq!(g.neighbor.len(), 8 * before);
        assert_eq!(g.size(), 1);
    }

    #[test]
    fn test_sort_vertices_round_trip() {
        let mut g = Graph::new();
        g.init_graph(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        // Fake a DFS numbering that reverses the vertices.
        for v in 0..4 {
            g.index[v] = 3 - v;
        }
        let before = {
            let mut e = g.edge_pairs();
            e.sort();
            e
        };
        g.sort_vertices();
        assert!(g.sorted_by_dfi);
        for i in 0..4 {
            assert_eq!(g.index[i], i);
        }
        let mut after = g.edge_pairs();
        after.sort();
        assert_eq!(before, after);
        g.sort_vertices();
        for v in 0..4 {
            assert_eq!(g.label[v], v);
        }
    }

    #[test]
    fn test_reinitialize_clears_edges() {
        let mut g = Graph::new();
        g.init_graph(3);
        g.add_edge(0, 1).unwrap();
        g.reinitialize_graph();
        assert_eq!(g.size(), 0);
        assert_eq!(g.first_arc[0], NIL);
        g.add_edge(0, 2).unwrap();
        assert_eq!(g.adjacency_list_of(0), vec![2]);
    }

    #[test]
    fn test_dup_is_independent() {
        let mut g = Graph::new();
        g.init_graph(3);
        g.add_edge(0, 1).unwrap();
        let mut h = g.dup_graph();
        h.add_edge(1, 2).unwrap();
        assert_eq!(g.size(), 1);
        assert_eq!(h.size(), 2);
    }
}
