use crate::embedder_blocks::isolate::{isolate_obstruction, minor_flag_for};
use crate::embedder_blocks::merge;
use crate::embedder_blocks::orient::{join_bicomps, orient_vertices_in_embedding};
use crate::embedder_blocks::visibility::{self, MergeRecord};
use crate::graph::Graph;
use crate::types::{EmbedOutcome, InternalError, NIL};

/// Activity of a descendant vertex at step `i` of the embedder.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum VertexActivity {
    Inactive,
    Internal,
    External,
}

/// A vertex is pertinent when it carries an unembedded back edge to the
/// step vertex or has a pertinent child bicomp.
#[inline]
pub(crate) fn pertinent(g: &Graph, v: usize) -> bool {
    g.adjacent_to[v] != NIL || g.pertinent_bicomp_list[v] != NIL
}

/// The replaceable operations of the embedder. Algorithm modes override
/// selectively and delegate the rest to these defaults, which implement
/// core planarity.
pub(crate) trait EmbedderOps {
    /// Outerplanar variants keep every vertex on the outer face.
    fn outerplanar(&self) -> bool {
        false
    }

    /// Classifies a vertex for the Walkdown's path selection. A vertex is
    /// externally active when a single back edge or a separated DFS child
    /// subtree reaches an ancestor of `i`; under outerplanarity every
    /// vertex is externally active, since none may be enclosed.
    fn vertex_active_status(&self, g: &Graph, v: usize, i: usize) -> VertexActivity {
        let externally_active = if self.outerplanar() {
            true
        } else {
            g.least_ancestor[v] < i || {
                let child = g.separated_dfs_child_list[v];
                child != NIL && g.lowpoint[child] < i
            }
        };
        if externally_active {
            VertexActivity::External
        } else if pertinent(g, v) {
            VertexActivity::Internal
        } else {
            VertexActivity::Inactive
        }
    }

    fn merge_bicomps(
        &self,
        g: &mut Graph,
        i: usize,
        root_vertex: usize,
        w: usize,
        w_prev: usize,
    ) -> Result<EmbedOutcome, InternalError> {
        merge::merge_bicomps(g, i, root_vertex, w, w_prev)
    }

    fn embed_back_edge_to_descendant(
        &self,
        g: &mut Graph,
        root_side: usize,
        root_vertex: usize,
        w: usize,
        w_prev: usize,
    ) -> Result<(), InternalError> {
        merge::embed_back_edge_to_descendant(g, root_side, root_vertex, w, w_prev)
    }

    /// Both sides of a pertinent child bicomp are blocked. The core
    /// algorithm pushes the blocked root for the obstruction isolator and
    /// stops the Walkdown. An overload that clears the blockage must set
    /// `rout`, `w` and `w_prev` and return `Embedded` instead.
    fn handle_blocked_descendant_bicomp(
        &self,
        g: &mut Graph,
        _i: usize,
        _root_vertex: usize,
        r: usize,
        _rout: &mut usize,
        _w: &mut usize,
        _w_prev: &mut usize,
    ) -> Result<EmbedOutcome, InternalError> {
        g.stack.push((r, 0));
        Ok(EmbedOutcome::Nonembeddable)
    }

    /// Steps past an inactive vertex along the external face.
    fn handle_inactive_vertex(
        &self,
        g: &mut Graph,
        _bicomp_root: usize,
        w: &mut usize,
        w_prev: &mut usize,
    ) -> Result<(), InternalError> {
        let x = g.ext_face[*w][1 ^ *w_prev];
        *w_prev = if g.ext_face[x][0] == *w { 0 } else { 1 };
        *w = x;
        Ok(())
    }

    /// Invoked when a step ends with unembedded forward arcs. The core
    /// algorithm stops; search extensions may clear the blockage and
    /// continue.
    fn handle_blocked_embed_iteration(
        &self,
        _g: &mut Graph,
        _i: usize,
    ) -> Result<EmbedOutcome, InternalError> {
        Ok(EmbedOutcome::Nonembeddable)
    }

    /// Final step of the driver: orient and join on success, isolate an
    /// obstruction otherwise.
    fn embed_postprocess(
        &self,
        g: &mut Graph,
        i: usize,
        result: EmbedOutcome,
    ) -> Result<EmbedOutcome, InternalError>;
}

/// Core planarity and outerplanarity. `isolate` is cleared when the
/// embedder is used as a yes/no oracle (by the isolator itself and by the
/// search modes), so a NONEMBEDDABLE result leaves the graph untouched.
pub(crate) struct CoreOps {
    pub outerplanar: bool,
    pub isolate: bool,
}

impl CoreOps {
    pub const PLANAR: CoreOps = CoreOps { outerplanar: false, isolate: true };
    pub const OUTERPLANAR: CoreOps = CoreOps { outerplanar: true, isolate: true };
    pub const PLANAR_DECIDE: CoreOps = CoreOps { outerplanar: false, isolate: false };
    pub const OUTERPLANAR_DECIDE: CoreOps = CoreOps { outerplanar: true, isolate: false };
}

impl EmbedderOps for CoreOps {
    fn outerplanar(&self) -> bool {
        self.outerplanar
    }

    fn embed_postprocess(
        &self,
        g: &mut Graph,
        _i: usize,
        result: EmbedOutcome,
    ) -> Result<EmbedOutcome, InternalError> {
        match result {
            EmbedOutcome::Embedded => {
                orient_vertices_in_embedding(g);
                join_bicomps(g);
                Ok(EmbedOutcome::Embedded)
            }
            EmbedOutcome::Nonembeddable => {
                if self.isolate {
                    let snapshot = g.edge_snapshot.clone();
                    let found = isolate_obstruction(g.n, &snapshot, self.outerplanar)?;
                    let mode = g.mode;
                    g.reload_from_edges(&found.edges)?;
                    g.mode = mode;
                    g.minor_type = minor_flag_for(found.kind);
                    g.obstruction = found.edges;
                }
                Ok(EmbedOutcome::Nonembeddable)
            }
        }
    }
}

/// Planarity plus the visibility-representation overlay: bicomp merges
/// are journaled, and a successful embedding is post-processed into
/// per-vertex and per-edge span data.
pub(crate) struct DrawOps;

impl EmbedderOps for DrawOps {
    fn merge_bicomps(
        &self,
        g: &mut Graph,
        i: usize,
        root_vertex: usize,
        w: usize,
        w_prev: usize,
    ) -> Result<EmbedOutcome, InternalError> {
        // The stack holds (cut vertex, in-link) / (child root, out-link)
        // pairs bottom-up; journal them before the merge consumes them.
        let mut k = 0;
        while k + 1 < g.stack.len() {
            let (z, z_prev) = g.stack[k];
            let (r, rout) = g.stack[k + 1];
            g.merge_journal.push(MergeRecord {
                step: i,
                cut_vertex: z,
                in_link: z_prev,
                child_root: r,
                flipped: z_prev == rout,
            });
            k += 2;
        }
        merge::merge_bicomps(g, i, root_vertex, w, w_prev)
    }

    fn embed_postprocess(
        &self,
        g: &mut Graph,
        i: usize,
        result: EmbedOutcome,
    ) -> Result<EmbedOutcome, InternalError> {
        let outcome = CoreOps::PLANAR.embed_postprocess(g, i, result)?;
        if outcome == EmbedOutcome::Embedded {
            g.visibility = Some(visibility::derive_spans(g));
        }
        Ok(outcome)
    }
}
