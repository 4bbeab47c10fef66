use radsort::sort_by_key;

use crate::embedder_blocks::isolate::{ObstructionKind, classify, minor_flag_for};
use crate::graph::Graph;
use crate::types::{EmbedMode, EmbedOutcome, InternalError, NIL};

/// Verifies an embed result against the original graph.
///
/// For `Embedded`: the edge multiset is unchanged, the arc store is a
/// well-formed rotation system (twin pairing, doubly linked adjacency,
/// every arc in exactly one list), the face count of every connected
/// component satisfies Euler's formula for the sphere, the edge-count
/// bound of the mode holds, and for the outerplanar modes every
/// component has a face visiting all its vertices.
///
/// For `Nonembeddable`: the witness held by `g` is a subgraph of the
/// original, is homeomorphic to an obstruction the mode allows, and the
/// recorded minor tag matches.
pub fn test_embed_result_integrity(
    g: &Graph,
    original: &Graph,
    outcome: EmbedOutcome,
) -> Result<(), InternalError> {
    let mode = g.mode().ok_or(InternalError("graph has not been embedded"))?;
    match outcome {
        EmbedOutcome::Embedded => {
            if matches!(mode, EmbedMode::SearchK33 | EmbedMode::SearchK23) {
                // Embedded here means "obstruction not found"; the search
                // may have reduced or reloaded the graph, so only the
                // subgraph relationship is checked.
                return check_subgraph_of(g, original);
            }
            check_embedding_integrity(g, original, mode)
        }
        EmbedOutcome::Nonembeddable => check_obstruction_integrity(g, original, mode),
    }
}

fn check_subgraph_of(g: &Graph, original: &Graph) -> Result<(), InternalError> {
    let original_keys = edge_keys(original);
    let n = original.order() as u64;
    for (u, v) in g.edge_pairs() {
        let (a, b) = if u <= v { (u, v) } else { (v, u) };
        if original_keys.binary_search(&(a as u64 * n + b as u64)).is_err() {
            return Err(InternalError("search result edge not present in the original"));
        }
    }
    Ok(())
}

fn outerplanar_mode(mode: EmbedMode) -> bool {
    matches!(mode, EmbedMode::Outerplanar | EmbedMode::SearchK23)
}

/// Normalized, sorted edge keys for reorder-invariant comparison.
fn edge_keys(g: &Graph) -> Vec<u64> {
    let n = g.order() as u64;
    let mut keys: Vec<u64> = g
        .edge_pairs()
        .iter()
        .map(|&(u, v)| {
            let (a, b) = if u <= v { (u, v) } else { (v, u) };
            a as u64 * n + b as u64
        })
        .collect();
    sort_by_key(&mut keys, |&k| k);
    keys
}

fn check_embedding_integrity(
    g: &Graph,
    original: &Graph,
    mode: EmbedMode,
) -> Result<(), InternalError> {
    let n = g.order();
    let m = g.size();

    if n != original.order() {
        return Err(InternalError("vertex count differs from the original"));
    }
    if edge_keys(g) != edge_keys(original) {
        return Err(InternalError("edge multiset differs from the original"));
    }

    if outerplanar_mode(mode) {
        if n >= 2 && m > 2 * n - 3 {
            return Err(InternalError("edge count exceeds the outerplanar bound"));
        }
    } else if n >= 3 && m > 3 * n - 6 {
        return Err(InternalError("edge count exceeds the planar bound"));
    }

    check_rotation_system(g)?;
    check_faces(g, outerplanar_mode(mode))
}

/// Twin pairing and adjacency-list linkage over the whole store.
fn check_rotation_system(g: &Graph) -> Result<(), InternalError> {
    let n = g.order();
    let m = g.size();
    let mut seen = vec![false; 2 * m];

    for j in 0..2 * m {
        if !g.edge_type[j].is_twin_of(g.edge_type[g.twin(j)]) {
            return Err(InternalError("twin arcs carry incompatible edge types"));
        }
    }

    for v in 0..2 * n {
        let mut j = g.first_arc[v];
        let mut prev = NIL;
        while j != NIL {
            if v >= n {
                return Err(InternalError("virtual vertex still owns arcs after join"));
            }
            if seen[j] {
                return Err(InternalError("arc linked into two adjacency lists"));
            }
            seen[j] = true;
            if g.prev_arc[j] != prev {
                return Err(InternalError("adjacency list prev link broken"));
            }
            if g.neighbor[g.twin(j)] != v {
                return Err(InternalError("arc twin does not point back at its owner"));
            }
            prev = j;
            j = g.next_arc[j];
        }
        if g.last_arc[v] != prev {
            return Err(InternalError("adjacency list last-arc mark broken"));
        }
    }

    if seen.iter().any(|&s| !s) {
        return Err(InternalError("arc missing from every adjacency list"));
    }
    Ok(())
}

/// Face orbits of the rotation system, checked per connected component
/// against Euler's formula, and against the all-vertices-on-one-face
/// requirement for outerplanarity.
fn check_faces(g: &Graph, outerplanar: bool) -> Result<(), InternalError> {
    let n = g.order();
    let m = g.size();

    // Component labels via DFS over the embedded adjacency.
    let mut component = vec![NIL; n];
    let mut components = 0;
    for start in 0..n {
        if component[start] != NIL || g.first_arc[start] == NIL {
            continue;
        }
        let mut stack = vec![start];
        component[start] = components;
        while let Some(v) = stack.pop() {
            let mut j = g.first_arc[v];
            while j != NIL {
                let w = g.neighbor[j];
                if component[w] == NIL {
                    component[w] = components;
                    stack.push(w);
                }
                j = g.next_arc[j];
            }
        }
        components += 1;
    }

    let mut vertices_in = vec![0usize; components];
    for v in 0..n {
        if component[v] != NIL {
            vertices_in[component[v]] += 1;
        }
    }
    let mut edges_in = vec![0usize; components];
    for k in 0..m {
        let owner = g.neighbor[2 * k + 1];
        edges_in[component[owner]] += 1;
    }

    // The successor of arc (u -> v) on its face is the arc after the twin
    // in v's rotation, cyclically.
    let succ = |j: usize| -> usize {
        let t = g.twin(j);
        let next = g.next_arc[t];
        if next != NIL { next } else { g.first_arc[g.neighbor[j]] }
    };

    let mut faces_in = vec![0usize; components];
    let mut covers_all = vec![false; components];
    let mut visited = vec![false; 2 * m];
    for start in 0..2 * m {
        if visited[start] {
            continue;
        }
        let c = component[g.neighbor[start]];
        faces_in[c] += 1;

        let mut on_face = vec![false; n];
        let mut face_vertices = 0;
        let mut j = start;
        loop {
            visited[j] = true;
            let v = g.neighbor[j];
            if !on_face[v] {
                on_face[v] = true;
                face_vertices += 1;
            }
            j = succ(j);
            if j == start {
                break;
            }
        }
        if face_vertices == vertices_in[c] {
            covers_all[c] = true;
        }
    }

    for c in 0..components {
        if faces_in[c] != edges_in[c] + 2 - vertices_in[c] {
            return Err(InternalError("face count violates Euler's formula"));
        }
        if outerplanar && !covers_all[c] {
            return Err(InternalError("no face visits every vertex of a component"));
        }
    }
    Ok(())
}

fn check_obstruction_integrity(
    g: &Graph,
    original: &Graph,
    mode: EmbedMode,
) -> Result<(), InternalError> {
    let witness = g.obstruction_edges();
    if witness.is_empty() {
        return Err(InternalError("nonembeddable result without a witness"));
    }

    let original_keys = edge_keys(original);
    let n = original.order() as u64;
    for &(u, v) in witness {
        let (a, b) = if u <= v { (u, v) } else { (v, u) };
        if original_keys.binary_search(&(a as u64 * n + b as u64)).is_err() {
            return Err(InternalError("witness edge not present in the original"));
        }
    }

    let kind = classify(witness, outerplanar_mode(mode))?;
    let allowed = match mode {
        EmbedMode::Planar | EmbedMode::DrawPlanar => {
            matches!(kind, ObstructionKind::K5 | ObstructionKind::K33)
        }
        EmbedMode::Outerplanar => matches!(kind, ObstructionKind::K4 | ObstructionKind::K23),
        EmbedMode::SearchK33 => kind == ObstructionKind::K33,
        EmbedMode::SearchK23 => kind == ObstructionKind::K23,
    };
    if !allowed {
        return Err(InternalError("witness kind is not valid for the mode"));
    }
    if g.minor_type() != minor_flag_for(kind) {
        return Err(InternalError("minor tag does not match the witness kind"));
    }
    Ok(())
}
