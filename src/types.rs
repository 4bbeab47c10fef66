/// Marks whether an edge of a public graph belongs to the input or was
/// synthesized (e.g. by degree-2 suppression when classifying obstructions).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EdgeLabel {
    Real,
    Virtual,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Real => write!(f, "Real"),
            EdgeLabel::Virtual => write!(f, "Virtual"),
        }
    }
}

/// Wrapper for petgraph's undirected graph type.
pub type UnGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;

/// Wrapper for petgraph's directed graph type, used to return rotation systems.
pub type DiGraph = petgraph::graph::DiGraph<u32, EdgeLabel>;

/// Sentinel for "no vertex / no arc" in the flat store.
pub const NIL: usize = usize::MAX;

/// The algorithm the embedder runs. Exactly one is active per call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EmbedMode {
    Planar,
    Outerplanar,
    DrawPlanar,
    SearchK23,
    SearchK33,
}

impl std::fmt::Display for EmbedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedMode::Planar => write!(f, "planar"),
            EmbedMode::Outerplanar => write!(f, "outerplanar"),
            EmbedMode::DrawPlanar => write!(f, "draw-planar"),
            EmbedMode::SearchK23 => write!(f, "search-K2,3"),
            EmbedMode::SearchK33 => write!(f, "search-K3,3"),
        }
    }
}

/// Outcome of an embedding attempt. `Nonembeddable` is a result, not an
/// error: the graph is left holding the obstruction witness.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EmbedOutcome {
    Embedded,
    Nonembeddable,
}

/// Non-recoverable invariant failure. The graph must be reinitialized
/// before further use.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InternalError(pub &'static str);

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "internal embedder error: {}", self.0)
    }
}

impl std::error::Error for InternalError {}

/// Tag recorded when a bicomp blockage is resolved into an obstruction,
/// naming the Kuratowski configuration that was isolated.
///
/// This engine sets `A` for a K5 (planarity) or K4 (outerplanarity)
/// homeomorph and `E` for a K3,3 or K2,3 homeomorph. The remaining
/// variants are reserved for isolators that classify blockages in place.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct MinorType(u16);

impl MinorType {
    pub const NONE: MinorType = MinorType(0);
    pub const A: MinorType = MinorType(1 << 0);
    pub const B: MinorType = MinorType(1 << 1);
    pub const C: MinorType = MinorType(1 << 2);
    pub const D: MinorType = MinorType(1 << 3);
    pub const E: MinorType = MinorType(1 << 4);
    pub const E1: MinorType = MinorType(1 << 5);
    pub const E2: MinorType = MinorType(1 << 6);
    pub const E3: MinorType = MinorType(1 << 7);
    pub const E4: MinorType = MinorType(1 << 8);

    pub fn contains(self, other: MinorType) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: MinorType) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Type of an arc after DFS preprocessing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeType {
    Unknown,
    TreeChild,
    TreeParent,
    Back,
    Forward,
}

impl EdgeType {
    /// Valid twin pairings: tree-child with tree-parent, back with forward.
    pub fn is_twin_of(self, other: EdgeType) -> bool {
        matches!(
            (self, other),
            (EdgeType::Unknown, EdgeType::Unknown)
                | (EdgeType::TreeChild, EdgeType::TreeParent)
                | (EdgeType::TreeParent, EdgeType::TreeChild)
                | (EdgeType::Back, EdgeType::Forward)
                | (EdgeType::Forward, EdgeType::Back)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_type_flags() {
        let mut t = MinorType::NONE;
        assert!(t.is_empty());
        t.insert(MinorType::A);
        assert!(t.contains(MinorType::A));
        assert!(!t.contains(MinorType::E));
        t.insert(MinorType::E);
        assert!(t.contains(MinorType::A) && t.contains(MinorType::E));
    }

    #[test]
    fn test_edge_type_twins() {
        assert!(EdgeType::TreeChild.is_twin_of(EdgeType::TreeParent));
        assert!(EdgeType::Forward.is_twin_of(EdgeType::Back));
        assert!(!EdgeType::TreeChild.is_twin_of(EdgeType::Back));
        assert!(!EdgeType::Forward.is_twin_of(EdgeType::Forward));
    }
}
