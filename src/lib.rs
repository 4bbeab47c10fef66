// #![warn(missing_docs)]

//! # planar_embed
//!
//! A Rust library implementing the Boyer–Myrvold edge-addition method:
//! linear-time planarity and outerplanarity testing with combinatorial
//! embeddings on success and isolated Kuratowski-type obstructions on
//! failure.
//!
//! Public input graphs are based on [`petgraph`](https://docs.rs/petgraph);
//! the engine itself runs on a flat arc store ([`graph::Graph`]).
//!
//! Reference:
//! [Boyer & Myrvold, "On the Cutting Edge: Simplified O(n) Planarity by
//! Edge Addition"](https://www.emis.de/journals/JGAA/accepted/2004/BoyerMyrvold2004.8.3.pdf)

pub mod debugging;
pub mod embedder;
pub(crate) mod embedder_blocks;
pub mod graph;
pub mod input;
pub mod list_collection;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use embedder::{embed_graph, embedding_to_digraph, is_outerplanar, is_planar, load_graph};
pub use embedder_blocks::integrity::test_embed_result_integrity;
pub use embedder_blocks::visibility::{MergeRecord, VisibilityData};
pub use graph::Graph;
pub use types::{
    DiGraph, EdgeLabel, EmbedMode, EmbedOutcome, InternalError, MinorType, UnGraph,
};
