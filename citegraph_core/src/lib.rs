//! Re-indexes citation-network datasets (Cora and friends) into dense,
//! whitespace-delimited files: node/label id tables, sparse feature lists
//! and inverted citation adjacency.

pub mod content;
pub mod converter;
pub mod dataset;
pub mod dense_map;
pub mod edges;
pub mod emit;
pub mod export;

pub use converter::{ConversionSummary, DatasetConverter};
pub use dataset::DatasetLayout;
