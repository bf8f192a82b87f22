use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::content::{IndexedContent, index_nodes};
use crate::dataset::DatasetLayout;
use crate::edges::{EdgeSet, invert_edges};
use crate::{emit, export};

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub nodes: usize,
    pub labels: usize,
    pub feature_dim: usize,
    pub targets: usize,
    pub edges: u64,
}

pub struct DatasetConverter {
    pub layout: DatasetLayout,
    pub parquet: bool,
}

impl DatasetConverter {
    pub fn new(layout: DatasetLayout) -> Self {
        Self {
            layout,
            parquet: false,
        }
    }

    /// Also write `<name>.nodes.parquet` and `<name>.edges.parquet`.
    pub fn with_parquet(mut self, parquet: bool) -> Self {
        self.parquet = parquet;
        self
    }

    pub fn run(&self) -> Result<ConversionSummary> {
        let layout = &self.layout;
        info!("Converting dataset {}...", layout.name);
        let start = Instant::now();

        fs::create_dir_all(&layout.output_dir).with_context(|| {
            format!("Failed to create output directory {}", layout.output_dir.display())
        })?;

        // A. Index nodes and labels, sparsify features
        let content = index_nodes(open(&layout.content_path())?)
            .with_context(|| format!("Failed to index {}", layout.content_path().display()))?;
        info!(
            "  Indexed {} nodes, {} labels, {} feature columns.",
            content.ids.len(),
            content.labels.len(),
            content.feature_dim
        );

        write_file(&layout.content_id_path(), |w| {
            emit::write_content(w, &content.records)
        })?;
        write_file(&layout.label_path(), |w| emit::write_labels(w, &content.records))?;
        write_file(&layout.feature_path(), |w| {
            emit::write_features(w, &content.records)
        })?;

        // B. Invert citations: cited -> citing
        let edges = invert_edges(open(&layout.cites_path())?, &content.ids)
            .with_context(|| format!("Failed to invert {}", layout.cites_path().display()))?;
        info!(
            "  Inverted {} unique edges over {} targets.",
            edges.num_edges(),
            edges.num_targets()
        );

        // C. Remaining views
        write_file(&layout.adjacency_path(), |w| emit::write_adjacency(w, &edges))?;
        write_file(&layout.id_map_path(), |w| emit::write_dense_map(w, &content.ids))?;
        write_file(&layout.label_map_path(), |w| {
            emit::write_dense_map(w, &content.labels)
        })?;
        write_file(&layout.edge_path(), |w| emit::write_edge_list(w, &edges))?;

        if self.parquet {
            self.export_parquet(&content, &edges)?;
        }

        info!(
            "Conversion completed for {} in {:.2?}",
            layout.name,
            start.elapsed()
        );

        Ok(ConversionSummary {
            nodes: content.ids.len(),
            labels: content.labels.len(),
            feature_dim: content.feature_dim,
            targets: edges.num_targets(),
            edges: edges.num_edges(),
        })
    }

    fn export_parquet(&self, content: &IndexedContent, edges: &EdgeSet) -> Result<()> {
        let nodes_path = self.layout.nodes_parquet_path();
        export::write_parquet(&nodes_path, &export::node_rows(content))
            .with_context(|| format!("Failed to write {}", nodes_path.display()))?;

        let edges_path = self.layout.edges_parquet_path();
        export::write_parquet(&edges_path, &export::edge_rows(edges))
            .with_context(|| format!("Failed to write {}", edges_path.display()))?;

        info!(
            "  Exported {} and {}",
            nodes_path.display(),
            edges_path.display()
        );
        Ok(())
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn write_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    body(&mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
