use anyhow::{Context, Result};
use parquet::file::writer::SerializedFileWriter;
use parquet::{file::properties::WriterProperties, record::RecordWriter};
use parquet_derive::ParquetRecordWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::content::IndexedContent;
use crate::edges::EdgeSet;

#[derive(Debug, ParquetRecordWriter)]
pub struct NodeRow {
    pub node: u32,
    pub raw_id: String,
    pub label: u32,
}

#[derive(Debug, ParquetRecordWriter)]
pub struct EdgeRow {
    pub target: u32,
    pub source: u32,
}

/// One row per content record, in input order.
pub fn node_rows(content: &IndexedContent) -> Vec<NodeRow> {
    content
        .records
        .iter()
        .map(|record| NodeRow {
            node: record.node,
            raw_id: content
                .ids
                .original(record.node)
                .unwrap_or_default()
                .to_string(),
            label: record.label,
        })
        .collect()
}

/// One row per edge, in the same order as the edge-list file.
pub fn edge_rows(edges: &EdgeSet) -> Vec<EdgeRow> {
    edges
        .pairs()
        .map(|(target, source)| EdgeRow { target, source })
        .collect()
}

/// Writes `records` as a single SNAPPY-compressed row group.
pub fn write_parquet<T>(path: &Path, records: &[T]) -> Result<()>
where
    for<'a> &'a [T]: RecordWriter<T>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(parquet::basic::Compression::SNAPPY)
            .build(),
    );

    let mut writer = SerializedFileWriter::new(file, records.schema()?, props)?;
    let mut row_group = writer.next_row_group()?;
    records.write_to_row_group(&mut row_group)?;
    row_group.close()?;
    writer.close()?;
    Ok(())
}
