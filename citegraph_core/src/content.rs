use anyhow::{Context, Result, bail};
use std::io::BufRead;
use tracing::debug;

use crate::dense_map::DenseMap;

/// One row of the content file after re-indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub node: u32,
    pub label: u32,
    /// Ascending positions of the non-zero feature columns.
    pub features: Vec<u32>,
}

/// Everything the indexing pass produces.
#[derive(Debug, Default)]
pub struct IndexedContent {
    pub ids: DenseMap,
    pub labels: DenseMap,
    /// One record per input line, in input order.
    pub records: Vec<NodeRecord>,
    /// Widest feature vector seen.
    pub feature_dim: usize,
}

/// Reads `<id> <feature_1> ... <feature_k> <label>` lines, assigning dense
/// indices to node ids and labels in first-seen order and turning each
/// feature vector into the list of its non-zero positions.
pub fn index_nodes<R: BufRead>(reader: R) -> Result<IndexedContent> {
    let mut content = IndexedContent::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("Failed to read content line {}", line_no))?;
        let record = parse_line(&line, &mut content)
            .with_context(|| format!("Malformed content line {}", line_no))?;
        content.records.push(record);
    }

    debug!(
        nodes = content.ids.len(),
        labels = content.labels.len(),
        rows = content.records.len(),
        "Indexed content"
    );
    Ok(content)
}

fn parse_line(line: &str, content: &mut IndexedContent) -> Result<NodeRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (Some(&id), Some(&label)) = (fields.first(), fields.last()) else {
        bail!("expected an id and a label, found an empty line");
    };

    // A lone field is both the id and the label.
    let node = content.ids.get_or_insert(id);
    let label = content.labels.get_or_insert(label);

    let values: &[&str] = fields.get(1..fields.len() - 1).unwrap_or_default();
    content.feature_dim = content.feature_dim.max(values.len());

    let mut features = Vec::new();
    for (column, value) in values.iter().enumerate() {
        let non_zero = is_non_zero(value)
            .with_context(|| format!("feature column {} is not an integer: {:?}", column, value))?;
        if non_zero {
            features.push(column as u32);
        }
    }

    Ok(NodeRecord {
        node,
        label,
        features,
    })
}

/// Whether an integer literal of any width is non-zero.
/// Accepts an optional sign and `_` between digits.
fn is_non_zero(value: &str) -> Result<bool> {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    let well_formed = !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !well_formed {
        bail!("invalid digit sequence");
    }
    Ok(digits.chars().any(|c| c != '0' && c != '_'))
}
