use anyhow::{Context, Result, anyhow, bail};
use roaring::RoaringBitmap;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::debug;

use crate::dense_map::DenseMap;

/// Citation edges keyed by the cited node.
/// Each target owns the set of nodes citing it; sets are created on first
/// insert, and targets iterate in ascending order.
#[derive(Debug, Default, Clone)]
pub struct EdgeSet {
    targets: BTreeMap<u32, RoaringBitmap>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source` to the set of `target`.
    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, target: u32, source: u32) -> bool {
        self.targets.entry(target).or_default().insert(source)
    }

    /// The sources recorded for `target`, if it has any.
    pub fn sources(&self, target: u32) -> Option<&RoaringBitmap> {
        self.targets.get(&target)
    }

    /// Iterates `(target, sources)` with targets ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &RoaringBitmap)> {
        self.targets.iter().map(|(&target, sources)| (target, sources))
    }

    /// Flattens the set into `(target, source)` pairs, targets ascending.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> {
        self.iter()
            .flat_map(|(target, sources)| sources.iter().map(move |source| (target, source)))
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn num_edges(&self) -> u64 {
        self.targets.values().map(RoaringBitmap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Reads `<citing_id> <cited_id>` lines and stores each pair reversed:
/// the cited node becomes the key and the citing node joins its set.
/// Both ids must already be present in `ids`.
pub fn invert_edges<R: BufRead>(reader: R, ids: &DenseMap) -> Result<EdgeSet> {
    let mut edges = EdgeSet::new();
    let mut duplicates = 0usize;
    let mut rows = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.with_context(|| format!("Failed to read cites line {}", line_no))?;
        let (citing, cited) =
            parse_pair(&line, ids).with_context(|| format!("Malformed cites line {}", line_no))?;
        if !edges.insert(cited, citing) {
            duplicates += 1;
        }
        rows += 1;
    }

    debug!(
        rows,
        duplicates,
        targets = edges.num_targets(),
        edges = edges.num_edges(),
        "Inverted citation edges"
    );
    Ok(edges)
}

fn parse_pair(line: &str, ids: &DenseMap) -> Result<(u32, u32)> {
    let mut fields = line.split_whitespace();
    let (Some(citing), Some(cited), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected exactly two ids, found {:?}", line);
    };
    let lookup = |raw: &str| {
        ids.get(raw)
            .ok_or_else(|| anyhow!("unknown node id {:?}", raw))
    };
    Ok((lookup(citing)?, lookup(cited)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(keys: &[&str]) -> DenseMap {
        keys.iter().collect()
    }

    #[test]
    fn test_empty_edge_set() {
        let edges = EdgeSet::new();
        assert!(edges.is_empty());
        assert_eq!(edges.num_edges(), 0);
        assert_eq!(edges.sources(0), None);
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut edges = EdgeSet::new();
        assert!(edges.insert(1, 0));
        assert!(!edges.insert(1, 0));
        assert!(edges.insert(1, 2));
        assert_eq!(edges.num_edges(), 2);
        assert_eq!(edges.num_targets(), 1);
    }

    #[test]
    fn test_direction_is_reversed() {
        let ids = ids(&["A", "B"]);
        let edges = invert_edges("A B\n".as_bytes(), &ids).unwrap();

        assert!(edges.sources(1).unwrap().contains(0));
        assert_eq!(edges.sources(0), None);
        assert_eq!(edges.pairs().collect::<Vec<_>>(), vec![(1, 0)]);
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let ids = ids(&["A", "B", "C"]);
        let edges = invert_edges("A B\nA B\nC B\n".as_bytes(), &ids).unwrap();

        assert_eq!(edges.num_edges(), 2);
        let sources: Vec<u32> = edges.sources(1).unwrap().iter().collect();
        assert_eq!(sources, vec![0, 2]);
    }

    #[test]
    fn test_self_loops_and_cycles_are_kept() {
        let ids = ids(&["A", "B"]);
        let edges = invert_edges("A A\nA B\nB A\n".as_bytes(), &ids).unwrap();

        assert_eq!(
            edges.pairs().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0)]
        );
    }

    #[test]
    fn test_targets_iterate_ascending() {
        let ids = ids(&["A", "B", "C", "D"]);
        let edges = invert_edges("A D\nB C\nC B\n".as_bytes(), &ids).unwrap();

        let targets: Vec<u32> = edges.iter().map(|(target, _)| target).collect();
        assert_eq!(targets, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let ids = ids(&["A", "B"]);
        let err = invert_edges("A B\nA Z\n".as_bytes(), &ids).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"), "{}", message);
        assert!(message.contains("\"Z\""), "{}", message);
    }

    #[test]
    fn test_wrong_field_count_is_an_error() {
        let ids = ids(&["A", "B", "C"]);
        assert!(invert_edges("A B C\n".as_bytes(), &ids).is_err());
        assert!(invert_edges("A\n".as_bytes(), &ids).is_err());
    }
}
