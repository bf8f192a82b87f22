//! Plain-text writers for the derived views.
//!
//! Every line is space separated and newline terminated. When a line ends in
//! a list, the separator before the list is always written, so an empty list
//! leaves a trailing space (`"0 0 \n"`).

use std::io::{self, Write};

use crate::content::NodeRecord;
use crate::dense_map::DenseMap;
use crate::edges::EdgeSet;

fn write_list<W: Write, I: IntoIterator<Item = u32>>(writer: &mut W, items: I) -> io::Result<()> {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            writer.write_all(b" ")?;
        }
        write!(writer, "{}", item)?;
    }
    Ok(())
}

/// `<node> <label> <features...>` per record.
pub fn write_content<W: Write>(writer: &mut W, records: &[NodeRecord]) -> io::Result<()> {
    for record in records {
        write!(writer, "{} {} ", record.node, record.label)?;
        write_list(writer, record.features.iter().copied())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// `<node> <label>` per record.
pub fn write_labels<W: Write>(writer: &mut W, records: &[NodeRecord]) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{} {}", record.node, record.label)?;
    }
    Ok(())
}

/// `<node> <features...>` per record.
pub fn write_features<W: Write>(writer: &mut W, records: &[NodeRecord]) -> io::Result<()> {
    for record in records {
        write!(writer, "{} ", record.node)?;
        write_list(writer, record.features.iter().copied())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// `<target> <sources...>` per target, targets ascending.
pub fn write_adjacency<W: Write>(writer: &mut W, edges: &EdgeSet) -> io::Result<()> {
    for (target, sources) in edges.iter() {
        write!(writer, "{} ", target)?;
        write_list(writer, sources.iter())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// `<target> <source>` per edge.
pub fn write_edge_list<W: Write>(writer: &mut W, edges: &EdgeSet) -> io::Result<()> {
    for (target, source) in edges.pairs() {
        writeln!(writer, "{} {}", target, source)?;
    }
    Ok(())
}

/// `<index> <raw>` per entry, ascending by index.
pub fn write_dense_map<W: Write>(writer: &mut W, map: &DenseMap) -> io::Result<()> {
    for (index, raw) in map.iter() {
        writeln!(writer, "{} {}", index, raw)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn records() -> Vec<NodeRecord> {
        vec![
            NodeRecord {
                node: 0,
                label: 0,
                features: vec![1],
            },
            NodeRecord {
                node: 1,
                label: 1,
                features: vec![0, 1],
            },
        ]
    }

    #[test]
    fn test_content_lines() {
        let out = render(|w| write_content(w, &records()));
        assert_eq!(out, "0 0 1\n1 1 0 1\n");
    }

    #[test]
    fn test_label_lines() {
        let out = render(|w| write_labels(w, &records()));
        assert_eq!(out, "0 0\n1 1\n");
    }

    #[test]
    fn test_feature_lines() {
        let out = render(|w| write_features(w, &records()));
        assert_eq!(out, "0 1\n1 0 1\n");
    }

    #[test]
    fn test_empty_feature_list_keeps_separator() {
        let records = vec![NodeRecord {
            node: 3,
            label: 2,
            features: Vec::new(),
        }];
        assert_eq!(render(|w| write_content(w, &records)), "3 2 \n");
        assert_eq!(render(|w| write_features(w, &records)), "3 \n");
    }

    #[test]
    fn test_adjacency_and_edge_list() {
        let mut edges = EdgeSet::new();
        edges.insert(2, 5);
        edges.insert(0, 1);
        edges.insert(2, 3);

        assert_eq!(render(|w| write_adjacency(w, &edges)), "0 1\n2 3 5\n");
        assert_eq!(render(|w| write_edge_list(w, &edges)), "0 1\n2 3\n2 5\n");
    }

    #[test]
    fn test_empty_edge_set_writes_nothing() {
        let edges = EdgeSet::new();
        assert_eq!(render(|w| write_adjacency(w, &edges)), "");
        assert_eq!(render(|w| write_edge_list(w, &edges)), "");
    }

    #[test]
    fn test_dense_map_lines() {
        let map: DenseMap = ["n1", "n2"].into_iter().collect();
        assert_eq!(render(|w| write_dense_map(w, &map)), "0 n1\n1 n2\n");
    }
}
