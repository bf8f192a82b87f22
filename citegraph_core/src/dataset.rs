use std::path::{Path, PathBuf};

/// Where a dataset is read from and where its derived files go.
/// File names are derived from the dataset `name` (`cora` gives
/// `cora.content`, `cora.cites`, `cora.content.id`, ...).
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    pub name: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self::new("cora", ".", ".")
    }
}

impl DatasetLayout {
    pub fn new(name: &str, input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.to_string(),
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    fn input(&self, suffix: &str) -> PathBuf {
        self.input_dir.join(format!("{}.{}", self.name, suffix))
    }

    fn output(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", self.name, suffix))
    }

    pub fn content_path(&self) -> PathBuf {
        self.input("content")
    }

    pub fn cites_path(&self) -> PathBuf {
        self.input("cites")
    }

    pub fn content_id_path(&self) -> PathBuf {
        self.output("content.id")
    }

    pub fn label_path(&self) -> PathBuf {
        self.output("label")
    }

    pub fn feature_path(&self) -> PathBuf {
        self.output("feature")
    }

    pub fn adjacency_path(&self) -> PathBuf {
        self.output("adjs")
    }

    pub fn edge_path(&self) -> PathBuf {
        self.output("edge")
    }

    // The map files are not prefixed with the dataset name.
    pub fn id_map_path(&self) -> PathBuf {
        self.output_dir.join("id_map")
    }

    pub fn label_map_path(&self) -> PathBuf {
        self.output_dir.join("label_map")
    }

    pub fn nodes_parquet_path(&self) -> PathBuf {
        self.output("nodes.parquet")
    }

    pub fn edges_parquet_path(&self) -> PathBuf {
        self.output("edges.parquet")
    }
}
