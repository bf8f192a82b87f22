use anyhow::Result;
use citegraph::{DatasetConverter, DatasetLayout};
use clap::{Arg, ArgAction, Command};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("cora-convert")
        .about("Re-index a citation dataset into dense id, feature and adjacency files")
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .default_value("cora")
                .help("Dataset name. Reads <name>.content and <name>.cites"),
        )
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .short('i')
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory holding the raw dataset files (defaults to $DATA_DIR, then the working directory)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory for the converted files (defaults to the input directory)"),
        )
        .arg(
            Arg::new("parquet")
                .long("parquet")
                .action(ArgAction::SetTrue)
                .help("Also write node and edge tables as Parquet"),
        )
        .get_matches();

    let name: &String = matches.get_one::<String>("dataset").unwrap();
    let input_dir = resolve_input_dir(
        matches.get_one::<PathBuf>("input-dir"),
        std::env::var("DATA_DIR").ok(),
    );
    let output_dir: &PathBuf = matches
        .get_one::<PathBuf>("output-dir")
        .unwrap_or(&input_dir);

    info!(
        "Reading {} from {}, writing to {}",
        name,
        input_dir.display(),
        output_dir.display()
    );

    let layout = DatasetLayout::new(name, &input_dir, output_dir);
    let summary = DatasetConverter::new(layout)
        .with_parquet(matches.get_flag("parquet"))
        .run()?;

    info!(
        nodes = summary.nodes,
        labels = summary.labels,
        features = summary.feature_dim,
        targets = summary.targets,
        edges = summary.edges,
        "Done"
    );
    Ok(())
}

/// `--input-dir` wins over `DATA_DIR`, which wins over the working directory.
fn resolve_input_dir(arg: Option<&PathBuf>, data_dir: Option<String>) -> PathBuf {
    match (arg, data_dir) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) if !dir.is_empty() => {
            info!("Input directory taken from DATA_DIR: {}", dir);
            PathBuf::from(dir)
        }
        _ => PathBuf::from("."),
    }
}
