//! Command line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "newsum",
    version,
    about = "Ingest AQUAINT / AQUAINT-2 / GIGAWORD newswire into topic sentence sets."
)]
pub struct Cli {
    /// Path to newsum.toml (defaults to $NEWSUM_CONFIG or ./newsum.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset, e.g. "debug" or "newsum_ingestion=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load all topics and report what was ingested
    Ingest(LoadArgs),

    /// Load all topics and write one sentence file per topic
    Export(ExportArgs),

    /// Show where document ids resolve on disk
    Resolve {
        /// Document ids, e.g. NYT19980903.0137 or APW_ENG_20050110.0001
        #[arg(required = true)]
        doc_ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Topic file (overrides run.topic_file)
    #[arg(long)]
    pub topics: Option<PathBuf>,

    /// Checkpoint file to restore from / write to (overrides run.checkpoint)
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Directory for the per-topic files (overrides run.output_dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Run identifier appended to every file name (overrides run.run_id)
    #[arg(long)]
    pub run_id: Option<String>,

    /// Minimum words per kept sentence (overrides segmentation.min_words)
    #[arg(long)]
    pub min_words: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_flags() {
        let cli = Cli::parse_from([
            "newsum", "--config", "n.toml", "export", "--topics", "t.xml", "--run-id", "3", "--min-words", "5",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("n.toml")));
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.load.topics, Some(PathBuf::from("t.xml")));
                assert_eq!(args.run_id.as_deref(), Some("3"));
                assert_eq!(args.min_words, Some(5));
                assert!(args.load.checkpoint.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_requires_ids() {
        assert!(Cli::try_parse_from(["newsum", "resolve"]).is_err());
        let cli = Cli::parse_from(["newsum", "resolve", "NYT19980903.0137"]);
        assert!(matches!(cli.command, Commands::Resolve { ref doc_ids } if doc_ids.len() == 1));
    }
}
