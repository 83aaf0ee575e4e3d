//! newsum binary: ingest topic document sets from the LDC newswire corpora,
//! export per-topic sentence files, and inspect id resolution.

mod cli;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use newsum_ingestion::realize::write_topic_summary;
use newsum_ingestion::{CorpusRegistry, Topic, TopicLoader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ExportArgs, LoadArgs};
use config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = cli
        .log_level
        .clone()
        .unwrap_or_else(|| "newsum=debug,newsum_ingestion=info,info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("newsum {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    info!(
        strategy = ?config.segmentation.strategy,
        min_words = config.segmentation.min_words,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Ingest(args) => run_ingest(&config, &args),
        Commands::Export(args) => run_export(&config, &args),
        Commands::Resolve { doc_ids } => run_resolve(&config, &doc_ids),
    }
}

fn load_topics(config: &Config, args: &LoadArgs) -> anyhow::Result<Vec<Topic>> {
    let topic_file: PathBuf = args
        .topics
        .clone()
        .or_else(|| config.run.topic_file.clone())
        .context("no topic file given (use --topics or run.topic_file)")?;
    let checkpoint = args.checkpoint.clone().or_else(|| config.run.checkpoint.clone());

    let loader = TopicLoader::new(
        CorpusRegistry::from_roots(&config.corpora),
        config.segmentation.strategy.splitter(),
    );
    let topics = loader
        .load_topics(&topic_file, checkpoint.as_deref())
        .with_context(|| format!("loading topics from {}", topic_file.display()))?;
    Ok(topics)
}

fn run_ingest(config: &Config, args: &LoadArgs) -> anyhow::Result<()> {
    let topics = load_topics(config, args)?;

    for topic in &topics {
        println!(
            "{}\t{}\tdocuments={}\tsentences={}",
            topic.id(),
            topic.title,
            topic.documents.len(),
            topic.sentence_count()
        );
    }
    info!(n_topics = topics.len(), "✅ Ingestion complete");
    Ok(())
}

fn run_export(config: &Config, args: &ExportArgs) -> anyhow::Result<()> {
    let topics = load_topics(config, &args.load)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.run.output_dir.clone());
    let run_id = args.run_id.clone().unwrap_or_else(|| config.run.run_id.clone());
    let min_words = args.min_words.unwrap_or(config.segmentation.min_words);

    for topic in &topics {
        let sentences = topic
            .documents
            .iter()
            .flat_map(|doc| doc.filtered_sentences(min_words));
        let path = write_topic_summary(&output_dir, topic, &run_id, sentences)?;
        info!(topic = %topic.id(), path = %path.display(), "Wrote topic file");
    }
    info!(n_topics = topics.len(), output_dir = %output_dir.display(), "✅ Export complete");
    Ok(())
}

fn run_resolve(config: &Config, doc_ids: &[String]) -> anyhow::Result<()> {
    let registry = CorpusRegistry::from_roots(&config.corpora);
    for doc_id in doc_ids {
        match registry.resolve(doc_id) {
            Some(loc) => println!("{doc_id}\t{}\t{}\t{}", loc.kind, loc.date, loc.path.display()),
            None => {
                warn!(doc_id = %doc_id, "Unresolved");
                println!("{doc_id}\tunresolved");
            }
        }
    }
    Ok(())
}
