//! symptips command-line front end.
//!
//! Loads the reference data once, then answers each complaint given on the
//! command line (or each stdin line when none is given) with the JSON shape
//! `{"symptoms": [{"symptom": ..., "tips": [...]}]}`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use symptips::{
    Catalog, CorrectionStrategy, Lexicon, LexiconFormat, Pipeline, PipelineConfig, TipsRequest,
};

const DEFAULT_LOG_FILTER: &str = "symptips=info";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Closest lexicon word by similarity, above a cutoff
    Closest,
    /// Most frequent lexicon word within an edit distance
    Frequency,
}

#[derive(Parser)]
#[command(name = "symptips")]
#[command(version)]
#[command(about = "Map free-text health complaints to symptoms and tips", long_about = None)]
struct Cli {
    /// Symptoms CSV (Symptom_ID,Symptom)
    #[arg(long, default_value = "symptoms.csv")]
    symptoms: PathBuf,

    /// Tips CSV (Symptom_ID,Tip1,Tip2,...)
    #[arg(long, default_value = "tips.csv")]
    tips: PathBuf,

    /// Newline-delimited word list
    #[arg(long, default_value = "words.txt")]
    lexicon: PathBuf,

    /// Word list lines are `word count`
    #[arg(long)]
    lexicon_frequencies: bool,

    /// JSON pipeline configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the match threshold (0-100)
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the spelling correction strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Treat each input as a JSON request body ({"text": ...})
    #[arg(long)]
    json_input: bool,

    /// Pretty-print output
    #[arg(long)]
    pretty: bool,

    /// Complaints to look up; stdin lines are read when omitted
    text: Vec<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.match_threshold = threshold;
    }
    match cli.strategy {
        Some(Strategy::Closest) => {
            config.correction = CorrectionStrategy::ClosestMatch {
                cutoff: symptips::config::DEFAULT_SIMILARITY_CUTOFF,
            }
        }
        Some(Strategy::Frequency) => {
            config.correction = CorrectionStrategy::Frequency {
                max_edit_distance: symptips::config::DEFAULT_MAX_EDIT_DISTANCE,
            }
        }
        None => {}
    }
    config.validate()?;
    Ok(config)
}

fn answer(pipeline: &Pipeline, cli: &Cli, input: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let request = if cli.json_input {
        TipsRequest::from_json(input)
    } else {
        TipsRequest {
            text: input.trim().to_string(),
        }
    };
    let response = pipeline.process_request(&request);
    if cli.pretty {
        serde_json::to_writer_pretty(&mut *out, &response)?;
    } else {
        serde_json::to_writer(&mut *out, &response)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let catalog = Catalog::from_csv_paths(&cli.symptoms, &cli.tips).with_context(|| {
        format!(
            "loading catalog from {} and {}",
            cli.symptoms.display(),
            cli.tips.display()
        )
    })?;
    let format = if cli.lexicon_frequencies {
        LexiconFormat::Frequencies
    } else {
        LexiconFormat::WordList
    };
    let lexicon = Lexicon::from_path(&cli.lexicon, format)
        .with_context(|| format!("loading lexicon {}", cli.lexicon.display()))?;
    let pipeline = Pipeline::new(catalog, lexicon, config)?;
    tracing::info!("symptips ready v{}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.text.is_empty() {
        for line in io::stdin().lock().lines() {
            answer(&pipeline, &cli, &line?, &mut out)?;
        }
    } else {
        for text in &cli.text {
            answer(&pipeline, &cli, text, &mut out)?;
        }
    }
    Ok(())
}
