use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use nstmine::config::Config;
use nstmine::corpus::nst;
use nstmine::output::terminal;
use nstmine::store::{stats, subtitles, topics};
use nstmine::viz::stats::{create_stats_table, norwegian_stop_words};
use nstmine::viz::wordcloud;

/// nstmine: inspect and render artifacts of the NST subtitle text-mining workflow.
///
/// Reads the semicolon CSV artifacts (subtitles, stats, topics) written by the
/// preprocessing and topic-modeling steps, and samples the raw NST export.
#[derive(Parser)]
#[command(name = "nstmine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute dataset stats for a subtitles file
    Stats {
        /// Folder relative to the root (the file lives in <folder>/data/)
        #[arg(long)]
        folder: String,

        /// Subtitles file name without extension
        #[arg(long)]
        name: String,

        /// Also write <folder>/stats/<name>_stats.csv
        #[arg(long)]
        save: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the topics of a topic model output file
    Topics {
        #[command(flatten)]
        source: TopicSource,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Render topics as a grid of word clouds (SVG)
    Wordcloud {
        #[command(flatten)]
        source: TopicSource,

        /// Output SVG path
        #[arg(long)]
        out: PathBuf,

        /// Number of topics to render (default: all)
        #[arg(long)]
        num_topics: Option<usize>,

        /// Title above the grid (default: the file name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Sample programs from the NST export directory
    Sample {
        /// Number of programs to keep (default: NSTMINE_SAMPLE_SIZE or 1000)
        #[arg(long)]
        size: Option<usize>,

        /// Load every file instead of a random sample
        #[arg(long)]
        full: bool,
    },

    /// Show configured paths and what exists under them
    Status,
}

#[derive(Args)]
struct TopicSource {
    /// Folder relative to the root
    #[arg(long)]
    folder: String,

    /// Topics file name without model suffix or extension
    #[arg(long)]
    name: String,

    /// Model that produced the file
    #[arg(long, value_enum, default_value = "plain")]
    model: ModelKind,

    /// Topic count in the LDA file name (default: 8)
    #[arg(long, default_value = "8")]
    lda_topics: usize,

    /// Embedding in the top2vec file name (default: distiluse)
    #[arg(long, default_value = "distiluse")]
    embedding: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelKind {
    Plain,
    Lda,
    Top2vec,
}

impl TopicSource {
    fn model(&self) -> topics::TopicModel {
        match self.model {
            ModelKind::Plain => topics::TopicModel::Plain,
            ModelKind::Lda => topics::TopicModel::Lda {
                num_topics: self.lda_topics,
            },
            ModelKind::Top2vec => topics::TopicModel::Top2Vec {
                embedding: self.embedding.clone(),
            },
        }
    }

    fn load(&self, config: &Config) -> Result<topics::Topics> {
        let model = self.model();
        let path = topics::topics_path(config, &self.folder, &self.name, &model);
        topics::load_model_topics(config, &self.folder, &self.name, &model)
            .with_context(|| format!("Failed to load topics from {}", path.display()))
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nstmine=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Stats {
            folder,
            name,
            save,
            json,
        } => {
            if !subtitles::subtitles_file_exists(&config, &folder, &name) {
                anyhow::bail!(
                    "No subtitles file at {}",
                    subtitles::subtitles_path(&config, &folder, &name).display()
                );
            }
            let programs = subtitles::load_subtitles(&config, &folder, &name)?;
            info!(programs = programs.len(), "Loaded subtitles");

            let table = create_stats_table(programs.values(), &norwegian_stop_words());

            if json {
                let object: serde_json::Map<String, serde_json::Value> = table
                    .iter()
                    .map(|(label, value)| (label.to_string(), serde_json::json!(value)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&object)?);
            } else {
                terminal::display_stats_table(&format!("Stats for {name}"), &table);
            }

            if save {
                let stats_dir = config.folder(&folder).join("stats");
                std::fs::create_dir_all(&stats_dir).with_context(|| {
                    format!("Failed to create stats directory: {}", stats_dir.display())
                })?;
                stats::write_stats_file(&config, &folder, &name, &table)?;
                println!(
                    "{} {}",
                    "Saved".green(),
                    stats::stats_path(&config, &folder, &name).display()
                );
            }
        }

        Commands::Topics { source, json } => {
            let loaded = source.load(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&loaded)?);
            } else {
                terminal::display_topics(&loaded, &source.model());
            }
        }

        Commands::Wordcloud {
            source,
            out,
            num_topics,
            title,
        } => {
            let loaded = source.load(&config)?;
            let weighted: Vec<wordcloud::TopicWeights> = loaded
                .values()
                .map(|words| wordcloud::rank_weights(words))
                .collect();
            let count = num_topics.unwrap_or(weighted.len());
            let title = title.unwrap_or_else(|| source.name.clone());

            wordcloud::display_n_wordclouds(&weighted, &title, count, &out)?;
            println!(
                "{} {} topic clouds to {}",
                "Rendered".green(),
                count.min(weighted.len()),
                out.display()
            );
        }

        Commands::Sample { size, full } => {
            config.require_nst()?;
            let size = size.unwrap_or(config.sample_size);
            println!("Sampling NST corpus from {}...", config.nst_path.display());
            let sample = nst::load_nst_sample_from_corpus(&config, size, full)?;
            terminal::display_sample_summary(&sample);
            println!("Sample size: {}", sample.len());
        }

        Commands::Status => {
            nstmine::status::show(&config);
        }
    }

    Ok(())
}
