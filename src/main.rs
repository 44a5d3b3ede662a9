//! ftrie CLI - Command line interface for fuzzy_trie
//!
//! Indexes a word list and answers exact, prefix and typo-tolerant queries
//! against it. Each invocation reads the word list afresh.

use clap::{Parser, Subcommand};
use fuzzy_trie::{Config, Lexicon};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ftrie")]
#[command(about = "Typo-tolerant lookup over a word list")]
#[command(version)]
struct Cli {
    /// Word list to index (`key` or `key<separator>value` per line)
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Config file (default: ~/.config/fuzzy_trie/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an entry and its associated values
    Lookup {
        /// The entry to look up
        key: String,
    },

    /// Check whether an entry is indexed
    Contains {
        /// The entry to check
        key: String,
    },

    /// Find entries within an edit distance of a query
    Fuzzy {
        /// The search query
        query: String,
        /// Maximum edit distance (default from config)
        #[arg(short = 'e', long)]
        max_edits: Option<usize>,
        /// Maximum number of results (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List entries starting with a prefix
    Prefix {
        /// The prefix to complete
        prefix: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show index statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    let mut lexicon = Lexicon::with_config(config);
    let loaded = lexicon
        .load_file(&cli.words)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", cli.words.display(), e))?;
    tracing::debug!(loaded, path = %cli.words.display(), "word list indexed");

    match cli.command {
        Commands::Lookup { key } => match lexicon.lookup_exact(&key) {
            Some(stored) => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "key": stored,
                        "values": lexicon.values(&key).unwrap_or_default()
                    }),
                )?;
            }
            None => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "error",
                        "message": format!("Entry not found: {}", key)
                    }),
                )?;
                std::process::exit(1);
            }
        },

        Commands::Contains { key } => {
            output(
                &cli.format,
                &serde_json::json!({
                    "key": key,
                    "present": lexicon.contains(&key)
                }),
            )?;
        }

        Commands::Fuzzy {
            query,
            max_edits,
            limit,
        } => {
            let max_edits = max_edits.unwrap_or(lexicon.config().max_edits);
            let limit = limit.unwrap_or(lexicon.config().max_results);
            let matches = lexicon.fuzzy_lookup(&query, max_edits, limit)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "query": query,
                    "max_edits": max_edits,
                    "count": matches.len(),
                    "matches": matches
                }),
            )?;
        }

        Commands::Prefix { prefix, limit } => {
            let keys = lexicon.prefix_search(&prefix, limit);
            output(
                &cli.format,
                &serde_json::json!({
                    "prefix": prefix,
                    "count": keys.len(),
                    "keys": keys
                }),
            )?;
        }

        Commands::Stats => {
            let stats = lexicon.stats();
            output(
                &cli.format,
                &serde_json::json!({
                    "words": cli.words.display().to_string(),
                    "entries": stats.entries,
                    "nodes": stats.nodes,
                    "pairs": stats.pairs
                }),
            )?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
