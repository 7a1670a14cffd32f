pub mod config;
pub mod model;
pub mod rating;
pub mod routes;
pub mod search;
pub mod session;
pub mod theme;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use config::AppConfig;
use rating::DISPLAY_ORDER;
use search::{JikanProvider, SearchEngine};
use session::Identity;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "anirate",
    version,
    about = "Incremental anime search with rating palette encoding"
)]
pub struct Cli {
    /// Path to a config file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search anime titles and print suggestions
    Search {
        /// Free-text query (two characters minimum)
        query: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Print surviving records as JSON instead of a suggestion list
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the rating palette: labels, ordinals, colors
    Palette {
        /// Emit JSON instead of colored text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the identity stored in ambient cookie state
    Whoami {
        /// Override the data dir holding cookie state
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::Search { query, limit, json } => run_search(&config, &query, limit, json).await,
        Commands::Palette { json } => run_palette(json),
        Commands::Whoami { data_dir } => run_whoami(data_dir),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "anirate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

async fn run_search(config: &AppConfig, query: &str, limit: usize, json: bool) -> Result<()> {
    let provider = JikanProvider::with_base_url(&config.api_base_url)?;
    let mut engine = SearchEngine::with_settings(
        provider,
        config.debounce(),
        config.min_query_len,
        limit.min(config.suggestion_limit),
    );

    engine.set_query_text(query);
    engine.refresh().await;
    let snapshot = engine.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.records)?);
        return Ok(());
    }

    if snapshot.suggestions.is_empty() {
        println!("No matches for '{query}'.");
        return Ok(());
    }
    for (suggestion, record) in snapshot.suggestions.iter().zip(&snapshot.records) {
        let category = record
            .category
            .as_ref()
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "-".to_string());
        let episodes = record
            .episodes
            .map(|n| format!("{n} ep"))
            .unwrap_or_else(|| "? ep".to_string());
        println!(
            "{:>8}  {}  {}",
            record.mal_id.to_string().dimmed(),
            suggestion.bold(),
            format!("[{category}, {episodes}]").dimmed()
        );
    }
    Ok(())
}

fn run_palette(json: bool) -> Result<()> {
    if json {
        let entries: Vec<serde_json::Value> = DISPLAY_ORDER
            .iter()
            .map(|label| {
                serde_json::json!({
                    "label": label.as_str(),
                    "ordinal": label.ordinal(),
                    "color": label.color().as_hex(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for label in DISPLAY_ORDER {
        let (r, g, b) = label.color().rgb();
        println!(
            "{}  {:>12}  {}",
            label.ordinal(),
            label.as_str().truecolor(r, g, b).bold(),
            label.color().as_hex().dimmed()
        );
    }
    Ok(())
}

fn run_whoami(data_dir: Option<PathBuf>) -> Result<()> {
    let data_dir = data_dir.unwrap_or_else(config::default_data_dir);
    let identity = Identity::load(&data_dir);
    println!("username: {}", identity.username());
    if identity.is_signed_in() {
        println!("user_id:  {}", identity.user_id());
        println!("token:    present");
    } else {
        println!("token:    none");
    }
    Ok(())
}

/// Re-exported for rendering code that maps ordinals to colors directly.
pub use rating::{color_from_embedded, color_from_ordinal};
