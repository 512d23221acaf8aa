use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use newsdash::app::{App, AppEvent};
use newsdash::config::Config;
use newsdash::feed::{FeedLoader, DEFAULT_TIMEOUT};
use newsdash::nav::{QueryString, CATEGORY_PARAM, LANGUAGE_PARAM};
use newsdash::ui;

/// Get the config directory path (~/.config/newsdash/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsdash"))
}

#[derive(Parser, Debug)]
#[command(
    name = "newsdash",
    about = "Terminal news dashboard: a featured story and a grid of cards per category"
)]
struct Args {
    /// Starting query string, e.g. "?category=tech&language=german"
    #[arg(long, value_name = "QUERY")]
    query: Option<String>,

    /// Category to open (overrides the one in --query)
    #[arg(long)]
    category: Option<String>,

    /// Language to request (overrides the one in --query)
    #[arg(long)]
    language: Option<String>,

    /// Base URL of the news API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (default: ~/.config/newsdash/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    fn initial_query(&self) -> QueryString {
        let mut query = self
            .query
            .as_deref()
            .map(QueryString::parse)
            .unwrap_or_default();
        if let Some(category) = &self.category {
            query.set(CATEGORY_PARAM, category);
        }
        if let Some(language) = &self.language {
            query.set(LANGUAGE_PARAM, language);
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let base_url = config
        .api_base_url(args.api_url.as_deref())
        .context("Invalid news API base URL")?;
    let timeout = config.request_timeout().unwrap_or(DEFAULT_TIMEOUT);
    let loader = FeedLoader::new(base_url, timeout).context("Failed to build HTTP client")?;
    tracing::info!(api = %loader.base_url(), "Starting newsdash");

    let mut app = App::new(&config, loader, args.initial_query());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx)
        .await
        .context("Dashboard exited with an error")?;

    let final_query = app.navigator.query().to_string();
    // Abort any in-flight loads while the runtime is still alive
    drop(app);

    println!("{}", final_query);
    Ok(())
}
