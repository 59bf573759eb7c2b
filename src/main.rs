//! Wiki-Ripple main entry point
//!
//! This is the command-line interface for the Wiki-Ripple article graph explorer.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_ripple::config::{load_config_with_hash, Config};
use wiki_ripple::crawler::{build_graph, run_queries, HtmlMetadataExtractor, PoliteFetcher};
use wiki_ripple::graph::PageDirectory;
use wiki_ripple::output::{
    collect_statistics, format_page_summary, format_path, print_statistics, render_tree,
};

/// Wiki-Ripple: a polite article graph explorer
///
/// Wiki-Ripple loads encyclopedia articles outwards from configured seeds,
/// politely (cached, throttled and capped), then looks for link paths between
/// articles within the part of the graph it has discovered.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version)]
#[command(about = "A polite article graph explorer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be loaded without fetching anything
    #[arg(long, conflicts_with_all = ["tree", "stats"])]
    dry_run: bool,

    /// Print the link tree of every seed
    #[arg(long)]
    tree: bool,

    /// Print directory statistics after loading
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(&config, cli.tree, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Wiki-Ripple Dry Run ===\n");

    println!("Fetcher Configuration:");
    println!("  Article prefix: {}", config.fetcher.article_prefix);
    println!("  Cache directory: {}", config.fetcher.cache_dir);
    println!(
        "  Minimum request interval: {}ms",
        config.fetcher.min_request_interval
    );
    println!("  Max requests: {}", config.fetcher.max_requests);
    println!("  Request timeout: {}s", config.fetcher.request_timeout);
    println!("  Ignore cache: {}", config.fetcher.ignore_cache);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!(
            "  - {} (breadth {}, depth {})",
            seed.id,
            seed.breadth_limit(&config.crawl),
            seed.depth_budget(&config.crawl)
        );
    }

    println!("\nQueries ({}):", config.queries.len());
    for query in &config.queries {
        println!(
            "  - {} -> {} (max path length {})",
            query.from,
            query.to,
            query.max_path_length(&config.crawl)
        );
    }

    println!("\n✓ Configuration is valid");
}

/// Loads the graph, answers the queries and prints what was asked for
async fn handle_run(config: &Config, tree: bool, stats: bool) -> anyhow::Result<()> {
    let mut fetcher = PoliteFetcher::new(&config.fetcher, &config.user_agent)
        .context("Failed to build HTTP client")?;
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();

    tracing::info!(
        "Seeds: {}, queries: {}",
        config.seeds.len(),
        config.queries.len()
    );

    if let Err(e) = build_graph(config, &mut fetcher, &extractor, &mut directory).await {
        tracing::error!("Graph building failed: {}", e);
        return Err(e.into());
    }

    println!(
        "Loaded pages: {}",
        directory.ids().collect::<Vec<_>>().join(", ")
    );

    for seed in &config.seeds {
        if let Some(node) = directory.get(&seed.id) {
            println!("\n{}", format_page_summary(node));
        }
    }

    if tree {
        for seed in &config.seeds {
            println!("\nTree diagram, starting at '{}'", seed.id);
            print!(
                "{}",
                render_tree(&directory, &seed.id, config.crawl.tree_display_limit)
            );
        }
    }

    for outcome in run_queries(config, &directory) {
        println!(
            "Path found from {} to {}: {}",
            outcome.from,
            outcome.to,
            format_path(outcome.path.as_deref())
        );
    }

    if stats {
        println!();
        print_statistics(&collect_statistics(&directory, &fetcher));
    }

    Ok(())
}
