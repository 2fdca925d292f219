// src/main.rs
// =============================================================================
// Entry point of the wiki-wordfreq CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Dispatch to the subcommand handler
// 4. Exit with a proper code:
//      0 = success
//      1 = nothing to do / nothing counted (missing article, empty store)
//      2 = error (store unreadable, bad configuration, ...)
// =============================================================================

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wiki_wordfreq::{
    coverage_against, relative_frequency_table, tokenize, Accumulator, ArticleId, ConfigError,
    CountStore, CrawlConfig, CrawlReport, Crawler, DirectorySource, FrequencyRow, JsonFileStore,
    Page, PageSource, RankMode, SourceConfig, TableBaseline, VisitOutcome, WikiSource, WordCount,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout stays clean for tables and --json output.
// RUST_LOG overrides the default level.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "wiki_wordfreq=debug"
    } else {
        "wiki_wordfreq=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let store = JsonFileStore::new(&cli.store);

    match &cli.command {
        Commands::Summary { phrase } => handle_summary(&cli, phrase).await,
        Commands::Count { phrase } => handle_count(&cli, store, phrase).await,
        Commands::Crawl {
            seed,
            depth,
            wait,
            concurrency,
        } => {
            let config = CrawlConfig {
                max_depth: *depth,
                delay: *wait,
                concurrency: *concurrency,
            };
            handle_crawl(&cli, store, seed, config).await
        }
        Commands::Analyze {
            mode,
            count,
            baseline,
            lang,
            json,
        } => handle_analyze(&store, *mode, *count, baseline, lang, *json),
        Commands::Score { baseline, lang, top_k } => handle_score(&store, baseline, lang, *top_k),
    }
}

// Offline directory if given, otherwise the live wiki.
fn build_source(cli: &Cli) -> Result<Box<dyn PageSource>> {
    if let Some(dir) = &cli.offline_dir {
        return Ok(Box::new(DirectorySource::new(dir)));
    }

    let config = SourceConfig {
        base_url: cli.base_url.clone(),
        timeout: cli.timeout,
        ..SourceConfig::default()
    };
    Ok(Box::new(WikiSource::new(&config)?))
}

fn parse_title(raw: &str) -> Result<ArticleId, ConfigError> {
    ArticleId::new(raw).ok_or_else(|| ConfigError::InvalidSeed(raw.to_string()))
}

// Handles the 'summary' subcommand. Reads nothing from or into the store.
async fn handle_summary(cli: &Cli, phrase: &str) -> Result<i32> {
    let article = parse_title(phrase)?;
    let source = build_source(cli)?;

    match source.fetch(&article).await {
        Ok(Page {
            summary: Some(summary),
            ..
        }) => {
            println!("{}", summary);
            Ok(0)
        }
        Ok(_) => {
            println!("⚠️  No summary found for '{}'", article);
            Ok(1)
        }
        Err(e) => {
            println!("❌ Could not load page for '{}': {}", article, e);
            Ok(1)
        }
    }
}

// Handles the 'count' subcommand: one article, no link following.
async fn handle_count(cli: &Cli, store: JsonFileStore, phrase: &str) -> Result<i32> {
    let article = parse_title(phrase)?;
    let source = build_source(cli)?;
    let accumulator = Accumulator::new(store);

    let page = match source.fetch(&article).await {
        Ok(page) => page,
        Err(e) => {
            println!("❌ Could not load page for '{}': {}", article, e);
            return Ok(1);
        }
    };

    let counts = tokenize(&page.text);
    if counts.is_empty() {
        println!("⚠️  No words found in article '{}'", article);
        return Ok(1);
    }

    let totals = accumulator
        .merge(&counts)
        .with_context(|| format!("failed to update {}", cli.store.display()))?;

    println!(
        "✅ Counted {} words ({} distinct) in '{}'",
        counts.total(),
        counts.len(),
        article
    );
    println!("📊 Store now holds {} words ({} distinct)", totals.total(), totals.len());
    Ok(0)
}

// Handles the 'crawl' subcommand. Ctrl-C stops the crawl after the
// article being processed; everything merged so far is kept.
async fn handle_crawl(
    cli: &Cli,
    store: JsonFileStore,
    seed: &str,
    config: CrawlConfig,
) -> Result<i32> {
    let seed = parse_title(seed)?;
    let source = build_source(cli)?;
    let accumulator = Accumulator::new(store);

    println!("🔍 Crawling from: {}", seed);
    println!("📊 Max depth: {}, wait: {:?}", config.max_depth, config.delay);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("⏹️  Interrupted, stopping crawl...");
            ctrl_c.cancel();
        }
    });

    let report = Crawler::new(source.as_ref(), &accumulator, config)
        .crawl_with_cancellation(seed, cancel)
        .await
        .with_context(|| {
            format!(
                "crawl aborted; {} keeps the counts merged so far",
                cli.store.display()
            )
        })?;

    print_crawl_report(&report);

    if report.counted() > 0 {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_crawl_report(report: &CrawlReport) {
    println!();
    println!("{:<50} {:>6} {:<30}", "ARTICLE", "DEPTH", "RESULT");
    println!("{}", "=".repeat(88));

    for visit in &report.visits {
        let result = match &visit.outcome {
            VisitOutcome::Counted { words, occurrences } => {
                format!("✅ {} words ({} distinct)", occurrences, words)
            }
            VisitOutcome::NoWords => "⚠️  no words".to_string(),
            VisitOutcome::Failed(reason) => format!("❌ {}", reason),
        };
        println!("{:<50} {:>6} {:<30}", truncate(visit.article.as_str(), 50), visit.depth, result);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Counted: {}", report.counted());
    println!("   ❌ Failed: {}", report.failed());
    println!("   🔤 Words added: {}", report.occurrences());
    if report.cancelled {
        println!("   ⏹️  Cancelled with {} article(s) not processed", report.unprocessed);
    }
}

fn load_counts(store: &JsonFileStore) -> Result<Option<WordCount>> {
    let counts = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    if counts.is_empty() {
        println!(
            "⚠️  No word counts found in {}. Run `count` or `crawl` first.",
            store.path().display()
        );
        return Ok(None);
    }
    Ok(Some(counts))
}

// Handles the 'analyze' subcommand
fn handle_analyze(
    store: &JsonFileStore,
    mode: RankMode,
    count: usize,
    baseline_path: &Path,
    lang: &str,
    json: bool,
) -> Result<i32> {
    let Some(counts) = load_counts(store)? else {
        return Ok(1);
    };
    let baseline = TableBaseline::from_json_file(lang, baseline_path)?;

    let rows = relative_frequency_table(&counts, &baseline, lang, mode, count);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("--- Word frequency, ranked by {} (normalized) ---", mode);
        print_frequency_table(&rows);
    }
    Ok(0)
}

fn print_frequency_table(rows: &[FrequencyRow]) {
    println!("{:<24} {:>12} {:>12}", "WORD", "ARTICLE", "LANGUAGE");
    println!("{}", "=".repeat(50));
    for row in rows {
        println!(
            "{:<24} {:>12} {:>12}",
            truncate(&row.word, 24),
            format_frequency(row.article_frequency),
            format_frequency(row.baseline_frequency)
        );
    }
}

// Undefined frequencies print as "-" rather than 0.
fn format_frequency(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

// Handles the 'score' subcommand
fn handle_score(
    store: &JsonFileStore,
    baseline_path: &Path,
    lang: &str,
    top_k: usize,
) -> Result<i32> {
    let Some(counts) = load_counts(store)? else {
        return Ok(1);
    };
    let baseline = TableBaseline::from_json_file(lang, baseline_path)?;

    let score = coverage_against(&counts, &baseline, lang, top_k);

    println!("📊 Total words: {} ({} distinct)", counts.total(), counts.len());
    println!("🌐 Coverage by top {} '{}' words: {:.2}%", top_k, lang, score);
    Ok(0)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
