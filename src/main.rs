use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use reviewmatch::catalog::file::JsonFileSource;
use reviewmatch::catalog::http::HttpProductSource;
use reviewmatch::catalog::models::ProductRecord;
use reviewmatch::catalog::traits::ProductSource;
use reviewmatch::config::{Config, SourceBackend};
use reviewmatch::corpus::coordinator::{
    CorpusUpdateCoordinator, CycleReport, UpdateCommand, UpdateOutcome,
};
use reviewmatch::error::FetchError;
use reviewmatch::output::{export, terminal};
use reviewmatch::reviews::{normalize, terms};
use reviewmatch::sentiment::lexicon::LexiconScorer;

/// reviewmatch: find products similar to a given one by what reviewers say.
///
/// Reviews are deduplicated, scored for sentiment, and compared as bags of
/// words across every product fetched so far.
#[derive(Parser)]
#[command(name = "reviewmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend products for one locator, then interactively add more
    Recommend {
        /// Product locator (URL, path relative to the source URL, or file)
        locator: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Index several locators at once and recommend for one of them
    Index {
        /// Product locators, indexed in the order given
        #[arg(required = true)]
        locators: Vec<String>,

        /// Title to recommend for (default: the last product indexed)
        #[arg(long)]
        target: Option<String>,

        /// Number of fetches in flight at once (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Http,
    File,
}

/// Flags shared by every command; each overrides its env var.
#[derive(Args)]
struct RunArgs {
    /// Where product records come from
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Base URL for relative HTTP locators
    #[arg(long)]
    source_url: Option<String>,

    /// Number of recommendations to return (1 to 5)
    #[arg(long)]
    top_k: Option<usize>,

    /// Drop the target product from its own recommendations
    #[arg(long)]
    exclude_self: bool,

    /// Ignore English stop words when comparing reviews
    #[arg(long)]
    stop_words: bool,

    /// Export file for the final recommendations
    #[arg(long)]
    output: Option<String>,
}

impl RunArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source_backend = match source {
                SourceArg::Http => SourceBackend::Http,
                SourceArg::File => SourceBackend::File,
            };
        }
        if let Some(url) = &self.source_url {
            config.source_url = url.clone();
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if self.exclude_self {
            config.include_self = false;
        }
        if self.stop_words {
            config.remove_stop_words = true;
        }
        if let Some(output) = &self.output {
            config.export_path = output.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reviewmatch=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { locator, run } => {
            let config = load_config(&run)?;
            let source = create_source(&config)?;

            let spinner = fetch_spinner(&locator);
            let initialized = CorpusUpdateCoordinator::initialize(
                source,
                Box::new(LexiconScorer::new()),
                config.coordinator_settings(),
                &locator,
            )
            .await;
            spinner.finish_and_clear();

            let mut coordinator =
                initialized.with_context(|| format!("Could not load the first product from {locator}"))?;

            show_cycle(coordinator.last_report());

            let mut last_locator = locator;
            loop {
                let Some(answer) = prompt("Do you want to update the data? (y/n): ").await? else {
                    break;
                };
                if answer.trim().to_lowercase() != "y" {
                    break;
                }

                let next = prompt(&format!("Product locator (blank for {last_locator}): "))
                    .await?
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| last_locator.clone());

                let command = UpdateCommand::new(next.clone())
                    .with_retries(config.max_attempts, config.retry_delay);

                let spinner = fetch_spinner(&next);
                let outcome = coordinator.execute(&command).await;
                spinner.finish_and_clear();

                match outcome {
                    UpdateOutcome::Success(report) => {
                        show_cycle(&report);
                        last_locator = next;
                    }
                    UpdateOutcome::Failure {
                        locator,
                        attempts,
                        error,
                    } => {
                        println!(
                            "  {} {} ({} attempt{})",
                            "Update failed:".red().bold(),
                            error,
                            attempts,
                            if attempts == 1 { "" } else { "s" }
                        );
                        println!(
                            "  {}",
                            format!("Corpus unchanged. Answer y to retry {locator} or another product.")
                                .dimmed()
                        );
                    }
                }
            }

            let report = coordinator.last_report().clone();
            finish(&coordinator, &report, &config)?;
        }

        Commands::Index {
            locators,
            target,
            concurrency,
            run,
        } => {
            let config = load_config(&run)?;
            let source = create_source(&config)?;

            println!("Fetching {} products...", locators.len());
            let fetched = fetch_all(source.as_ref(), &locators, concurrency.max(1)).await;

            let mut coordinator: Option<CorpusUpdateCoordinator> = None;
            let mut pending = Some(source);
            let mut failures = 0usize;

            for (locator, result) in fetched {
                let record = match result {
                    Ok(record) => record,
                    Err(e) => {
                        failures += 1;
                        warn!(locator = %locator, error = %e, "Skipping product");
                        println!("  {} {locator}: {e}", "Skipped".yellow());
                        continue;
                    }
                };

                match coordinator.as_mut() {
                    Some(c) => {
                        c.apply(record)?;
                    }
                    None => {
                        let source = pending
                            .take()
                            .context("product source already handed to the coordinator")?;
                        coordinator = Some(CorpusUpdateCoordinator::from_record(
                            source,
                            Box::new(LexiconScorer::new()),
                            config.coordinator_settings(),
                            record,
                        )?);
                    }
                }
            }

            let Some(coordinator) = coordinator else {
                anyhow::bail!("None of the {} locators could be fetched", locators.len());
            };

            info!(
                indexed = coordinator.snapshot().len(),
                failures, "Batch indexing complete"
            );

            let mut report = coordinator.last_report().clone();
            if let Some(title) = target {
                let (_, entry) = coordinator
                    .snapshot()
                    .get(&title)
                    .with_context(|| format!("{title} is not among the indexed products"))?;
                report.sentiment = entry.sentiment.clone();
                report.recommendations = coordinator.recommend(&title)?;
                report.title = title;
            }

            println!(
                "\nIndexed {} products ({} skipped).",
                coordinator.snapshot().len(),
                failures
            );
            terminal::display_recommendations(&report.recommendations);
            finish(&coordinator, &report, &config)?;
        }
    }

    Ok(())
}

/// Load config from the environment, apply CLI overrides, and validate.
fn load_config(run: &RunArgs) -> Result<Config> {
    let mut config = Config::load()?;
    run.apply(&mut config);
    config.require_top_k()?;
    Ok(config)
}

/// Create a product source based on the configured backend.
fn create_source(config: &Config) -> Result<Box<dyn ProductSource>> {
    match config.source_backend {
        SourceBackend::Http => {
            info!(base_url = %config.source_url, "Using HTTP product source");
            let source = HttpProductSource::new(&config.source_url, config.fetch_timeout)
                .context("Failed to build HTTP client")?;
            Ok(Box::new(source))
        }
        SourceBackend::File => {
            info!("Using local JSON file product source");
            Ok(Box::new(JsonFileSource::new()))
        }
    }
}

/// Fetch every locator with bounded concurrency, keeping input order.
async fn fetch_all(
    source: &dyn ProductSource,
    locators: &[String],
    concurrency: usize,
) -> Vec<(String, Result<ProductRecord, FetchError>)> {
    let pb = ProgressBar::new(locators.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Fetching [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let results = stream::iter(locators.iter().cloned())
        .map(|locator| {
            let pb = pb.clone();
            async move {
                let result = source.fetch(&locator).await;
                pb.inc(1);
                (locator, result)
            }
        })
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await;

    pb.finish_and_clear();
    results
}

/// Recommendations plus a one-line sentiment summary for a finished cycle.
fn show_cycle(report: &CycleReport) {
    println!(
        "\n{} {} ({} products indexed)",
        "Product:".bold(),
        report.title,
        report.corpus_size
    );
    match report.sentiment.mean() {
        Some(mean) => println!(
            "  {} distinct reviews, mean sentiment {:+.3}",
            report.sentiment.len(),
            mean
        ),
        None => println!("  {} distinct reviews", report.sentiment.len()),
    }
    terminal::display_recommendations(&report.recommendations);
}

/// Final presentation and export for the product a session ended on.
fn finish(
    coordinator: &CorpusUpdateCoordinator,
    report: &CycleReport,
    config: &Config,
) -> Result<()> {
    terminal::display_sentiment(&report.title, &report.sentiment);

    if let Some((record, _)) = coordinator.snapshot().get(&report.title) {
        let reviews = normalize::normalize(&record.reviews);
        let key_terms = terms::key_terms(reviews.as_slice(), 8);
        terminal::display_key_terms(&record.title, &key_terms);
    }

    terminal::display_ratings(coordinator.snapshot().records());

    let path = export::write_recommendations(&report.recommendations, &config.export_path)?;
    println!(
        "\n{}",
        format!("Recommendations saved to: {path}").bold()
    );
    Ok(())
}

/// Print a prompt and read one line. Returns None on end of input.
async fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().context("Failed to flush stdout")?;
    read_line(|| io::stdin().lock()).await
}

/// Read one line on the blocking pool so the runtime thread stays free.
async fn read_line<R, F>(open: F) -> Result<Option<String>>
where
    R: BufRead,
    F: FnOnce() -> R + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut line = String::new();
        let read = open().read_line(&mut line)?;
        Ok::<_, io::Error>((read > 0).then_some(line))
    })
    .await
    .context("stdin reader task failed")?
    .context("Failed to read from stdin")
}

fn fetch_spinner(locator: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Fetching {locator}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_read_line_returns_line_then_none_at_eof() {
        let line = read_line(|| Cursor::new("y\nignored\n")).await.unwrap();
        assert_eq!(line.as_deref(), Some("y\n"));

        let eof = read_line(|| Cursor::new("")).await.unwrap();
        assert_eq!(eof, None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_read_line_does_not_block_the_runtime() {
        // A reader that only returns once the runtime has run another task
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let ticker = tokio::spawn(async move {
            tx.send(()).unwrap();
        });
        let line = read_line(move || {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
            Cursor::new("n\n")
        })
        .await
        .unwrap();
        ticker.await.unwrap();
        assert_eq!(line.as_deref(), Some("n\n"));
    }
}
