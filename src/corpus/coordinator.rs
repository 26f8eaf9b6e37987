// CorpusUpdateCoordinator — fetch, normalize, score, index, rank.
//
// The coordinator is the single writer over the corpus. An update takes
// `&mut self`, so two updates can never be in flight against the same corpus.
// The fetch is awaited first; nothing is mutated until a complete next
// snapshot and its recommendations exist, then the snapshot is swapped in.
// A failed fetch leaves the previous snapshot exactly as it was.

use std::time::Duration;

use tracing::{info, warn};

use super::index::Slot;
use super::snapshot::CorpusSnapshot;
use crate::catalog::models::ProductRecord;
use crate::catalog::traits::ProductSource;
use crate::error::{RecommendError, Result};
use crate::ranking::ranker::{RankOptions, RecommendationRanker, RecommendationResult};
use crate::sentiment::profile::SentimentProfile;
use crate::sentiment::traits::SentimentScorer;
use crate::similarity::indexer::SimilarityIndexer;

/// Lifecycle of a coordinator. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Built from the first product
    Initialized,
    /// At least one update cycle has completed
    Updated { cycles: u32 },
}

/// Tunables for the recompute pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinatorSettings {
    pub rank: RankOptions,
    pub remove_stop_words: bool,
}

/// What one successful cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Title of the product that was fetched
    pub title: String,
    /// Row the product landed in
    pub slot: Slot,
    pub sentiment: SentimentProfile,
    pub recommendations: RecommendationResult,
    pub corpus_size: usize,
}

/// A retry-able request to pull one product into the corpus.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    pub locator: String,
    /// Fetch attempts before giving up (at least one is always made)
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl UpdateCommand {
    /// A single-attempt command.
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retries(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }
}

/// Typed result of an update command.
#[derive(Debug)]
pub enum UpdateOutcome {
    Success(Box<CycleReport>),
    Failure {
        locator: String,
        attempts: u32,
        error: RecommendError,
    },
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Success(_))
    }

    pub fn into_result(self) -> Result<CycleReport> {
        match self {
            UpdateOutcome::Success(report) => Ok(*report),
            UpdateOutcome::Failure { error, .. } => Err(error),
        }
    }
}

/// Owns the running corpus and drives every update cycle.
pub struct CorpusUpdateCoordinator {
    source: Box<dyn ProductSource>,
    scorer: Box<dyn SentimentScorer>,
    indexer: SimilarityIndexer,
    ranker: RecommendationRanker,
    snapshot: CorpusSnapshot,
    state: CoordinatorState,
    last_report: CycleReport,
}

impl CorpusUpdateCoordinator {
    /// Fetch the first product and build the initial index.
    pub async fn initialize(
        source: Box<dyn ProductSource>,
        scorer: Box<dyn SentimentScorer>,
        settings: CoordinatorSettings,
        locator: &str,
    ) -> Result<Self> {
        let record = source.fetch(locator).await?;
        Self::from_record(source, scorer, settings, record)
    }

    /// Build the initial index from a record that was fetched elsewhere.
    pub fn from_record(
        source: Box<dyn ProductSource>,
        scorer: Box<dyn SentimentScorer>,
        settings: CoordinatorSettings,
        record: ProductRecord,
    ) -> Result<Self> {
        let indexer = SimilarityIndexer::new(settings.remove_stop_words);
        let ranker = RecommendationRanker::new(settings.rank);

        let (snapshot, report) =
            Self::recompute(&CorpusSnapshot::default(), record, scorer.as_ref(), &indexer, &ranker)?;

        info!(title = %report.title, "Initialized corpus");

        Ok(Self {
            source,
            scorer,
            indexer,
            ranker,
            snapshot,
            state: CoordinatorState::Initialized,
            last_report: report,
        })
    }

    /// Fetch one product and run a full recompute cycle.
    pub async fn update(&mut self, locator: &str) -> Result<CycleReport> {
        let record = self.source.fetch(locator).await?;
        self.apply(record)
    }

    /// Run a full recompute cycle for an already-fetched record.
    pub fn apply(&mut self, record: ProductRecord) -> Result<CycleReport> {
        let (next, report) = Self::recompute(
            &self.snapshot,
            record,
            self.scorer.as_ref(),
            &self.indexer,
            &self.ranker,
        )?;

        // Everything succeeded; swap.
        self.snapshot = next;
        self.state = match self.state {
            CoordinatorState::Initialized => CoordinatorState::Updated { cycles: 1 },
            CoordinatorState::Updated { cycles } => CoordinatorState::Updated { cycles: cycles + 1 },
        };
        self.last_report = report.clone();

        info!(
            title = %report.title,
            corpus_size = report.corpus_size,
            state = ?self.state,
            "Update cycle complete"
        );

        Ok(report)
    }

    /// Execute an update command, retrying the fetch as configured.
    pub async fn execute(&mut self, command: &UpdateCommand) -> UpdateOutcome {
        let max_attempts = command.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.source.fetch(&command.locator).await {
                Ok(record) => {
                    return match self.apply(record) {
                        Ok(report) => UpdateOutcome::Success(Box::new(report)),
                        Err(error) => UpdateOutcome::Failure {
                            locator: command.locator.clone(),
                            attempts: attempt,
                            error,
                        },
                    };
                }
                Err(e) => {
                    warn!(
                        locator = %command.locator,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Fetch failed, corpus unchanged"
                    );
                    if attempt >= max_attempts {
                        return UpdateOutcome::Failure {
                            locator: command.locator.clone(),
                            attempts: attempt,
                            error: e.into(),
                        };
                    }
                    tokio::time::sleep(command.retry_delay).await;
                }
            }
        }
    }

    /// Recommendations for any indexed title against the current matrix.
    pub fn recommend(&self, title: &str) -> Result<RecommendationResult> {
        self.ranker
            .rank(title, self.snapshot.matrix(), self.snapshot.index())
    }

    pub fn snapshot(&self) -> &CorpusSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Report from the most recent successful cycle.
    pub fn last_report(&self) -> &CycleReport {
        &self.last_report
    }

    fn recompute(
        current: &CorpusSnapshot,
        record: ProductRecord,
        scorer: &dyn SentimentScorer,
        indexer: &SimilarityIndexer,
        ranker: &RecommendationRanker,
    ) -> Result<(CorpusSnapshot, CycleReport)> {
        let title = record.title.clone();
        let (next, slot) = current.with_record(record, scorer, indexer);

        let recommendations = ranker.rank(&title, next.matrix(), next.index())?;
        let sentiment = next
            .entries()
            .get(slot.position())
            .map(|e| e.sentiment.clone())
            .unwrap_or_else(|| SentimentProfile::new(Vec::new()));

        let report = CycleReport {
            title,
            slot,
            sentiment,
            recommendations,
            corpus_size: next.len(),
        };
        Ok((next, report))
    }
}
