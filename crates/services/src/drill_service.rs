use std::sync::Arc;

use drill_core::model::{DrillSession, LevelChoice, SubmitOutcome, Variant};
use drill_core::{Generation, Origin, ProblemGenerator};
use tracing::{debug, info, warn};

use crate::error::DrillError;
use crate::progress_service::ProgressService;
use crate::rng::SharedRandom;

/// Result of submitting an answer through the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    /// Today's count after a correct answer was recorded.
    pub today_count: Option<u32>,
}

/// Drives drill sessions: problem generation and progress recording.
///
/// Keypad edits go straight to the `DrillSession`; only the transitions that
/// need randomness or storage pass through here.
#[derive(Clone)]
pub struct DrillService {
    generator: ProblemGenerator,
    rng: SharedRandom,
    progress: Arc<ProgressService>,
}

impl DrillService {
    #[must_use]
    pub fn new(rng: SharedRandom, progress: Arc<ProgressService>) -> Self {
        Self {
            generator: ProblemGenerator::new(),
            rng,
            progress,
        }
    }

    /// Open a session at `level`. Unknown level numbers fall back to the default problem.
    #[must_use]
    pub fn start(&self, level: u8, variant: Variant) -> DrillSession {
        let choice = LevelChoice::resolve(level, variant);
        let (session, generation) = self
            .rng
            .with(|rng| DrillSession::start(choice, &self.generator, rng));
        log_generation(choice, generation);
        debug!(level = choice.number(), %variant, problem = %session.problem(), "drill started");
        session
    }

    /// Check the typed answer. A correct answer is recorded exactly once.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::Progress` if recording fails. The session has
    /// already moved to the correct state by then.
    pub async fn submit(&self, session: &mut DrillSession) -> Result<SubmitReport, DrillError> {
        let outcome = session.submit();
        let today_count = match outcome {
            SubmitOutcome::Correct => {
                let count = self.progress.increment().await?;
                info!(
                    level = session.level().number(),
                    problem = %session.problem(),
                    score = session.score(),
                    today = count,
                    "correct answer"
                );
                Some(count)
            }
            SubmitOutcome::Incorrect => {
                debug!(
                    level = session.level().number(),
                    attempts = session.attempts(),
                    "incorrect answer"
                );
                None
            }
            SubmitOutcome::Ignored => None,
        };
        Ok(SubmitReport {
            outcome,
            today_count,
        })
    }

    /// Move to the next problem after a correct answer.
    pub fn advance(&self, session: &mut DrillSession) -> bool {
        let level = session.level();
        match self
            .rng
            .with(|rng| session.advance(&self.generator, rng))
        {
            Some(generation) => {
                log_generation(level, generation);
                true
            }
            None => false,
        }
    }
}

fn log_generation(level: LevelChoice, generation: Generation) {
    let attempts = generation.attempts;
    match generation.origin {
        Origin::Drawn => debug!(level = level.number(), attempts, "problem drawn"),
        Origin::LevelFallback => warn!(
            level = level.number(),
            attempts, "retries exhausted, using fallback problem"
        ),
        Origin::UnknownLevel => warn!(level = level.number(), "unknown level, using default problem"),
    }
}
