use std::{env, fs, path::{Path, PathBuf}, time::Duration};
use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

/// What happened to a single reset step. Every variant counts as overall
/// success; `Ignored` carries the reason the underlying operation was
/// skipped over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Cleared,
    AlreadyClean,
    Ignored(String),
}

/// One entry per reset step, in execution order.
#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: String,
    pub target: String,
    pub outcome: StepOutcome,
}

/// Collected outcomes for a whole run, written out as a JSON report so a
/// failed build can be traced back to what the reset actually removed.
#[derive(Debug, Serialize)]
pub struct Report {
    pub run_id: String,
    pub duration_ms: u128,
    pub steps: Vec<StepRecord>,
}

impl Report {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id: run_id.to_string(),
            duration_ms: 0,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: &str, target: String, outcome: StepOutcome) {
        self.steps.push(StepRecord {
            step: step.to_string(),
            target,
            outcome,
        });
    }

    /// Log the summary banner and write the JSON report file.
    pub fn finish(&mut self, elapsed: Duration) {
        self.duration_ms = elapsed.as_millis();
        let (cleared, already_clean, ignored) = self.outcome_counts();

        log::info!("=====================  <summary>  ======================");
        log::info!("Targets cleared:      {}", cleared);
        log::info!("Already clean:        {}", already_clean);
        log::info!("Ignored failures:     {}", ignored);
        log::info!("Elapsed:              {} ms", self.duration_ms);

        let report_path = get_report_path(&self.run_id);
        match self.save(&report_path) {
            Ok(()) => log::info!("Report written to:    {}", report_path.display()),
            Err(e) => log::warn!("Could not write the run report: {}", e),
        }
        log::info!("========================================================");
    }

    /// Write the report as pretty-printed JSON, creating parent directories
    /// as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(&file, self)?;
        Ok(())
    }

    fn outcome_counts(&self) -> (usize, usize, usize) {
        let cleared = self
            .steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Cleared)
            .count();
        let already_clean = self
            .steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::AlreadyClean)
            .count();
        let ignored = self.steps.len() - cleared - already_clean;

        (cleared, already_clean, ignored)
    }
}

/// Report files live under the system temp directory; the tool must not
/// leave new artifacts inside the workspace it just cleaned.
fn get_report_path(run_id: &str) -> PathBuf {
    env::temp_dir()
        .join("chives-reset")
        .join(format!("reset-{}.json", run_id))
}
