//! Suggestion adapter.
//!
//! Only a deterministic implementation exists: worker ranking by expertise
//! score, a one-line schedule summary and a reason-length check. A configured
//! provider is recorded but not called.

use crate::config::AiConfig;
use crate::domain::{Job, RequiredExpertise};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

/// Number of suggestions returned per job.
pub const MAX_SUGGESTIONS: usize = 5;

/// Score used when a candidate has none, and for jobs without requirements.
pub const NEUTRAL_SCORE: u32 = 50;

/// A worker considered for a job.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerCandidate {
    pub id: i64,
    pub name: String,
    pub expertise_score: Option<u32>,
}

/// A ranked suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSuggestion {
    pub worker_id: i64,
    pub score: u32,
    pub reason: String,
}

/// Outcome of a change-reason check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonCheck {
    pub ok: bool,
    pub message: String,
}

/// Expertise match of one worker against a job's requirements, 0 to 100.
///
/// Each requirement contributes `min(level / min_level, 1)`; missing
/// expertise contributes 0. The mean is scaled to a percentage and rounded.
pub fn expertise_score(requirements: &[RequiredExpertise], levels: &HashMap<i64, i64>) -> u32 {
    if requirements.is_empty() {
        return NEUTRAL_SCORE;
    }

    let total: f64 = requirements
        .iter()
        .map(|req| {
            let level = levels.get(&req.expertise_id).copied().unwrap_or(0).max(0);
            if req.min_level <= 0 {
                1.0
            } else {
                (level as f64 / req.min_level as f64).min(1.0)
            }
        })
        .sum();

    (total / requirements.len() as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone)]
pub struct AiAdapter {
    config: AiConfig,
}

impl AiAdapter {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Top candidates by descending score, ties by ascending name.
    pub fn suggest_workers(&self, job: &Job, candidates: &[WorkerCandidate]) -> Vec<WorkerSuggestion> {
        debug!(
            job_id = job.id,
            candidates = candidates.len(),
            provider = %self.config.provider,
            enabled = self.config.enabled,
            "Ranking workers"
        );

        let mut ranked: Vec<(u32, &WorkerCandidate)> = candidates
            .iter()
            .map(|c| (c.expertise_score.unwrap_or(NEUTRAL_SCORE), c))
            .collect();
        ranked.sort_by_key(|(score, c)| (Reverse(*score), c.name.clone()));

        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(score, c)| WorkerSuggestion {
                worker_id: c.id,
                score,
                reason: format!("Expertise match: {score}"),
            })
            .collect()
    }

    pub fn schedule_summary(&self, from: DateTime<Utc>, to: DateTime<Utc>, jobs: &[Job]) -> String {
        format!(
            "Schedule summary from {} to {}: {} jobs.",
            from.to_rfc3339(),
            to.to_rfc3339(),
            jobs.len()
        )
    }

    /// Accept a job change only when the reason says more than a few words.
    pub fn job_change_reason_check(
        &self,
        field: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
        reason: &str,
    ) -> ReasonCheck {
        let ok = reason.chars().count() > 10;
        debug!(field, ?old_value, ?new_value, ok, "Checked change reason");

        ReasonCheck {
            ok,
            message: if ok { "Reason accepted." } else { "Reason too short." }.to_string(),
        }
    }
}
