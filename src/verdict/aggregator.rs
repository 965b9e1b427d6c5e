//! Verdict Aggregator - merges rule findings into one ranked report
//!
//! ## Merge Rules
//!
//! - **Status**: highest severity, NORMAL < WARNING < CRITICAL_ALARM < EMERGENCY
//! - **Messages**: static configuration findings first, then real-time
//!   findings, each group in the order recorded. Static means bid
//!   plausibility, configuration deviation and standby grease (read from
//!   the pre-start maintenance log). Wear texture counts as real-time since
//!   its probability arrives with the request alongside live telemetry.
//! - **Action**: taken from the first finding at the top severity;
//!   EMERGENCY always maps to INITIATE_SAFE_SHUTDOWN

use tracing::info;

use crate::types::{
    CheckOutcome, Finding, FindingSource, RecommendedAction, Severity, SkippedCheck,
    VerdictReport,
};

/// Collects check outcomes for one evaluation context.
#[derive(Debug, Default)]
pub struct VerdictAggregator {
    findings: Vec<Finding>,
    skipped: Vec<SkippedCheck>,
    score: Option<f64>,
}

impl VerdictAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check outcome. Passed checks leave no trace.
    pub fn record(&mut self, source: FindingSource, outcome: CheckOutcome) -> &mut Self {
        match outcome {
            CheckOutcome::Finding(finding) => self.findings.push(finding),
            CheckOutcome::Skipped(reason) => self.skipped.push(SkippedCheck { source, reason }),
            CheckOutcome::Passed => {}
        }
        self
    }

    pub fn push(&mut self, finding: Finding) -> &mut Self {
        self.findings.push(finding);
        self
    }

    /// Bid score carried on the report
    pub fn set_score(&mut self, score: f64) -> &mut Self {
        self.score = Some(score);
        self
    }

    pub fn finish(self) -> VerdictReport {
        let mut findings = self.findings;
        // stable: keeps recorded order inside each group
        findings.sort_by_key(|f| !f.source.is_static());

        let status = findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Normal);

        let recommended_action = if status == Severity::Emergency {
            RecommendedAction::InitiateSafeShutdown
        } else {
            findings
                .iter()
                .find(|f| f.severity == status)
                .map_or(RecommendedAction::None, |f| f.action)
        };

        let mut sources: Vec<FindingSource> = Vec::new();
        for f in &findings {
            if !sources.contains(&f.source) {
                sources.push(f.source);
            }
        }

        let messages: Vec<String> = findings.into_iter().flat_map(|f| f.messages).collect();

        info!(
            status = %status,
            action = %recommended_action,
            sources = sources.len(),
            skipped = self.skipped.len(),
            "Verdict aggregation complete"
        );

        VerdictReport {
            status,
            messages,
            score: self.score,
            recommended_action,
            sources,
            skipped: self.skipped,
        }
    }
}

/// Merge a set of findings with no skipped checks or score.
pub fn aggregate(findings: impl IntoIterator<Item = Finding>) -> VerdictReport {
    let mut aggregator = VerdictAggregator::new();
    for finding in findings {
        aggregator.push(finding);
    }
    aggregator.finish()
}
