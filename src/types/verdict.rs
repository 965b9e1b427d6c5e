//! Severity ladder, findings and the aggregated verdict report

use serde::{Deserialize, Serialize};

use super::BidRecommendation;

// ============================================================================
// Severity
// ============================================================================

/// Shared severity order: NORMAL < WARNING < CRITICAL_ALARM < EMERGENCY
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Normal = 0,
    Warning = 1,
    CriticalAlarm = 2,
    Emergency = 3,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Normal => write!(f, "NORMAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::CriticalAlarm => write!(f, "CRITICAL_ALARM"),
            Severity::Emergency => write!(f, "EMERGENCY"),
        }
    }
}

impl From<BidRecommendation> for Severity {
    /// Procurement vocabulary mapped onto the safety ladder for reporting
    fn from(recommendation: BidRecommendation) -> Self {
        match recommendation {
            BidRecommendation::Shortlist => Severity::Normal,
            BidRecommendation::Negotiate => Severity::Warning,
            BidRecommendation::Reject => Severity::CriticalAlarm,
        }
    }
}

// ============================================================================
// Recommended Action
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    #[default]
    None,
    Negotiate,
    Reject,
    PreventStartup,
    InitiateSafeShutdown,
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendedAction::None => write!(f, "NONE"),
            RecommendedAction::Negotiate => write!(f, "NEGOTIATE"),
            RecommendedAction::Reject => write!(f, "REJECT"),
            RecommendedAction::PreventStartup => write!(f, "PREVENT_STARTUP"),
            RecommendedAction::InitiateSafeShutdown => write!(f, "INITIATE_SAFE_SHUTDOWN"),
        }
    }
}

impl From<BidRecommendation> for RecommendedAction {
    fn from(recommendation: BidRecommendation) -> Self {
        match recommendation {
            BidRecommendation::Shortlist => RecommendedAction::None,
            BidRecommendation::Negotiate => RecommendedAction::Negotiate,
            BidRecommendation::Reject => RecommendedAction::Reject,
        }
    }
}

// ============================================================================
// Findings
// ============================================================================

/// Rule family that produced a finding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingSource {
    BidPlausibility,
    ConfigurationDeviation,
    StandbyGrease,
    PressureGradient,
    ThermalInertia,
    WearTexture,
}

impl FindingSource {
    /// Static configuration checks run before real-time checks
    pub const fn is_static(self) -> bool {
        matches!(
            self,
            FindingSource::BidPlausibility
                | FindingSource::ConfigurationDeviation
                | FindingSource::StandbyGrease
        )
    }
}

impl std::fmt::Display for FindingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingSource::BidPlausibility => write!(f, "BID_PLAUSIBILITY"),
            FindingSource::ConfigurationDeviation => write!(f, "CONFIGURATION_DEVIATION"),
            FindingSource::StandbyGrease => write!(f, "STANDBY_GREASE"),
            FindingSource::PressureGradient => write!(f, "PRESSURE_GRADIENT"),
            FindingSource::ThermalInertia => write!(f, "THERMAL_INERTIA"),
            FindingSource::WearTexture => write!(f, "WEAR_TEXTURE"),
        }
    }
}

/// One rule's conclusion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub source: FindingSource,
    pub severity: Severity,
    pub action: RecommendedAction,
    /// Ordered explanation lines
    pub messages: Vec<String>,
    /// Informational loss estimate, never used as a safety input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_avoided_loss_eur: Option<f64>,
}

impl Finding {
    pub fn new(
        source: FindingSource,
        severity: Severity,
        action: RecommendedAction,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            severity,
            action,
            messages: vec![message.into()],
            estimated_avoided_loss_eur: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_avoided_loss(mut self, eur: f64) -> Self {
        self.estimated_avoided_loss_eur = Some(eur);
        self
    }
}

/// Why a check produced nothing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// Fewer samples than the rule needs
    InsufficientSamples { have: usize, need: usize },
    /// Zero or negative time between the samples used
    NonPositiveElapsedTime,
    /// Rule only applies in another equipment status
    StatusNotApplicable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InsufficientSamples { have, need } => {
                write!(f, "insufficient samples ({have} of {need})")
            }
            SkipReason::NonPositiveElapsedTime => write!(f, "non-positive elapsed time"),
            SkipReason::StatusNotApplicable => write!(f, "status not applicable"),
        }
    }
}

/// Result of a single stateless check.
///
/// `Passed` means the rule ran and found nothing; `Skipped` means it could
/// not run on the data given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckOutcome {
    Finding(Finding),
    Passed,
    Skipped(SkipReason),
}

impl CheckOutcome {
    pub fn finding(&self) -> Option<&Finding> {
        match self {
            CheckOutcome::Finding(finding) => Some(finding),
            CheckOutcome::Passed | CheckOutcome::Skipped(_) => None,
        }
    }

    pub fn into_finding(self) -> Option<Finding> {
        match self {
            CheckOutcome::Finding(finding) => Some(finding),
            CheckOutcome::Passed | CheckOutcome::Skipped(_) => None,
        }
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped(_))
    }
}

/// A check that could not run, kept so callers can tell it from a pass
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedCheck {
    pub source: FindingSource,
    pub reason: SkipReason,
}

// ============================================================================
// Verdict Report
// ============================================================================

/// Single ranked verdict handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VerdictReport {
    pub status: Severity,
    pub messages: Vec<String>,
    /// 0-100, populated by bid evaluation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub recommended_action: RecommendedAction,
    /// Sources that contributed, in evaluation order
    #[serde(default)]
    pub sources: Vec<FindingSource>,
    /// Checks that lacked the data to run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCheck>,
}

impl VerdictReport {
    pub fn is_normal(&self) -> bool {
        self.status == Severity::Normal
    }
}
