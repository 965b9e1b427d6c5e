//! Manufacturer offers and their plausibility evaluation

use serde::{Deserialize, Serialize};

// ============================================================================
// Turbine Family
// ============================================================================

/// Turbine family named in an offer.
///
/// Parsed case-insensitively from a string; anything that is not Kaplan,
/// Francis or Pelton lands in `Unrecognized` and is screened against the
/// conservative default ceiling instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TurbineFamily {
    Kaplan,
    Francis,
    Pelton,
    Unrecognized(String),
}

impl From<&str> for TurbineFamily {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "KAPLAN" => TurbineFamily::Kaplan,
            "FRANCIS" => TurbineFamily::Francis,
            "PELTON" => TurbineFamily::Pelton,
            _ => TurbineFamily::Unrecognized(raw.trim().to_string()),
        }
    }
}

impl From<String> for TurbineFamily {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<TurbineFamily> for String {
    fn from(family: TurbineFamily) -> Self {
        family.to_string()
    }
}

impl std::fmt::Display for TurbineFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurbineFamily::Kaplan => write!(f, "KAPLAN"),
            TurbineFamily::Francis => write!(f, "FRANCIS"),
            TurbineFamily::Pelton => write!(f, "PELTON"),
            TurbineFamily::Unrecognized(name) => write!(f, "{name}"),
        }
    }
}

// ============================================================================
// Bid Offer
// ============================================================================

/// A manufacturer's offer as received in a tender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidOffer {
    pub manufacturer: String,
    pub turbine_family: TurbineFamily,
    /// Claimed efficiency at best point (%)
    pub claimed_efficiency_pct: f64,
    /// Offered price (currency amount, not used by the physics rules)
    pub price: f64,
    /// Rated unit power (MW), enables the commercial price check when present
    #[serde(default)]
    pub rated_power_mw: Option<f64>,
}

/// Site figures an offer is judged against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BidSite {
    pub net_head_m: f64,
    pub design_flow_cms: f64,
}

// ============================================================================
// Bid Evaluation
// ============================================================================

/// Procurement recommendation derived from the cumulative score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidRecommendation {
    Shortlist,
    Negotiate,
    Reject,
}

impl std::fmt::Display for BidRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BidRecommendation::Shortlist => write!(f, "SHORTLIST"),
            BidRecommendation::Negotiate => write!(f, "NEGOTIATE"),
            BidRecommendation::Reject => write!(f, "REJECT"),
        }
    }
}

/// How the claimed efficiency relates to the family ceiling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EfficiencyVerdict {
    Plausible,
    /// Within the proximity band below the ceiling
    NearLimit,
    /// Above the theoretical ceiling
    MarketingLie,
    /// At or above 100 %
    Impossible,
}

impl std::fmt::Display for EfficiencyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencyVerdict::Plausible => write!(f, "PLAUSIBLE"),
            EfficiencyVerdict::NearLimit => write!(f, "NEAR_LIMIT"),
            EfficiencyVerdict::MarketingLie => write!(f, "MARKETING_LIE"),
            EfficiencyVerdict::Impossible => write!(f, "IMPOSSIBLE"),
        }
    }
}

/// Detailed outcome of the bid rule ladder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidEvaluation {
    pub manufacturer: String,
    pub turbine_family: TurbineFamily,
    /// Ceiling used for the efficiency rules (%)
    pub efficiency_ceiling_pct: f64,
    /// Claimed minus ceiling, floored at zero (percentage points)
    pub efficiency_gap_pct: f64,
    pub efficiency_verdict: EfficiencyVerdict,
    /// Cumulative score, starts at 100 and is clamped to 0-100
    pub score: f64,
    pub recommendation: BidRecommendation,
    /// One message per rule that fired, in rule order
    pub risks: Vec<String>,
}

impl BidEvaluation {
    pub fn is_realistic(&self) -> bool {
        self.recommendation != BidRecommendation::Reject
    }
}
