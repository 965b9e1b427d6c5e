//! Bid physics validator - screens manufacturer claims against physical limits
//!
//! Rules run in a fixed order, each independently deducts from a starting
//! score of 100 and appends one risk line. No rule short-circuits another.
//!
//! | # | Rule                                   | Default penalty |
//! |---|----------------------------------------|-----------------|
//! | 1 | claimed efficiency above family ceiling | 50             |
//! | 2 | claimed efficiency within 1 pt of it    | 20             |
//! | 3 | Kaplan above 80 m net head              | 30             |
//! | 4 | Francis below 20 m net head             | 15             |
//! | 5 | price below 60 % of market estimate     | 10             |
//!
//! Rule 5 only runs when the offer states its rated power.

use tracing::{debug, info};

use crate::config::BidConfig;
use crate::error::{ensure_finite, DomainError};
use crate::physics_engine::suggest_turbine_family;
use crate::types::{
    BidEvaluation, BidOffer, BidRecommendation, BidSite, EfficiencyVerdict, Finding,
    FindingSource, RecommendedAction, Severity, TurbineFamily, VerdictReport,
};

/// Run the rule ladder for one offer.
pub fn evaluate(
    site: &BidSite,
    offer: &BidOffer,
    cfg: &BidConfig,
) -> Result<BidEvaluation, DomainError> {
    let claimed = ensure_finite("claimed_efficiency_pct", offer.claimed_efficiency_pct)?;
    let net_head = ensure_finite("net_head_m", site.net_head_m)?;
    ensure_finite("design_flow_cms", site.design_flow_cms)?;
    ensure_finite("price", offer.price)?;

    let family = &offer.turbine_family;
    let ceiling = cfg.ceiling_for(family);
    if let TurbineFamily::Unrecognized(name) = family {
        debug!(family = %name, ceiling, "Unrecognized turbine family, using default ceiling");
    }

    let mut score = 100.0;
    let mut risks = Vec::new();

    // Rules 1 and 2: efficiency against the theoretical ceiling
    let efficiency_verdict = if claimed > ceiling {
        score -= cfg.exceeds_ceiling_penalty;
        risks.push(format!(
            "Claimed efficiency {claimed:.2}% exceeds theoretical limit of {ceiling:.2}% for {family} \
             (marketing exaggeration)"
        ));
        if claimed >= 100.0 {
            EfficiencyVerdict::Impossible
        } else {
            EfficiencyVerdict::MarketingLie
        }
    } else if claimed > ceiling - cfg.proximity_band_pct {
        score -= cfg.near_ceiling_penalty;
        risks.push(format!(
            "Claimed efficiency {claimed:.2}% is within {:.1} pt of the {ceiling:.2}% limit for \
             {family}; verify model test certification (IEC 60041)",
            cfg.proximity_band_pct
        ));
        EfficiencyVerdict::NearLimit
    } else {
        EfficiencyVerdict::Plausible
    };

    // Rules 3 and 4: family against site head
    match family {
        TurbineFamily::Kaplan if net_head > cfg.kaplan_max_head_m => {
            score -= cfg.kaplan_high_head_penalty;
            risks.push(format!(
                "KAPLAN at {net_head:.1} m net head (limit {:.0} m): cavitation risk, consider a {} design",
                cfg.kaplan_max_head_m,
                suggest_turbine_family(net_head)
            ));
        }
        TurbineFamily::Francis if net_head < cfg.francis_min_head_m => {
            score -= cfg.francis_low_head_penalty;
            risks.push(format!(
                "FRANCIS at {net_head:.1} m net head (minimum {:.0} m): oversized spiral case, \
                 economically inefficient; consider a {}/Bulb design",
                cfg.francis_min_head_m,
                suggest_turbine_family(net_head)
            ));
        }
        TurbineFamily::Kaplan
        | TurbineFamily::Francis
        | TurbineFamily::Pelton
        | TurbineFamily::Unrecognized(_) => {}
    }

    // Rule 5: commercial sanity, needs the rated power
    if let Some(rated_mw) = offer.rated_power_mw.filter(|mw| mw.is_finite() && *mw > 0.0) {
        let market_estimate = rated_mw * cfg.market_price_per_mw;
        if offer.price < cfg.price_floor_ratio * market_estimate {
            score -= cfg.low_price_penalty;
            risks.push(format!(
                "Price {:.0} is below {:.0}% of the market estimate {:.0} for {rated_mw:.1} MW; \
                 verify steel origin and reference list",
                offer.price,
                cfg.price_floor_ratio * 100.0,
                market_estimate
            ));
        }
    }

    let score = f64::clamp(score, 0.0, 100.0);
    let recommendation = classify(score, cfg);

    info!(
        manufacturer = %offer.manufacturer,
        family = %family,
        score,
        verdict = %efficiency_verdict,
        recommendation = %recommendation,
        "Bid evaluation complete"
    );

    Ok(BidEvaluation {
        manufacturer: offer.manufacturer.clone(),
        turbine_family: family.clone(),
        efficiency_ceiling_pct: ceiling,
        efficiency_gap_pct: (claimed - ceiling).max(0.0),
        efficiency_verdict,
        score,
        recommendation,
        risks,
    })
}

/// Score ladder: above shortlist cut-off, above reject cut-off, else reject.
pub fn classify(score: f64, cfg: &BidConfig) -> BidRecommendation {
    if score > cfg.shortlist_above_score {
        BidRecommendation::Shortlist
    } else if score > cfg.reject_at_or_below_score {
        BidRecommendation::Negotiate
    } else {
        BidRecommendation::Reject
    }
}

impl BidEvaluation {
    /// Finding for the aggregator, in the shared severity order.
    pub fn to_finding(&self) -> Finding {
        let messages = if self.risks.is_empty() {
            vec![format!(
                "{} {} offer within physical limits (score {:.0})",
                self.manufacturer, self.turbine_family, self.score
            )]
        } else {
            self.risks.clone()
        };

        Finding {
            source: FindingSource::BidPlausibility,
            severity: Severity::from(self.recommendation),
            action: RecommendedAction::from(self.recommendation),
            messages,
            estimated_avoided_loss_eur: None,
        }
    }

    /// Stand-alone report for a single offer, carrying the score.
    pub fn to_verdict_report(&self) -> VerdictReport {
        let finding = self.to_finding();
        VerdictReport {
            status: finding.severity,
            messages: finding.messages,
            score: Some(self.score),
            recommended_action: finding.action,
            sources: vec![FindingSource::BidPlausibility],
            skipped: Vec::new(),
        }
    }
}
