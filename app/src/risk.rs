// ==============================================================================
// risk.rs - Drug Risk Assessment
// ==============================================================================
// Description: Maps (drug, phenotype) to a CPIC clinical recommendation
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-02-13
// Version: 1.0.0
// ==============================================================================
// Clinical content is static per (drug, phenotype). Only the confidence score
// varies per request, and only when a rule exists.
// ==============================================================================

use tracing::debug;

use crate::confidence::round2;
use crate::models::{PhenotypeCode, RiskLabel, RiskRecommendation, Severity};
use crate::reference_tables::risk_rule;

/// Confidence reported for a (drug, phenotype) pair with no rule
pub const UNKNOWN_COMBINATION_CONFIDENCE: f64 = 0.4;

pub const INSUFFICIENT_DATA_ACTION: &str =
    "Insufficient data for this drug-gene-phenotype combination.";

pub const NO_DATA_MONITORING: &str = "Standard clinical monitoring recommended.";

/// Trim and upper-case a drug name for table lookup
pub fn normalize_drug(drug: &str) -> String {
    drug.trim().to_uppercase()
}

/// Look up the recommendation for a drug and phenotype
///
/// # Arguments
/// * `drug` - Drug name (case-insensitive)
/// * `phenotype` - Phenotype code from classification
/// * `confidence` - Evidence confidence from the matched variants
///
/// # Returns
/// The rule's static content stamped with `confidence` (rounded), or an
/// "Unknown" recommendation with a fixed 0.4 confidence when no rule exists.
pub fn assess_drug_risk(drug: &str, phenotype: PhenotypeCode, confidence: f64) -> RiskRecommendation {
    let drug = normalize_drug(drug);

    let Some(rule) = risk_rule(&drug, phenotype) else {
        debug!(drug = %drug, phenotype = %phenotype, "No risk rule for combination");
        return unknown_recommendation();
    };

    RiskRecommendation {
        risk_label: rule.risk_label,
        severity: rule.severity,
        action: rule.action.to_string(),
        dosing_adjustment: rule.dosing_adjustment.map(str::to_string),
        alternatives: rule.alternatives.iter().map(|a| a.to_string()).collect(),
        monitoring: rule.monitoring.map(str::to_string),
        cpic_guideline: Some(rule.cpic_guideline.to_string()),
        confidence_score: round2(confidence),
    }
}

/// Recommendation for a combination no rule covers
pub fn unknown_recommendation() -> RiskRecommendation {
    RiskRecommendation {
        risk_label: RiskLabel::Unknown,
        severity: Severity::None,
        action: INSUFFICIENT_DATA_ACTION.to_string(),
        dosing_adjustment: None,
        alternatives: Vec::new(),
        monitoring: None,
        cpic_guideline: None,
        confidence_score: UNKNOWN_COMBINATION_CONFIDENCE,
    }
}

/// Recommendation when the primary gene has no variant records at all
///
/// Confidence is exactly 0.0: there is no evidence to score.
pub fn no_data_recommendation(drug: &str, gene: &str) -> RiskRecommendation {
    RiskRecommendation {
        risk_label: RiskLabel::Unknown,
        severity: Severity::None,
        action: format!(
            "No {} variants detected in this VCF file. Cannot determine {} risk.",
            gene, drug
        ),
        dosing_adjustment: None,
        alternatives: Vec::new(),
        monitoring: Some(NO_DATA_MONITORING.to_string()),
        cpic_guideline: None,
        confidence_score: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warfarin_poor_metabolizer() {
        let rec = assess_drug_risk("WARFARIN", PhenotypeCode::PoorMetabolizer, 0.77);
        assert_eq!(rec.risk_label, RiskLabel::AdjustDosage);
        assert_eq!(rec.severity, Severity::High);
        assert_eq!(rec.dosing_adjustment.as_deref(), Some("Start at 50% of standard dose."));
        assert_eq!(rec.alternatives, vec!["Apixaban", "Rivaroxaban"]);
        assert_eq!(rec.cpic_guideline.as_deref(), Some("CPIC Warfarin Guideline 2017"));
        assert_eq!(rec.confidence_score, 0.77);
    }

    #[test]
    fn test_drug_name_is_case_normalized() {
        let rec = assess_drug_risk("  codeine ", PhenotypeCode::UltrarapidMetabolizer, 0.9);
        assert_eq!(rec.risk_label, RiskLabel::Toxic);
        assert_eq!(rec.severity, Severity::Critical);
        assert_eq!(rec.monitoring, None);
    }

    #[test]
    fn test_confidence_is_rounded() {
        let rec = assess_drug_risk("CLOPIDOGREL", PhenotypeCode::NormalMetabolizer, 0.8349);
        assert_eq!(rec.confidence_score, 0.83);
        assert_eq!(rec.risk_label, RiskLabel::Safe);
        assert!(rec.alternatives.is_empty());
    }

    #[test]
    fn test_unknown_combination_discards_confidence() {
        for confidence in [0.0, 0.33, 0.95] {
            let rec = assess_drug_risk("WARFARIN", PhenotypeCode::Unknown, confidence);
            assert_eq!(rec.risk_label, RiskLabel::Unknown);
            assert_eq!(rec.severity, Severity::None);
            assert_eq!(rec.confidence_score, UNKNOWN_COMBINATION_CONFIDENCE);
            assert_eq!(rec.action, INSUFFICIENT_DATA_ACTION);
            assert!(rec.alternatives.is_empty());
            assert!(rec.cpic_guideline.is_none());
        }

        // Phenotype known but no rule for this drug (warfarin has no URM rule)
        let rec = assess_drug_risk("WARFARIN", PhenotypeCode::UltrarapidMetabolizer, 0.9);
        assert_eq!(rec.confidence_score, 0.4);

        let rec = assess_drug_risk("ASPIRIN", PhenotypeCode::NormalMetabolizer, 0.9);
        assert_eq!(rec.risk_label, RiskLabel::Unknown);
    }

    #[test]
    fn test_no_data_recommendation() {
        let rec = no_data_recommendation("WARFARIN", "CYP2C9");
        assert_eq!(rec.risk_label, RiskLabel::Unknown);
        assert_eq!(rec.severity, Severity::None);
        assert_eq!(rec.confidence_score, 0.0);
        assert_eq!(
            rec.action,
            "No CYP2C9 variants detected in this VCF file. Cannot determine WARFARIN risk."
        );
        assert_eq!(rec.monitoring.as_deref(), Some(NO_DATA_MONITORING));
    }
}
