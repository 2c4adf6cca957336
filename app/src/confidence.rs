// ==============================================================================
// confidence.rs - Evidence Confidence Scoring
// ==============================================================================
// Description: Derives a call-quality confidence score from matched variants
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-02-13
// Version: 1.0.0
// ==============================================================================
// Weights (per matched variant):
//   QUAL (capped at 99)         25%
//   Read depth (capped at 200)  25%
//   Genotype quality            20%  (no GQ is extracted; reuses QUAL)
//   FILTER = PASS               15%
//   Clinical significance tier  10%
//   Max raw score = 0.95. AF < 0.10 subtracts (0.10 - AF) * 0.5, floored at 0.
//   Mean over variants, clamped to [0.05, 0.95], rounded to 2 decimals.
// ==============================================================================

use crate::models::{VariantRecord, DEFAULT_FILTER};
use crate::reference_tables::clinical_significance_score;

pub const QUALITY_CAP: f64 = 99.0;
pub const DEPTH_CAP: f64 = 200.0;

pub const QUALITY_WEIGHT: f64 = 0.25;
pub const DEPTH_WEIGHT: f64 = 0.25;
pub const GENOTYPE_QUALITY_WEIGHT: f64 = 0.20;
pub const FILTER_WEIGHT: f64 = 0.15;
pub const CLINICAL_SIGNIFICANCE_WEIGHT: f64 = 0.10;

pub const LOW_FREQUENCY_THRESHOLD: f64 = 0.10;
pub const LOW_FREQUENCY_PENALTY: f64 = 0.5;

pub const MIN_CONFIDENCE: f64 = 0.05;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Round to two decimal places, exact halves going to the even neighbour
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Score one variant call before averaging (0.0 to 0.95)
pub fn variant_score(variant: &VariantRecord) -> f64 {
    let quality_score = variant.quality.unwrap_or(0.0).clamp(0.0, QUALITY_CAP) / QUALITY_CAP;
    let depth_score = f64::from(variant.depth).min(DEPTH_CAP) / DEPTH_CAP;
    let genotype_quality_score = quality_score;
    let filter_score = if passes_filter(&variant.filter) { 1.0 } else { 0.0 };
    let tier_score = clinical_significance_score(&variant.clinical_significance);

    let mut raw = quality_score * QUALITY_WEIGHT
        + depth_score * DEPTH_WEIGHT
        + genotype_quality_score * GENOTYPE_QUALITY_WEIGHT
        + filter_score * FILTER_WEIGHT
        + tier_score * CLINICAL_SIGNIFICANCE_WEIGHT;

    if variant.allele_freq < LOW_FREQUENCY_THRESHOLD {
        raw -= (LOW_FREQUENCY_THRESHOLD - variant.allele_freq) * LOW_FREQUENCY_PENALTY;
    }

    raw.max(0.0)
}

/// First listed filter decides, case-insensitively
fn passes_filter(filter: &str) -> bool {
    filter
        .split(',')
        .next()
        .map(|f| f.trim().eq_ignore_ascii_case(DEFAULT_FILTER))
        .unwrap_or(false)
}

/// Evidence confidence for the matched variants of one gene
///
/// Returns exactly 0.0 for an empty slice, otherwise a value in [0.05, 0.95].
pub fn compute_confidence(matched_variants: &[VariantRecord]) -> f64 {
    if matched_variants.is_empty() {
        return 0.0;
    }

    let total: f64 = matched_variants.iter().map(variant_score).sum();
    let mean = total / matched_variants.len() as f64;

    round2(mean.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diplotype::tests::call;

    fn scored(quality: Option<f64>, depth: u32, filter: &str, tier: &str, af: f64) -> VariantRecord {
        let mut v = call("CYP2C9", "rs1799853", "0/1");
        v.quality = quality;
        v.depth = depth;
        v.filter = filter.to_string();
        v.clinical_significance = tier.to_string();
        v.allele_freq = af;
        v
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_exactly_zero() {
        assert_eq!(compute_confidence(&[]), 0.0);
    }

    #[test]
    fn test_worked_example() {
        let variants = vec![
            scored(Some(60.0), 80, "PASS", "likely_pathogenic", 0.3),
            scored(Some(99.0), 200, "PASS", "pathogenic", 0.05),
        ];

        assert!((variant_score(&variants[0]) - 0.6077).abs() < 1e-4);
        assert!(approx(variant_score(&variants[1]), 0.925));
        assert_eq!(compute_confidence(&variants), 0.77);
    }

    #[test]
    fn test_raw_maximum_is_point_nine_five() {
        let best = scored(Some(500.0), 10_000, "PASS", "pathogenic", 0.5);
        assert!(approx(variant_score(&best), 0.95));
        assert_eq!(compute_confidence(&[best]), 0.95);
    }

    #[test]
    fn test_floor_is_point_zero_five() {
        // Missing QUAL, no depth, failed filter, unknown tier, AF 0 → 0.03 - 0.05 → 0
        let worst = scored(None, 0, "LowQual", "Unknown", 0.0);
        assert_eq!(variant_score(&worst), 0.0);
        assert_eq!(compute_confidence(&[worst]), 0.05);
    }

    #[test]
    fn test_filter_signal() {
        let pass = scored(Some(50.0), 100, "PASS", "benign", 0.5);
        let fail = scored(Some(50.0), 100, "q10,PASS", "benign", 0.5);
        assert!(approx(variant_score(&pass) - variant_score(&fail), FILTER_WEIGHT));
        assert!(passes_filter("pass"));
    }

    #[test]
    fn test_low_frequency_penalty() {
        let common = scored(Some(99.0), 200, "PASS", "pathogenic", 0.10);
        let rare = scored(Some(99.0), 200, "PASS", "pathogenic", 0.02);
        assert!(approx(variant_score(&common), 0.95));
        assert!(approx(variant_score(&rare), 0.95 - 0.04));
    }

    #[test]
    fn test_output_range_for_mixed_inputs() {
        let variants = vec![
            scored(Some(10.0), 5, "PASS", "uncertain_significance", 0.01),
            scored(None, 300, "LowQual", "risk_factor", 0.2),
            scored(Some(99.0), 40, "PASS", "likely_benign", 0.08),
        ];
        let score = compute_confidence(&variants);
        assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&score));
        assert_eq!(score, round2(score));
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.774), 0.77);
        assert_eq!(round2(0.776), 0.78);
    }
}
