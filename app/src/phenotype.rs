// ==============================================================================
// phenotype.rs - Metabolizer Phenotype Classification
// ==============================================================================
// Description: Maps a star-allele pair to a CPIC metabolizer phenotype
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-12
// Version: 1.0.0
// ==============================================================================

use tracing::debug;

use crate::models::{PhenotypeCode, PhenotypeResult};
use crate::reference_tables::phenotypes;

/// Table confidence reported when no allele-pair entry matches
pub const UNMATCHED_TABLE_CONFIDENCE: f64 = 0.5;

/// Classify a diplotype. Order-insensitive: (a, b) and (b, a) give the same result.
pub fn classify_phenotype(gene: &str, star_alleles: &[String; 2]) -> PhenotypeResult {
    let entry = phenotypes(gene).and_then(|table| table.get(&star_alleles[0], &star_alleles[1]));

    let result = match entry {
        Some(entry) => PhenotypeResult {
            code: entry.code,
            label: entry.code.label().to_string(),
            activity_score: entry.activity_score,
            table_confidence: entry.confidence,
        },
        None => PhenotypeResult {
            code: PhenotypeCode::Unknown,
            label: PhenotypeCode::Unknown.label().to_string(),
            activity_score: None,
            table_confidence: UNMATCHED_TABLE_CONFIDENCE,
        },
    };

    debug!(
        gene,
        alleles = ?star_alleles,
        phenotype = %result.code,
        "Classified phenotype"
    );

    result
}
