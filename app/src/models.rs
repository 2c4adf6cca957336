// ==============================================================================
// models.rs - Pharmacogenomic Data Models
// ==============================================================================
// Description: Immutable record types flowing through the inference pipeline
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default FILTER value when the column is empty or ".".
pub const DEFAULT_FILTER: &str = "PASS";

/// Default clinical significance tier when CLINSIG is absent.
pub const DEFAULT_CLINICAL_SIGNIFICANCE: &str = "Unknown";

/// Placeholder rsID when the ID column is ".".
pub const MISSING_RSID: &str = ".";

/// One sample's call at one annotated VCF row
///
/// Produced only by the VCF parser. A record whose genotype has every allele
/// slot uncalled is never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// rsID (e.g., "rs1799853") or "." when absent
    pub rsid: String,

    /// Gene symbol from INFO/GENE, always a member of the target gene set
    pub gene: String,

    /// Chromosome as written in the file (e.g., "10" or "chr10")
    pub chromosome: String,

    /// 1-based position
    pub position: u64,

    pub ref_allele: String,

    /// ALT alleles joined with ","
    pub alt_allele: String,

    /// QUAL column, None when "."
    pub quality: Option<f64>,

    /// FILTER column ("PASS" when empty, "." or PASS)
    pub filter: String,

    /// Raw GT string as written (e.g., "0/1", "1|1")
    pub genotype: String,

    pub phased: bool,

    /// INFO/STAR hint, e.g. "*2"
    pub star_allele: Option<String>,

    /// INFO/CLINSIG tier, "Unknown" when absent
    pub clinical_significance: String,

    /// INFO/AF (first value), 0.0 when absent
    pub allele_freq: f64,

    /// INFO/DP, 0 when absent
    pub depth: u32,

    /// Sample column name
    pub sample: String,
}

/// Resolved two-allele diplotype for one gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diplotype {
    /// Star alleles joined with "/" in encounter order (e.g., "*2/*3")
    pub label: String,

    /// Always exactly two entries
    pub star_alleles: [String; 2],

    /// Records whose rsID was recognized in the gene's allele table
    pub matched_variants: Vec<VariantRecord>,

    /// Number of records for the gene, recognized or not
    pub total_variants: usize,
}

/// Outcome of diplotype resolution
///
/// `NoData` means the gene had zero variant records. It must never be
/// collapsed into a wild-type call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiplotypeResult {
    NoData,
    Resolved(Diplotype),
}

impl DiplotypeResult {
    pub fn is_no_data(&self) -> bool {
        matches!(self, DiplotypeResult::NoData)
    }

    pub fn diplotype(&self) -> Option<&Diplotype> {
        match self {
            DiplotypeResult::NoData => None,
            DiplotypeResult::Resolved(d) => Some(d),
        }
    }
}

/// Metabolizer phenotype code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhenotypeCode {
    #[serde(rename = "PM")]
    PoorMetabolizer,
    #[serde(rename = "IM")]
    IntermediateMetabolizer,
    #[serde(rename = "NM")]
    NormalMetabolizer,
    #[serde(rename = "RM")]
    RapidMetabolizer,
    #[serde(rename = "URM")]
    UltrarapidMetabolizer,
    Unknown,
}

impl PhenotypeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhenotypeCode::PoorMetabolizer => "PM",
            PhenotypeCode::IntermediateMetabolizer => "IM",
            PhenotypeCode::NormalMetabolizer => "NM",
            PhenotypeCode::RapidMetabolizer => "RM",
            PhenotypeCode::UltrarapidMetabolizer => "URM",
            PhenotypeCode::Unknown => "Unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhenotypeCode::PoorMetabolizer => "Poor Metabolizer",
            PhenotypeCode::IntermediateMetabolizer => "Intermediate Metabolizer",
            PhenotypeCode::NormalMetabolizer => "Normal Metabolizer",
            PhenotypeCode::RapidMetabolizer => "Rapid Metabolizer",
            PhenotypeCode::UltrarapidMetabolizer => "Ultrarapid Metabolizer",
            PhenotypeCode::Unknown => "Unknown Metabolizer Status",
        }
    }
}

impl fmt::Display for PhenotypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phenotype classification for one gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeResult {
    pub code: PhenotypeCode,
    pub label: String,

    /// CPIC activity score, defined for CYP2C9/CYP2D6/CYP2C19 only
    pub activity_score: Option<f64>,

    /// Static per-entry table confidence. Informational only: the
    /// recommendation carries the evidence confidence instead.
    pub table_confidence: f64,
}

/// Clinical risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Ineffective,
    Toxic,
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drug recommendation for one (drug, phenotype) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecommendation {
    pub risk_label: RiskLabel,
    pub severity: Severity,
    pub action: String,
    pub dosing_adjustment: Option<String>,
    pub alternatives: Vec<String>,
    pub monitoring: Option<String>,
    pub cpic_guideline: Option<String>,
    pub confidence_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phenotype_code_serializes_as_cpic_abbreviation() {
        let json = serde_json::to_string(&PhenotypeCode::UltrarapidMetabolizer).unwrap();
        assert_eq!(json, "\"URM\"");
        assert_eq!(PhenotypeCode::PoorMetabolizer.label(), "Poor Metabolizer");
        assert_eq!(PhenotypeCode::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_risk_label_str() {
        assert_eq!(RiskLabel::AdjustDosage.as_str(), "Adjust Dosage");
        assert_eq!(
            serde_json::to_string(&RiskLabel::AdjustDosage).unwrap(),
            "\"Adjust Dosage\""
        );
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    }

    #[test]
    fn test_diplotype_result_no_data() {
        let result = DiplotypeResult::NoData;
        assert!(result.is_no_data());
        assert!(result.diplotype().is_none());
    }
}
