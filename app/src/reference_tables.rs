// ==============================================================================
// reference_tables.rs - CPIC Reference Tables
// ==============================================================================
// Description: Process-wide immutable star-allele, phenotype and risk tables
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// Sources:
// - CPIC guidelines: https://cpicpgx.org/guidelines/
// - PharmVar star-allele definitions: https://www.pharmvar.org/
// ==============================================================================
// Tables are built once on first access and never mutated afterwards, so any
// number of concurrent pipeline runs can read them without locking.
// ==============================================================================

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{PhenotypeCode, RiskLabel, Severity};

/// Wild-type reference allele used to pad a diplotype
pub const WILD_TYPE_ALLELE: &str = "*1";

/// Pharmacogenes the VCF parser keeps; every other row is dropped
pub const TARGET_GENES: [&str; 6] = ["CYP2D6", "CYP2C19", "CYP2C9", "SLCO1B1", "TPMT", "DPYD"];

/// Supported drug → primary pharmacogene
pub const DRUG_GENES: [(&str, &str); 6] = [
    ("WARFARIN", "CYP2C9"),
    ("CODEINE", "CYP2D6"),
    ("CLOPIDOGREL", "CYP2C19"),
    ("SIMVASTATIN", "SLCO1B1"),
    ("AZATHIOPRINE", "TPMT"),
    ("FLUOROURACIL", "DPYD"),
];

pub fn is_target_gene(gene: &str) -> bool {
    TARGET_GENES.contains(&gene)
}

/// Primary gene for an already case-normalized drug name
pub fn primary_gene(drug: &str) -> Option<&'static str> {
    DRUG_GENES
        .iter()
        .find(|(name, _)| *name == drug)
        .map(|(_, gene)| *gene)
}

pub fn supported_drugs() -> Vec<&'static str> {
    DRUG_GENES.iter().map(|(drug, _)| *drug).collect()
}

// ==============================================================================
// STAR ALLELES (rsID → star allele, per gene)
// ==============================================================================

const STAR_ALLELES: &[(&str, &[(&str, &str)])] = &[
    (
        "CYP2C9",
        &[
            ("rs1799853", "*2"),
            ("rs1057910", "*3"),
            ("rs28371686", "*5"),
            ("rs9332131", "*6"),
        ],
    ),
    (
        "CYP2D6",
        &[
            ("rs3892097", "*4"),
            ("rs35742686", "*3"),
            ("rs5030655", "*6"),
            ("rs16947", "*2"),
            ("rs1135840", "*10"),
        ],
    ),
    (
        "CYP2C19",
        &[
            ("rs4244285", "*2"),
            ("rs4986893", "*3"),
            ("rs28399504", "*4"),
            ("rs12248560", "*17"),
        ],
    ),
    (
        "SLCO1B1",
        &[("rs4149056", "*5"), ("rs2306283", "*1b")],
    ),
    (
        "TPMT",
        &[
            ("rs1800462", "*2"),
            ("rs1800460", "*3B"),
            ("rs1142345", "*3C"),
            ("rs1800584", "*4"),
        ],
    ),
    (
        "DPYD",
        &[
            ("rs3918290", "*2A"),
            ("rs55886062", "*13"),
            ("rs67376798", "c.2846A>T"),
            ("rs75017182", "HapB3"),
        ],
    ),
];

pub type AlleleTable = HashMap<&'static str, &'static str>;

static STAR_ALLELE_MAP: LazyLock<HashMap<&'static str, AlleleTable>> = LazyLock::new(|| {
    STAR_ALLELES
        .iter()
        .map(|(gene, entries)| (*gene, entries.iter().copied().collect()))
        .collect()
});

/// rsID → star allele table for a gene (None for genes outside the panel)
pub fn star_alleles(gene: &str) -> Option<&'static AlleleTable> {
    STAR_ALLELE_MAP.get(gene)
}

// ==============================================================================
// PHENOTYPES ((allele, allele) → phenotype, activity score, table confidence)
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhenotypeEntry {
    pub code: PhenotypeCode,
    pub activity_score: Option<f64>,
    pub confidence: f64,
}

const fn entry(code: PhenotypeCode, activity_score: Option<f64>, confidence: f64) -> PhenotypeEntry {
    PhenotypeEntry { code, activity_score, confidence }
}

use PhenotypeCode::{
    IntermediateMetabolizer as IM, NormalMetabolizer as NM, PoorMetabolizer as PM,
    RapidMetabolizer as RM, UltrarapidMetabolizer as URM,
};

type PhenotypeRow = ((&'static str, &'static str), PhenotypeEntry);

const PHENOTYPES: &[(&str, &[PhenotypeRow])] = &[
    (
        "CYP2C9",
        &[
            (("*1", "*1"), entry(NM, Some(2.0), 0.95)),
            (("*1", "*2"), entry(IM, Some(1.5), 0.90)),
            (("*1", "*3"), entry(IM, Some(1.0), 0.90)),
            (("*2", "*2"), entry(PM, Some(1.0), 0.95)),
            (("*2", "*3"), entry(PM, Some(0.5), 0.85)),
            (("*3", "*3"), entry(PM, Some(0.0), 0.95)),
            (("*1", "*5"), entry(IM, Some(1.0), 0.85)),
            (("*1", "*6"), entry(IM, Some(1.0), 0.85)),
        ],
    ),
    (
        "CYP2D6",
        &[
            (("*1", "*1"), entry(NM, Some(2.0), 0.95)),
            (("*1", "*2"), entry(NM, Some(2.0), 0.90)),
            (("*2", "*2"), entry(URM, Some(3.0), 0.85)),
            (("*1", "*4"), entry(IM, Some(1.0), 0.90)),
            (("*4", "*4"), entry(PM, Some(0.0), 0.95)),
            (("*1", "*10"), entry(IM, Some(1.25), 0.85)),
            (("*1", "*3"), entry(IM, Some(1.0), 0.85)),
            (("*1", "*6"), entry(IM, Some(1.0), 0.85)),
        ],
    ),
    (
        "CYP2C19",
        &[
            (("*1", "*1"), entry(NM, Some(2.0), 0.95)),
            (("*1", "*2"), entry(IM, Some(1.0), 0.90)),
            (("*2", "*2"), entry(PM, Some(0.0), 0.95)),
            (("*1", "*3"), entry(IM, Some(1.0), 0.90)),
            (("*2", "*3"), entry(PM, Some(0.0), 0.95)),
            (("*1", "*17"), entry(RM, Some(2.5), 0.85)),
            (("*17", "*17"), entry(URM, Some(3.0), 0.90)),
            (("*2", "*17"), entry(IM, Some(1.5), 0.80)),
        ],
    ),
    (
        "SLCO1B1",
        &[
            (("*1", "*1"), entry(NM, None, 0.95)),
            (("*1", "*5"), entry(IM, None, 0.90)),
            (("*5", "*5"), entry(PM, None, 0.95)),
            (("*1", "*1b"), entry(NM, None, 0.85)),
        ],
    ),
    (
        "TPMT",
        &[
            (("*1", "*1"), entry(NM, None, 0.95)),
            (("*1", "*2"), entry(IM, None, 0.90)),
            (("*1", "*3B"), entry(IM, None, 0.90)),
            (("*1", "*3C"), entry(IM, None, 0.90)),
            (("*3B", "*3C"), entry(PM, None, 0.95)),
            (("*3C", "*3C"), entry(PM, None, 0.95)),
        ],
    ),
    (
        "DPYD",
        &[
            (("*1", "*1"), entry(NM, None, 0.95)),
            (("*1", "*2A"), entry(IM, None, 0.90)),
            (("*2A", "*2A"), entry(PM, None, 0.95)),
            (("*1", "*13"), entry(IM, None, 0.90)),
            (("*1", "c.2846A>T"), entry(IM, None, 0.85)),
            (("*1", "HapB3"), entry(IM, None, 0.85)),
        ],
    ),
];

/// Canonical (sorted) form of an allele pair
pub fn canonical_pair<'a>(first: &'a str, second: &'a str) -> (&'a str, &'a str) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

/// Per-gene phenotype table with allele pairs canonicalized at load time,
/// so a pair and its reverse resolve with a single lookup
#[derive(Debug, Default)]
pub struct PhenotypeTable {
    entries: HashMap<&'static str, HashMap<&'static str, PhenotypeEntry>>,
}

impl PhenotypeTable {
    fn from_rows(rows: &'static [PhenotypeRow]) -> Self {
        let mut entries: HashMap<&'static str, HashMap<&'static str, PhenotypeEntry>> =
            HashMap::new();
        for ((a, b), entry) in rows {
            let (first, second) = canonical_pair(a, b);
            entries.entry(first).or_default().insert(second, *entry);
        }
        Self { entries }
    }

    pub fn get(&self, first: &str, second: &str) -> Option<&PhenotypeEntry> {
        let (first, second) = canonical_pair(first, second);
        self.entries.get(first)?.get(second)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static PHENOTYPE_MAP: LazyLock<HashMap<&'static str, PhenotypeTable>> = LazyLock::new(|| {
    PHENOTYPES
        .iter()
        .map(|(gene, rows)| (*gene, PhenotypeTable::from_rows(rows)))
        .collect()
});

/// Allele-pair phenotype table for a gene
pub fn phenotypes(gene: &str) -> Option<&'static PhenotypeTable> {
    PHENOTYPE_MAP.get(gene)
}

// ==============================================================================
// RISK RULES ((drug, phenotype) → clinical recommendation)
// ==============================================================================

/// Static clinical content of one CPIC recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRule {
    pub risk_label: RiskLabel,
    pub severity: Severity,
    pub action: &'static str,
    pub dosing_adjustment: Option<&'static str>,
    pub monitoring: Option<&'static str>,
    pub alternatives: &'static [&'static str],
    pub cpic_guideline: &'static str,
}

const WARFARIN_GUIDELINE: &str = "CPIC Warfarin Guideline 2017";
const CODEINE_GUIDELINE: &str = "CPIC Codeine Guideline 2014";
const CLOPIDOGREL_GUIDELINE: &str = "CPIC Clopidogrel Guideline 2022";
const SIMVASTATIN_GUIDELINE: &str = "CPIC Simvastatin Guideline 2014";
const THIOPURINE_GUIDELINE: &str = "CPIC Thiopurines Guideline 2018";
const FLUOROPYRIMIDINE_GUIDELINE: &str = "CPIC Fluoropyrimidines Guideline 2017";

const RISK_RULES: &[(&str, PhenotypeCode, RiskRule)] = &[
    // WARFARIN / CYP2C9
    (
        "WARFARIN",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard warfarin dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("Routine INR monitoring."),
            alternatives: &[],
            cpic_guideline: WARFARIN_GUIDELINE,
        },
    ),
    (
        "WARFARIN",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Moderate,
            action: "Reduce warfarin starting dose by 10–25%.",
            dosing_adjustment: Some("Start at 75% of standard dose."),
            monitoring: Some("Biweekly INR for first month."),
            alternatives: &[],
            cpic_guideline: WARFARIN_GUIDELINE,
        },
    ),
    (
        "WARFARIN",
        PM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::High,
            action: "Reduce warfarin starting dose by 25–50%.",
            dosing_adjustment: Some("Start at 50% of standard dose."),
            monitoring: Some("Weekly INR monitoring for first month."),
            alternatives: &["Apixaban", "Rivaroxaban"],
            cpic_guideline: WARFARIN_GUIDELINE,
        },
    ),
    // CODEINE / CYP2D6
    (
        "CODEINE",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard codeine dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("Routine clinical monitoring."),
            alternatives: &[],
            cpic_guideline: CODEINE_GUIDELINE,
        },
    ),
    (
        "CODEINE",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Low,
            action: "Use label-recommended codeine dose; monitor for reduced effect.",
            dosing_adjustment: Some("Label-recommended dose."),
            monitoring: Some("Monitor for inadequate pain relief."),
            alternatives: &["Morphine", "Oxycodone"],
            cpic_guideline: CODEINE_GUIDELINE,
        },
    ),
    (
        "CODEINE",
        PM,
        RiskRule {
            risk_label: RiskLabel::Ineffective,
            severity: Severity::Moderate,
            action: "Codeine will not convert to morphine — no analgesic effect.",
            dosing_adjustment: Some("Do not use."),
            monitoring: None,
            alternatives: &["Morphine", "Oxycodone", "Non-opioid analgesics"],
            cpic_guideline: CODEINE_GUIDELINE,
        },
    ),
    (
        "CODEINE",
        URM,
        RiskRule {
            risk_label: RiskLabel::Toxic,
            severity: Severity::Critical,
            action: "AVOID codeine — ultrarapid conversion causes morphine toxicity.",
            dosing_adjustment: Some("Contraindicated."),
            monitoring: None,
            alternatives: &["Non-opioid analgesics", "Tramadol (with caution)"],
            cpic_guideline: CODEINE_GUIDELINE,
        },
    ),
    (
        "CODEINE",
        RM,
        RiskRule {
            risk_label: RiskLabel::Toxic,
            severity: Severity::High,
            action: "High risk of opioid toxicity due to rapid codeine metabolism.",
            dosing_adjustment: Some("Avoid or use lowest possible dose."),
            monitoring: Some("Close respiratory monitoring."),
            alternatives: &["Non-opioid analgesics"],
            cpic_guideline: CODEINE_GUIDELINE,
        },
    ),
    // CLOPIDOGREL / CYP2C19
    (
        "CLOPIDOGREL",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard clopidogrel dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("Routine platelet function monitoring."),
            alternatives: &[],
            cpic_guideline: CLOPIDOGREL_GUIDELINE,
        },
    ),
    (
        "CLOPIDOGREL",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Moderate,
            action: "Consider alternative antiplatelet therapy.",
            dosing_adjustment: Some("Higher dose may be required."),
            monitoring: Some("Platelet function testing recommended."),
            alternatives: &["Prasugrel", "Ticagrelor"],
            cpic_guideline: CLOPIDOGREL_GUIDELINE,
        },
    ),
    (
        "CLOPIDOGREL",
        PM,
        RiskRule {
            risk_label: RiskLabel::Ineffective,
            severity: Severity::High,
            action: "Clopidogrel will not activate — high cardiovascular risk.",
            dosing_adjustment: Some("Contraindicated."),
            monitoring: None,
            alternatives: &["Prasugrel", "Ticagrelor"],
            cpic_guideline: CLOPIDOGREL_GUIDELINE,
        },
    ),
    (
        "CLOPIDOGREL",
        URM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Low,
            action: "Possibly enhanced effect; monitor for bleeding.",
            dosing_adjustment: Some("Standard dose with bleeding monitoring."),
            monitoring: Some("Monitor for increased bleeding risk."),
            alternatives: &[],
            cpic_guideline: CLOPIDOGREL_GUIDELINE,
        },
    ),
    // SIMVASTATIN / SLCO1B1
    (
        "SIMVASTATIN",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard simvastatin dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("Routine CK monitoring."),
            alternatives: &[],
            cpic_guideline: SIMVASTATIN_GUIDELINE,
        },
    ),
    (
        "SIMVASTATIN",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Moderate,
            action: "Prescribe ≤20mg simvastatin or switch statin.",
            dosing_adjustment: Some("Max 20mg/day."),
            monitoring: Some("CK levels monthly for 3 months."),
            alternatives: &["Pravastatin", "Rosuvastatin"],
            cpic_guideline: SIMVASTATIN_GUIDELINE,
        },
    ),
    (
        "SIMVASTATIN",
        PM,
        RiskRule {
            risk_label: RiskLabel::Toxic,
            severity: Severity::High,
            action: "High risk of simvastatin-induced myopathy — avoid high doses.",
            dosing_adjustment: Some("Use lowest dose (5mg) or switch statin."),
            monitoring: Some("CK levels monthly."),
            alternatives: &["Pravastatin", "Rosuvastatin", "Fluvastatin"],
            cpic_guideline: SIMVASTATIN_GUIDELINE,
        },
    ),
    // AZATHIOPRINE / TPMT
    (
        "AZATHIOPRINE",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard azathioprine dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("CBC every 1–3 months."),
            alternatives: &[],
            cpic_guideline: THIOPURINE_GUIDELINE,
        },
    ),
    (
        "AZATHIOPRINE",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Moderate,
            action: "Reduce azathioprine dose by 30–70%.",
            dosing_adjustment: Some("Start at 30–70% of standard dose."),
            monitoring: Some("CBC weekly for first month."),
            alternatives: &[],
            cpic_guideline: THIOPURINE_GUIDELINE,
        },
    ),
    (
        "AZATHIOPRINE",
        PM,
        RiskRule {
            risk_label: RiskLabel::Toxic,
            severity: Severity::Critical,
            action: "AVOID azathioprine — severe life-threatening myelosuppression risk.",
            dosing_adjustment: Some("Reduce to 10% of standard dose or avoid entirely."),
            monitoring: Some("CBC weekly if used."),
            alternatives: &["Mycophenolate mofetil"],
            cpic_guideline: THIOPURINE_GUIDELINE,
        },
    ),
    // FLUOROURACIL / DPYD
    (
        "FLUOROURACIL",
        NM,
        RiskRule {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            action: "Standard fluorouracil dosing is appropriate.",
            dosing_adjustment: None,
            monitoring: Some("Routine CBC and clinical monitoring."),
            alternatives: &[],
            cpic_guideline: FLUOROPYRIMIDINE_GUIDELINE,
        },
    ),
    (
        "FLUOROURACIL",
        IM,
        RiskRule {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::High,
            action: "Reduce fluorouracil starting dose by 25–50%.",
            dosing_adjustment: Some("Start at 50–75% of standard dose."),
            monitoring: Some("CBC and clinical status weekly."),
            alternatives: &[],
            cpic_guideline: FLUOROPYRIMIDINE_GUIDELINE,
        },
    ),
    (
        "FLUOROURACIL",
        PM,
        RiskRule {
            risk_label: RiskLabel::Toxic,
            severity: Severity::Critical,
            action: "AVOID fluorouracil — life-threatening toxicity risk.",
            dosing_adjustment: Some("Reduce by ≥50% or avoid entirely."),
            monitoring: Some("CBC and clinical status if used."),
            alternatives: &["Capecitabine (with dose reduction)", "Raltitrexed"],
            cpic_guideline: FLUOROPYRIMIDINE_GUIDELINE,
        },
    ),
];

type RiskRuleTable = HashMap<&'static str, HashMap<PhenotypeCode, &'static RiskRule>>;

static RISK_RULE_MAP: LazyLock<RiskRuleTable> = LazyLock::new(|| {
    let mut rules: RiskRuleTable = HashMap::new();
    for (drug, code, rule) in RISK_RULES {
        rules.entry(*drug).or_default().insert(*code, rule);
    }
    rules
});

/// Rule for an upper-cased drug name and phenotype code
pub fn risk_rule(drug: &str, code: PhenotypeCode) -> Option<&'static RiskRule> {
    RISK_RULE_MAP.get(drug)?.get(&code).copied()
}

// ==============================================================================
// CLINICAL SIGNIFICANCE TIERS
// ==============================================================================

/// Score for CLINSIG values not in the tier table (including "Unknown")
pub const UNRECOGNIZED_TIER_SCORE: f64 = 0.30;

const CLINSIG_TIERS: [(&str, f64); 6] = [
    ("pathogenic", 1.00),
    ("likely_pathogenic", 0.85),
    ("risk_factor", 0.65),
    ("uncertain_significance", 0.40),
    ("likely_benign", 0.20),
    ("benign", 0.10),
];

static CLINSIG_SCORES: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| CLINSIG_TIERS.iter().copied().collect());

/// Evidence score for a clinical-significance tier
///
/// Matching is case-insensitive and treats spaces as underscores, so
/// "Likely pathogenic" and "likely_pathogenic" score the same.
pub fn clinical_significance_score(tier: &str) -> f64 {
    let normalized = tier.trim().to_lowercase().replace(' ', "_");
    CLINSIG_SCORES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(UNRECOGNIZED_TIER_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_drug_gene_is_a_target_gene() {
        for (drug, gene) in DRUG_GENES {
            assert!(is_target_gene(gene), "{} maps to non-target gene {}", drug, gene);
            assert!(star_alleles(gene).is_some());
            assert!(phenotypes(gene).is_some());
        }
    }

    #[test]
    fn test_primary_gene() {
        assert_eq!(primary_gene("WARFARIN"), Some("CYP2C9"));
        assert_eq!(primary_gene("FLUOROURACIL"), Some("DPYD"));
        assert_eq!(primary_gene("warfarin"), None);
        assert_eq!(primary_gene("ASPIRIN"), None);
    }

    #[test]
    fn test_star_allele_lookup() {
        let cyp2c9 = star_alleles("CYP2C9").unwrap();
        assert_eq!(cyp2c9.get("rs1799853"), Some(&"*2"));
        assert_eq!(cyp2c9.get("rs1057910"), Some(&"*3"));
        assert!(star_alleles("BRCA1").is_none());
    }

    #[test]
    fn test_phenotype_keys_are_canonical() {
        let cyp2c19 = phenotypes("CYP2C19").unwrap();
        let pm = cyp2c19.get("*3", "*2").unwrap();
        assert_eq!(pm.code, PhenotypeCode::PoorMetabolizer);
        assert_eq!(cyp2c19.get("*2", "*3"), Some(pm));
        assert_eq!(canonical_pair("*17", "*1"), ("*1", "*17"));

        // Table row count survives canonicalization (no colliding pairs)
        for (gene, rows) in PHENOTYPES {
            assert_eq!(phenotypes(gene).unwrap().len(), rows.len(), "{}", gene);
        }
    }

    #[test]
    fn test_risk_rule_lookup() {
        let rule = risk_rule("WARFARIN", PhenotypeCode::PoorMetabolizer).unwrap();
        assert_eq!(rule.severity, Severity::High);
        assert_eq!(rule.alternatives, &["Apixaban", "Rivaroxaban"]);

        assert!(risk_rule("WARFARIN", PhenotypeCode::UltrarapidMetabolizer).is_none());
        assert!(risk_rule("CODEINE", PhenotypeCode::Unknown).is_none());
        let loaded: usize = RISK_RULE_MAP.values().map(HashMap::len).sum();
        assert_eq!(loaded, RISK_RULES.len());
    }

    #[test]
    fn test_clinical_significance_scores() {
        assert_eq!(clinical_significance_score("pathogenic"), 1.00);
        assert_eq!(clinical_significance_score("Likely pathogenic"), 0.85);
        assert_eq!(clinical_significance_score("RISK_FACTOR"), 0.65);
        assert_eq!(clinical_significance_score("benign"), 0.10);
        assert_eq!(clinical_significance_score("Unknown"), UNRECOGNIZED_TIER_SCORE);
        assert_eq!(clinical_significance_score(""), UNRECOGNIZED_TIER_SCORE);
    }
}
