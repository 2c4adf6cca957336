// ==============================================================================
// output.rs - Analysis Report Generation
// ==============================================================================
// Description: Assembles the clinical report and writes it as JSON or CSV
// Author: Matt Barham
// Created: 2026-02-13
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::audit::AuditTrail;
use crate::explanation::Explanation;
use crate::models::{PhenotypeCode, RiskLabel, RiskRecommendation, Severity, VariantRecord};
use crate::processor::{GeneAssessment, PipelineResult};
use crate::risk::no_data_recommendation;
use crate::validator::ValidatedInput;

pub const NO_DATA_LABEL: &str = "Unknown";

pub const DYNAMIC_CONFIDENCE_BASIS: &str =
    "Dynamic: QUAL + DP + FILTER + CLINSIG weighted scoring";

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full report (best for web APIs and archiving)
    Json,
    /// Detected variants, one row each (best for spreadsheets)
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
        }
    }
}

/// Complete analysis report for one (VCF, drug) request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub patient_id: String,
    pub drug: String,

    /// RFC 3339, UTC
    pub timestamp: String,

    pub risk_assessment: RiskAssessmentOutput,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: Explanation,
    pub quality_metrics: QualityMetrics,
    pub input: InputMetadata,
    pub audit_trail: AuditTrail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessmentOutput {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,

    /// "*2/*3", or "Unknown" when the gene had no records
    pub diplotype: String,
    pub phenotype: PhenotypeCode,
    pub phenotype_label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_score: Option<f64>,

    /// Static table confidence, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phenotype_table_confidence: Option<f64>,

    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedVariant {
    pub rsid: String,
    pub gene: String,
    pub star_allele: Option<String>,
    pub genotype: String,
    pub clinical_significance: String,
}

impl From<&VariantRecord> for DetectedVariant {
    fn from(v: &VariantRecord) -> Self {
        Self {
            rsid: v.rsid.clone(),
            gene: v.gene.clone(),
            star_allele: v.star_allele.clone(),
            genotype: v.genotype.clone(),
            clinical_significance: v.clinical_significance.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub action: String,
    pub dosing_adjustment: Option<String>,
    pub alternative_drugs: Vec<String>,
    pub monitoring: Option<String>,
    pub cpic_guideline: Option<String>,
}

impl From<&RiskRecommendation> for ClinicalRecommendation {
    fn from(r: &RiskRecommendation) -> Self {
        Self {
            action: r.action.clone(),
            dosing_adjustment: r.dosing_adjustment.clone(),
            alternative_drugs: r.alternatives.clone(),
            monitoring: r.monitoring.clone(),
            cpic_guideline: r.cpic_guideline.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,

    /// All extracted records across the target panel
    pub variants_detected: usize,
    pub gene_coverage: Vec<String>,
    pub confidence_basis: String,
}

/// Fingerprint of the bytes the report was derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMetadata {
    pub sha256: String,
    pub size_bytes: usize,
    pub gzip_compressed: bool,
}

impl From<&ValidatedInput> for InputMetadata {
    fn from(input: &ValidatedInput) -> Self {
        Self {
            sha256: input.hash_sha256.clone(),
            size_bytes: input.size,
            gzip_compressed: input.compressed,
        }
    }
}

/// "PATIENT_" followed by six upper-case hex characters
pub fn generate_patient_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("PATIENT_{}", hex[..6].to_uppercase())
}

impl AnalysisReport {
    pub fn from_pipeline(
        result: PipelineResult,
        explanation: Explanation,
        input: InputMetadata,
    ) -> Self {
        let PipelineResult {
            drug,
            gene,
            variants,
            gene_coverage,
            assessment,
            audit,
        } = result;

        let (risk, profile, confidence_basis) = match assessment {
            GeneAssessment::NoData => (
                no_data_recommendation(&drug, gene),
                PharmacogenomicProfile {
                    primary_gene: gene.to_string(),
                    diplotype: NO_DATA_LABEL.to_string(),
                    phenotype: PhenotypeCode::Unknown,
                    phenotype_label: PhenotypeCode::Unknown.label().to_string(),
                    activity_score: None,
                    phenotype_table_confidence: None,
                    detected_variants: Vec::new(),
                },
                format!("No {} variants detected in VCF", gene),
            ),
            GeneAssessment::Resolved {
                diplotype,
                phenotype,
                recommendation,
                ..
            } => (
                recommendation,
                PharmacogenomicProfile {
                    primary_gene: gene.to_string(),
                    diplotype: diplotype.label,
                    phenotype: phenotype.code,
                    phenotype_label: phenotype.label,
                    activity_score: phenotype.activity_score,
                    phenotype_table_confidence: Some(phenotype.table_confidence),
                    detected_variants: diplotype
                        .matched_variants
                        .iter()
                        .map(DetectedVariant::from)
                        .collect(),
                },
                DYNAMIC_CONFIDENCE_BASIS.to_string(),
            ),
        };

        Self {
            patient_id: generate_patient_id(),
            drug,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            risk_assessment: RiskAssessmentOutput {
                risk_label: risk.risk_label,
                confidence_score: risk.confidence_score,
                severity: risk.severity,
            },
            pharmacogenomic_profile: profile,
            clinical_recommendation: ClinicalRecommendation::from(&risk),
            llm_generated_explanation: explanation,
            quality_metrics: QualityMetrics {
                vcf_parsing_success: true,
                variants_detected: variants.len(),
                gene_coverage,
                confidence_basis,
            },
            input,
            audit_trail: audit,
        }
    }
}

/// One CSV row per detected variant, repeating the report-level calls
#[derive(Debug, Serialize)]
struct CsvVariantRow<'a> {
    patient_id: &'a str,
    drug: &'a str,
    primary_gene: &'a str,
    diplotype: &'a str,
    phenotype: &'a str,
    risk_label: &'a str,
    severity: &'a str,
    confidence_score: f64,
    rsid: &'a str,
    gene: &'a str,
    star_allele: Option<&'a str>,
    genotype: &'a str,
    clinical_significance: &'a str,
}

const CSV_HEADER: [&str; 13] = [
    "patient_id",
    "drug",
    "primary_gene",
    "diplotype",
    "phenotype",
    "risk_label",
    "severity",
    "confidence_score",
    "rsid",
    "gene",
    "star_allele",
    "genotype",
    "clinical_significance",
];

/// Write `report` to any writer in the given format
pub fn write_report<W: Write>(report: &AnalysisReport, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(report, writer),
        OutputFormat::Csv => write_csv(report, writer),
    }
}

/// Write `report` to a file, returning its path
pub fn write_report_file(report: &AnalysisReport, format: OutputFormat, path: &Path) -> Result<PathBuf> {
    info!("Generating {} output: {:?}", format.extension(), path);

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;
    write_report(report, format, std::io::BufWriter::new(file))?;

    Ok(path.to_path_buf())
}

fn write_json<W: Write>(report: &AnalysisReport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to write JSON output")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(report: &AnalysisReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let profile = &report.pharmacogenomic_profile;
    let risk = &report.risk_assessment;
    for variant in &profile.detected_variants {
        csv_writer
            .serialize(CsvVariantRow {
                patient_id: &report.patient_id,
                drug: &report.drug,
                primary_gene: &profile.primary_gene,
                diplotype: &profile.diplotype,
                phenotype: profile.phenotype.as_str(),
                risk_label: risk.risk_label.as_str(),
                severity: risk.severity.as_str(),
                confidence_score: risk.confidence_score,
                rsid: &variant.rsid,
                gene: &variant.gene,
                star_allele: variant.star_allele.as_deref(),
                genotype: &variant.genotype,
                clinical_significance: &variant.clinical_significance,
            })
            .context("Failed to write CSV row")?;
    }

    csv_writer.flush()?;
    info!("CSV output complete: {} variants", profile.detected_variants.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diplotype::tests::call;
    use crate::explanation::no_data_explanation;
    use crate::models::{Diplotype, PhenotypeResult};
    use crate::risk::assess_drug_risk;

    fn input() -> InputMetadata {
        InputMetadata {
            sha256: "ab".repeat(32),
            size_bytes: 1024,
            gzip_compressed: false,
        }
    }

    fn resolved_result() -> PipelineResult {
        let mut star2 = call("CYP2C9", "rs1799853", "0/1");
        star2.star_allele = Some("*2".to_string());
        let star3 = call("CYP2C9", "rs1057910", "1/1");

        PipelineResult {
            drug: "WARFARIN".to_string(),
            gene: "CYP2C9",
            variants: vec![star2.clone(), star3.clone(), call("TPMT", "rs1800460", "0/1")],
            gene_coverage: vec!["CYP2C9".to_string(), "TPMT".to_string()],
            assessment: GeneAssessment::Resolved {
                diplotype: Diplotype {
                    label: "*2/*3".to_string(),
                    star_alleles: ["*2".to_string(), "*3".to_string()],
                    matched_variants: vec![star2, star3],
                    total_variants: 2,
                },
                phenotype: PhenotypeResult {
                    code: PhenotypeCode::PoorMetabolizer,
                    label: "Poor Metabolizer".to_string(),
                    activity_score: Some(0.5),
                    table_confidence: 0.85,
                },
                confidence: 0.77,
                recommendation: assess_drug_risk("WARFARIN", PhenotypeCode::PoorMetabolizer, 0.77),
            },
            audit: AuditTrail::new(),
        }
    }

    fn explanation() -> Explanation {
        no_data_explanation("WARFARIN", "CYP2C9")
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Csv.mime_type(), "text/csv");
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");

        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_patient_id_shape() {
        let id = generate_patient_id();
        assert_eq!(id.len(), "PATIENT_".len() + 6);
        assert!(id["PATIENT_".len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_resolved_report_json_shape() {
        let report = AnalysisReport::from_pipeline(resolved_result(), explanation(), input());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["drug"], "WARFARIN");
        assert_eq!(json["risk_assessment"]["risk_label"], "Adjust Dosage");
        assert_eq!(json["risk_assessment"]["severity"], "high");
        assert_eq!(json["risk_assessment"]["confidence_score"], 0.77);
        assert_eq!(json["pharmacogenomic_profile"]["phenotype"], "PM");
        assert_eq!(json["pharmacogenomic_profile"]["activity_score"], 0.5);
        assert_eq!(
            json["pharmacogenomic_profile"]["detected_variants"][0]["star_allele"],
            "*2"
        );
        assert_eq!(
            json["clinical_recommendation"]["alternative_drugs"],
            serde_json::json!(["Apixaban", "Rivaroxaban"])
        );
        assert_eq!(json["quality_metrics"]["variants_detected"], 3);
        assert_eq!(json["quality_metrics"]["confidence_basis"], DYNAMIC_CONFIDENCE_BASIS);
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_no_data_report() {
        let mut result = resolved_result();
        result.assessment = GeneAssessment::NoData;

        let report = AnalysisReport::from_pipeline(result, explanation(), input());
        let profile = &report.pharmacogenomic_profile;

        assert_eq!(profile.diplotype, NO_DATA_LABEL);
        assert_eq!(profile.phenotype, PhenotypeCode::Unknown);
        assert!(profile.detected_variants.is_empty());
        assert!(profile.phenotype_table_confidence.is_none());
        assert_eq!(report.risk_assessment.risk_label, RiskLabel::Unknown);
        assert_eq!(report.risk_assessment.severity, Severity::None);
        assert_eq!(report.risk_assessment.confidence_score, 0.0);
        assert_eq!(
            report.clinical_recommendation.monitoring.as_deref(),
            Some("Standard clinical monitoring recommended.")
        );
        assert_eq!(
            report.quality_metrics.confidence_basis,
            "No CYP2C9 variants detected in VCF"
        );
    }

    #[test]
    fn test_write_csv() {
        let report = AnalysisReport::from_pipeline(resolved_result(), explanation(), input());
        let mut buffer = Vec::new();
        write_report(&report, OutputFormat::Csv, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("patient_id,drug,primary_gene"));
        assert!(lines[1].contains(",WARFARIN,CYP2C9,*2/*3,PM,Adjust Dosage,high,0.77,rs1799853,CYP2C9,*2,0/1,"));
        assert!(lines[2].contains(",rs1057910,CYP2C9,,1/1,"));
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = AnalysisReport::from_pipeline(resolved_result(), explanation(), input());

        let written = write_report_file(&report, OutputFormat::Json, &path).unwrap();
        assert_eq!(written, path);

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["pharmacogenomic_profile"]["diplotype"], "*2/*3");
        assert_eq!(parsed["input"]["sha256"], "ab".repeat(32));
    }
}
