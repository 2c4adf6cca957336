// ==============================================================================
// processor.rs - Pharmacogenomic Analysis Pipeline
// ==============================================================================
// Description: Chains extraction, diplotype, phenotype, confidence and risk
// Author: Matt Barham
// Created: 2026-02-12
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// Data flows strictly forward:
//   text → variants → diplotype(gene) → phenotype → confidence → risk
// The deterministic part (`run_pipeline`) is synchronous and holds no state.
// The explanation is attached afterwards and cannot change any field above.
// ==============================================================================

use anyhow::{Context, Result};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::info;

use crate::audit::{AuditEventType, AuditTrail};
use crate::confidence::compute_confidence;
use crate::diplotype::resolve_diplotype;
use crate::explanation::{
    no_data_explanation, Explanation, ExplanationContext, ExplanationService, ExplanationSource,
};
use crate::models::{Diplotype, DiplotypeResult, PhenotypeResult, RiskRecommendation, VariantRecord};
use crate::output::{AnalysisReport, InputMetadata};
use crate::parsers::{VCFParseError, VCFParser};
use crate::phenotype::classify_phenotype;
use crate::risk::assess_drug_risk;
use crate::validator::{validate_drug, InputValidator, ValidatedDrug};

/// Outcome for the drug's primary gene
#[derive(Debug, Clone, PartialEq)]
pub enum GeneAssessment {
    /// The gene had no variant records; nothing downstream was computed
    NoData,
    Resolved {
        diplotype: Diplotype,
        phenotype: PhenotypeResult,
        confidence: f64,
        recommendation: RiskRecommendation,
    },
}

/// Everything the deterministic pipeline produced for one request
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub drug: String,
    pub gene: &'static str,
    pub variants: Vec<VariantRecord>,
    pub gene_coverage: Vec<String>,
    pub assessment: GeneAssessment,
    pub audit: AuditTrail,
}

/// Distinct target genes present in the extracted variants, sorted
pub fn gene_coverage(variants: &[VariantRecord]) -> Vec<String> {
    variants
        .iter()
        .map(|v| v.gene.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn rsids(variants: &[VariantRecord]) -> Vec<&str> {
    variants.iter().map(|v| v.rsid.as_str()).collect()
}

/// Run the five deterministic stages over decoded VCF text
///
/// Only extraction can fail. An unresolvable gene, phenotype or
/// (drug, phenotype) pair is a valid terminal outcome, not an error.
pub fn run_pipeline(content: &str, drug: &ValidatedDrug) -> Result<PipelineResult, VCFParseError> {
    let gene = drug.gene;
    let mut audit = AuditTrail::new();

    let variants = VCFParser::new().parse_str(content)?;
    let coverage = gene_coverage(&variants);
    audit.record(
        AuditEventType::VariantsExtracted,
        None,
        json!({ "records": variants.len(), "gene_coverage": coverage }),
    );

    let assessment = match resolve_diplotype(&variants, gene) {
        DiplotypeResult::NoData => {
            audit.record(
                AuditEventType::NoGeneData,
                Some(gene),
                json!({ "gene": gene, "drug": drug.name }),
            );
            GeneAssessment::NoData
        }
        DiplotypeResult::Resolved(diplotype) => {
            audit.record(
                AuditEventType::DiplotypeResolved,
                Some(gene),
                json!({
                    "diplotype": diplotype.label,
                    "matched_rsids": rsids(&diplotype.matched_variants),
                    "total_variants": diplotype.total_variants,
                }),
            );

            let phenotype = classify_phenotype(gene, &diplotype.star_alleles);
            audit.record(
                AuditEventType::PhenotypeClassified,
                Some(gene),
                json!({
                    "star_alleles": diplotype.star_alleles,
                    "phenotype": phenotype.code.as_str(),
                    "activity_score": phenotype.activity_score,
                }),
            );

            let confidence = compute_confidence(&diplotype.matched_variants);
            audit.record(
                AuditEventType::ConfidenceScored,
                Some(gene),
                json!({
                    "matched_rsids": rsids(&diplotype.matched_variants),
                    "confidence": confidence,
                }),
            );

            let recommendation = assess_drug_risk(&drug.name, phenotype.code, confidence);
            audit.record(
                AuditEventType::RiskAssessed,
                Some(drug.name.as_str()),
                json!({
                    "drug": drug.name,
                    "phenotype": phenotype.code.as_str(),
                    "risk_label": recommendation.risk_label.as_str(),
                    "severity": recommendation.severity.as_str(),
                    "guideline": recommendation.cpic_guideline,
                    "confidence": recommendation.confidence_score,
                }),
            );

            GeneAssessment::Resolved {
                diplotype,
                phenotype,
                confidence,
                recommendation,
            }
        }
    };

    Ok(PipelineResult {
        drug: drug.name.clone(),
        gene,
        variants,
        gene_coverage: coverage,
        assessment,
        audit,
    })
}

/// Validates input, runs the pipeline and assembles the report
pub struct PharmacogenomicProcessor {
    validator: InputValidator,
    explanations: ExplanationService,
}

impl PharmacogenomicProcessor {
    pub fn new(validator: InputValidator, explanations: ExplanationService) -> Self {
        Self {
            validator,
            explanations,
        }
    }

    /// Analyze raw upload bytes (plain or gzip VCF) for one drug
    pub async fn analyze(&self, bytes: &[u8], drug: &str) -> Result<AnalysisReport> {
        let drug = validate_drug(drug)?;
        info!(drug = %drug.name, gene = drug.gene, "Starting pharmacogenomic analysis");

        let input = self
            .validator
            .validate_upload(bytes)
            .context("Invalid VCF file")?;

        let mut result = run_pipeline(&input.content, &drug).context("VCF parsing failed")?;

        let explanation = self.explain(&result).await;
        match explanation.source {
            ExplanationSource::Llm => result.audit.record(
                AuditEventType::ExplanationGenerated,
                Some(result.gene),
                json!({ "source": "llm", "citations": explanation.variant_citations }),
            ),
            ExplanationSource::RuleBased => result.audit.record(
                AuditEventType::ExplanationFallback,
                Some(result.gene),
                json!({
                    "source": "rule_based",
                    "primary": self.explanations.primary_name(),
                    "citations": explanation.variant_citations,
                }),
            ),
            ExplanationSource::NoData => {}
        }

        let report = AnalysisReport::from_pipeline(result, explanation, InputMetadata::from(&input));
        info!(
            patient_id = %report.patient_id,
            risk = %report.risk_assessment.risk_label,
            "Analysis complete"
        );
        Ok(report)
    }

    /// Narrate a resolved result; the no-data outcome never calls the explainer
    async fn explain(&self, result: &PipelineResult) -> Explanation {
        match &result.assessment {
            GeneAssessment::NoData => no_data_explanation(&result.drug, result.gene),
            GeneAssessment::Resolved {
                diplotype,
                phenotype,
                recommendation,
                ..
            } => {
                let context = ExplanationContext {
                    drug: &result.drug,
                    gene: result.gene,
                    diplotype: &diplotype.label,
                    phenotype: &phenotype.label,
                    risk_label: recommendation.risk_label.as_str(),
                    variants: &diplotype.matched_variants,
                };
                self.explanations.explain(&context).await
            }
        }
    }
}
