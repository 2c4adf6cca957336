// ==============================================================================
// explanation.rs - Clinical Explanation Service
// ==============================================================================
// Description: Narrates a finished pipeline result via LLM or fixed templates
// Author: Matt Barham
// Created: 2026-02-12
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// The explainer only receives a read-only view of the result. It can describe
// the diplotype, phenotype and risk label but cannot change any of them.
// The network explainer is called at most once per analysis; on absence or
// failure the rule-based template is used instead.
// ==============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::VariantRecord;

pub const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 20;

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.1;

/// Single-line responses are cut to this many characters for the summary
const SUMMARY_FALLBACK_CHARS: usize = 300;

#[derive(Error, Debug)]
pub enum ExplanationError {
    #[error("No GROQ_API_KEY configured")]
    MissingCredentials,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Explanation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Explanation service returned no content")]
    EmptyResponse,
}

/// Read-only view of a pipeline result handed to an explainer
#[derive(Debug, Clone, Copy)]
pub struct ExplanationContext<'a> {
    pub drug: &'a str,
    pub gene: &'a str,
    pub diplotype: &'a str,
    pub phenotype: &'a str,
    pub risk_label: &'a str,
    pub variants: &'a [VariantRecord],
}

impl ExplanationContext<'_> {
    /// rsIDs of the matched variants, in order
    pub fn variant_citations(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.rsid.clone()).collect()
    }

    fn variant_list(&self, none_text: &str) -> String {
        if self.variants.is_empty() {
            none_text.to_string()
        } else {
            self.variant_citations().join(", ")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Llm,
    RuleBased,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub mechanism: String,
    pub variant_citations: Vec<String>,
    pub source: ExplanationSource,
}

/// Something that can narrate a finished result
#[async_trait]
pub trait Explainer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn explain(
        &self,
        context: &ExplanationContext<'_>,
    ) -> Result<Explanation, ExplanationError>;
}

// ==============================================================================
// NETWORK EXPLAINER
// ==============================================================================

/// Settings for the OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub url: String,
    pub timeout: Duration,
}

impl LlmConfig {
    /// Read GROQ_API_KEY, PGX_LLM_MODEL, PGX_LLM_URL and PGX_LLM_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ExplanationError> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ExplanationError::MissingCredentials)?;

        let timeout_secs = std::env::var("PGX_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            model: std::env::var("PGX_LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            url: std::env::var("PGX_LLM_URL").unwrap_or_else(|_| DEFAULT_LLM_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// LLM-backed explainer over an OpenAI-compatible chat API
pub struct LlmExplainer {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmExplainer {
    pub fn new(config: LlmConfig) -> Result<Self, ExplanationError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

/// Prompt that asks for narration only, never new clinical decisions
pub fn build_prompt(context: &ExplanationContext<'_>) -> String {
    format!(
        "You are a clinical pharmacogenomics assistant writing for clinicians.\n\
         \n\
         A deterministic CPIC rule engine produced this result:\n\
         - Drug: {drug}\n\
         - Gene: {gene}\n\
         - Diplotype: {diplotype}\n\
         - Phenotype: {phenotype}\n\
         - Risk Assessment: {risk}\n\
         - Detected Variants: {variants}\n\
         \n\
         Explain this result with:\n\
         1. A two-sentence clinical summary\n\
         2. The biological mechanism by which this genotype changes drug metabolism\n\
         3. The known functional impact of each detected variant\n\
         \n\
         Constraints:\n\
         - Do not recommend doses or actions; those are already fixed\n\
         - Do not mention variants or genotypes that are not listed above\n\
         - If the diplotype is *1/*1 or Unknown, say that no actionable variants were found\n\
         - Be factual and precise",
        drug = context.drug,
        gene = context.gene,
        diplotype = context.diplotype,
        phenotype = context.phenotype,
        risk = context.risk_label,
        variants = context.variant_list("none detected"),
    )
}

/// First two lines joined, or the first 300 characters of a one-line reply
pub fn summarize(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() >= 2 {
        lines[..2].join(" ")
    } else {
        text.chars().take(SUMMARY_FALLBACK_CHARS).collect()
    }
}

#[async_trait]
impl Explainer for LlmExplainer {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn explain(
        &self,
        context: &ExplanationContext<'_>,
    ) -> Result<Explanation, ExplanationError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(context),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        info!(model = %self.config.model, gene = context.gene, "Requesting LLM explanation");
        let resp = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplanationError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatResponse = resp.json().await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ExplanationError::EmptyResponse)?;

        Ok(Explanation {
            summary: summarize(&text),
            mechanism: text,
            variant_citations: context.variant_citations(),
            source: ExplanationSource::Llm,
        })
    }
}

// ==============================================================================
// RULE-BASED EXPLAINER
// ==============================================================================

/// Deterministic template built only from the pipeline result
#[derive(Debug, Clone)]
pub struct RuleBasedExplainer {
    reason: String,
}

impl RuleBasedExplainer {
    /// `reason` is appended to the mechanism text to say why no LLM text exists
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn render(&self, context: &ExplanationContext<'_>) -> Explanation {
        let summary = format!(
            "Patient carries {} diplotype {}, resulting in {} status. \
             This affects {} metabolism as indicated by the risk assessment.",
            context.gene, context.diplotype, context.phenotype, context.drug
        );

        let mechanism = format!(
            "{gene} encodes a key metabolic enzyme. \
             The {diplotype} diplotype (detected variants: {variants}) \
             alters enzyme activity, leading to {phenotype} metabolizer status. \
             This directly impacts {drug} pharmacokinetics and clinical response. \
             [Note: Detailed LLM explanation unavailable: {reason}]",
            gene = context.gene,
            diplotype = context.diplotype,
            variants = context.variant_list("no variants detected"),
            phenotype = context.phenotype,
            drug = context.drug,
            reason = self.reason,
        );

        Explanation {
            summary,
            mechanism,
            variant_citations: context.variant_citations(),
            source: ExplanationSource::RuleBased,
        }
    }
}

#[async_trait]
impl Explainer for RuleBasedExplainer {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    async fn explain(
        &self,
        context: &ExplanationContext<'_>,
    ) -> Result<Explanation, ExplanationError> {
        Ok(self.render(context))
    }
}

/// Fixed explanation when the primary gene has no variant records
pub fn no_data_explanation(drug: &str, gene: &str) -> Explanation {
    Explanation {
        summary: format!(
            "No pharmacogenomically relevant {} variants were identified in the uploaded VCF.",
            gene
        ),
        mechanism: format!(
            "Without {} variant data, metabolizer status for {} cannot be determined.",
            gene, drug
        ),
        variant_citations: Vec::new(),
        source: ExplanationSource::NoData,
    }
}

// ==============================================================================
// SERVICE
// ==============================================================================

/// Picks the network explainer when available and falls back otherwise
pub struct ExplanationService {
    primary: Option<Box<dyn Explainer>>,
    unavailable_reason: String,
}

impl ExplanationService {
    /// Use the LLM explainer if credentials are configured
    pub fn from_env() -> Self {
        match LlmConfig::from_env().and_then(LlmExplainer::new) {
            Ok(explainer) => Self::with_explainer(Box::new(explainer)),
            Err(e) => {
                info!("LLM explainer disabled: {}", e);
                Self::rule_based(e.to_string())
            }
        }
    }

    pub fn with_explainer(explainer: Box<dyn Explainer>) -> Self {
        Self {
            primary: Some(explainer),
            unavailable_reason: String::new(),
        }
    }

    /// Never call the network; always use the template
    pub fn rule_based(reason: impl Into<String>) -> Self {
        Self {
            primary: None,
            unavailable_reason: reason.into(),
        }
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.as_ref().map(|e| e.name()).unwrap_or("rule_based")
    }

    /// Always produces an explanation; failures of the primary are logged
    pub async fn explain(&self, context: &ExplanationContext<'_>) -> Explanation {
        let Some(primary) = &self.primary else {
            return RuleBasedExplainer::new(self.unavailable_reason.as_str()).render(context);
        };

        match primary.explain(context).await {
            Ok(explanation) => explanation,
            Err(e) => {
                warn!(explainer = primary.name(), "Explanation failed, using fallback: {}", e);
                RuleBasedExplainer::new(e.to_string()).render(context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diplotype::tests::call;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingExplainer {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Explainer for CountingExplainer {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn explain(
            &self,
            context: &ExplanationContext<'_>,
        ) -> Result<Explanation, ExplanationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ExplanationError::Service {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(Explanation {
                summary: "ok".to_string(),
                mechanism: "ok".to_string(),
                variant_citations: context.variant_citations(),
                source: ExplanationSource::Llm,
            })
        }
    }

    fn context(variants: &[VariantRecord]) -> ExplanationContext<'_> {
        ExplanationContext {
            drug: "WARFARIN",
            gene: "CYP2C9",
            diplotype: "*2/*3",
            phenotype: "Poor Metabolizer",
            risk_label: "Adjust Dosage",
            variants,
        }
    }

    #[test]
    fn test_rule_based_template() {
        let variants = vec![
            call("CYP2C9", "rs1799853", "0/1"),
            call("CYP2C9", "rs1057910", "1/1"),
        ];
        let explanation = RuleBasedExplainer::new("offline").render(&context(&variants));

        assert_eq!(
            explanation.summary,
            "Patient carries CYP2C9 diplotype *2/*3, resulting in Poor Metabolizer status. \
             This affects WARFARIN metabolism as indicated by the risk assessment."
        );
        assert!(explanation.mechanism.contains("detected variants: rs1799853, rs1057910"));
        assert!(explanation.mechanism.ends_with("unavailable: offline]"));
        assert_eq!(explanation.variant_citations, vec!["rs1799853", "rs1057910"]);
        assert_eq!(explanation.source, ExplanationSource::RuleBased);
    }

    #[test]
    fn test_prompt_lists_only_given_facts() {
        let prompt = build_prompt(&context(&[]));
        assert!(prompt.contains("- Diplotype: *2/*3"));
        assert!(prompt.contains("- Detected Variants: none detected"));
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize("Line one.\nLine two.\nLine three."), "Line one. Line two.");
        let long = "x".repeat(400);
        assert_eq!(summarize(&long).len(), SUMMARY_FALLBACK_CHARS);
    }

    #[tokio::test]
    async fn test_service_uses_primary_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = ExplanationService::with_explainer(Box::new(CountingExplainer {
            calls: calls.clone(),
            fail: false,
        }));

        let explanation = service.explain(&context(&[])).await;
        assert_eq!(explanation.source, ExplanationSource::Llm);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_falls_back_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = ExplanationService::with_explainer(Box::new(CountingExplainer {
            calls: calls.clone(),
            fail: true,
        }));

        let variants = vec![call("CYP2C9", "rs1799853", "0/1")];
        let explanation = service.explain(&context(&variants)).await;
        assert_eq!(explanation.source, ExplanationSource::RuleBased);
        assert!(explanation.mechanism.contains("returned 503"));
        assert_eq!(explanation.variant_citations, vec!["rs1799853"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rule_based_service_never_calls_network() {
        let service = ExplanationService::rule_based("No GROQ_API_KEY configured");
        assert_eq!(service.primary_name(), "rule_based");

        let explanation = service.explain(&context(&[])).await;
        assert_eq!(explanation.source, ExplanationSource::RuleBased);
        assert!(explanation.mechanism.contains("no variants detected"));
        assert!(explanation.mechanism.contains("No GROQ_API_KEY configured"));
    }

    #[test]
    fn test_no_data_explanation() {
        let explanation = no_data_explanation("WARFARIN", "CYP2C9");
        assert!(explanation.summary.contains("CYP2C9"));
        assert!(explanation.variant_citations.is_empty());
        assert_eq!(explanation.source, ExplanationSource::NoData);
    }
}
