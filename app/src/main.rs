// ==============================================================================
// main.rs - Pharmacogenomic Processor Entry Point
// ==============================================================================
// Description: CLI for drug-risk analysis of annotated pharmacogene VCFs
// Author: Matt Barham
// Created: 2026-02-13
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pgx_processor::explanation::ExplanationService;
use pgx_processor::output::{write_report, write_report_file, OutputFormat};
use pgx_processor::processor::PharmacogenomicProcessor;
use pgx_processor::reference_tables::DRUG_GENES;
use pgx_processor::validator::InputValidator;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "PGX_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a VCF for one drug
    Analyze {
        /// Annotated VCF (plain text or gzip)
        #[arg(short, long)]
        vcf: PathBuf,

        /// Drug name (case-insensitive)
        #[arg(short, long)]
        drug: String,

        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the LLM and use the rule-based explanation
        #[arg(long)]
        no_llm: bool,
    },

    /// List supported drugs and their primary genes
    Drugs,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pgx_processor=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed args
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_json);

    match args.command {
        Command::Drugs => {
            for (drug, gene) in DRUG_GENES {
                println!("{}\t{}", drug, gene);
            }
            Ok(())
        }
        Command::Analyze {
            vcf,
            drug,
            format,
            output,
            no_llm,
        } => {
            info!("Pharmacogenomic Processor starting...");

            let explanations = if no_llm {
                ExplanationService::rule_based("LLM explanation disabled (--no-llm)")
            } else {
                ExplanationService::from_env()
            };
            info!("Explainer: {}", explanations.primary_name());

            let bytes = std::fs::read(&vcf)
                .with_context(|| format!("Failed to read VCF file {:?}", vcf))?;

            let processor = PharmacogenomicProcessor::new(InputValidator::new(), explanations);
            let report = match processor.analyze(&bytes, &drug).await {
                Ok(report) => report,
                Err(e) => {
                    warn!("Analysis failed: {:#}", e);
                    return Err(e);
                }
            };

            match output {
                Some(path) => {
                    let path = write_report_file(&report, format, &path)?;
                    info!("Report written to {:?}", path);
                }
                None => write_report(&report, format, std::io::stdout().lock())?,
            }

            Ok(())
        }
    }
}
