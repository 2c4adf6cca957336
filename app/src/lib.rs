// ==============================================================================
// lib.rs - Pharmacogenomic Processor Library
// ==============================================================================
// Description: Library interface for the drug-risk inference pipeline
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod genotype;
pub mod models;
pub mod reference_tables;
pub mod diplotype;
pub mod phenotype;
pub mod confidence;
pub mod risk;
pub mod explanation;
pub mod validator;
pub mod audit;
pub mod processor;
pub mod output;
