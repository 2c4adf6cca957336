// ==============================================================================
// diplotype.rs - Star-Allele Diplotype Resolution
// ==============================================================================
// Description: Reduces a gene's variant calls to a two-allele diplotype
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-02-12
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   For each call at a recognized rsID (input order):
//   - 1/1 → push star allele twice
//   - 0/1 → push star allele once
//   - 0/0 → push nothing (call is still "matched")
//   Left-pad with *1 to two alleles, keep the first two, join with "/".
//   A gene with zero calls resolves to NoData, never to *1/*1.
// ==============================================================================

use tracing::debug;

use crate::genotype::alt_allele_count;
use crate::models::{Diplotype, DiplotypeResult, VariantRecord};
use crate::reference_tables::{star_alleles, WILD_TYPE_ALLELE};

/// Resolve the diplotype for `gene` from the full variant list
pub fn resolve_diplotype(variants: &[VariantRecord], gene: &str) -> DiplotypeResult {
    let gene_variants: Vec<&VariantRecord> = variants.iter().filter(|v| v.gene == gene).collect();

    if gene_variants.is_empty() {
        debug!(gene, "No variant records for gene");
        return DiplotypeResult::NoData;
    }

    let allele_table = star_alleles(gene);
    let mut alleles: Vec<&str> = Vec::with_capacity(2);
    let mut matched_variants = Vec::new();

    for variant in &gene_variants {
        let Some(star) = allele_table.and_then(|table| table.get(variant.rsid.as_str())) else {
            continue;
        };

        match alt_allele_count(&variant.genotype) {
            2 => alleles.extend([*star, *star]),
            1 => alleles.push(*star),
            _ => {}
        }

        matched_variants.push((*variant).clone());
    }

    while alleles.len() < 2 {
        alleles.insert(0, WILD_TYPE_ALLELE);
    }
    alleles.truncate(2);

    let star_alleles = [alleles[0].to_string(), alleles[1].to_string()];
    let label = format!("{}/{}", star_alleles[0], star_alleles[1]);

    debug!(
        gene,
        diplotype = %label,
        matched = matched_variants.len(),
        total = gene_variants.len(),
        "Resolved diplotype"
    );

    DiplotypeResult::Resolved(Diplotype {
        label,
        star_alleles,
        matched_variants,
        total_variants: gene_variants.len(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal PASS call for tests across the crate
    pub(crate) fn call(gene: &str, rsid: &str, genotype: &str) -> VariantRecord {
        VariantRecord {
            rsid: rsid.to_string(),
            gene: gene.to_string(),
            chromosome: "10".to_string(),
            position: 94942290,
            ref_allele: "A".to_string(),
            alt_allele: "C".to_string(),
            quality: Some(60.0),
            filter: "PASS".to_string(),
            genotype: genotype.to_string(),
            phased: genotype.contains('|'),
            star_allele: None,
            clinical_significance: "Unknown".to_string(),
            allele_freq: 0.0,
            depth: 0,
            sample: "S1".to_string(),
        }
    }

    fn resolved(result: DiplotypeResult) -> Diplotype {
        match result {
            DiplotypeResult::Resolved(d) => d,
            DiplotypeResult::NoData => panic!("expected a resolved diplotype"),
        }
    }

    #[test]
    fn test_no_records_is_no_data() {
        assert_eq!(resolve_diplotype(&[], "CYP2C9"), DiplotypeResult::NoData);

        // Records for other genes do not count
        let variants = vec![call("CYP2D6", "rs3892097", "1/1")];
        assert_eq!(resolve_diplotype(&variants, "CYP2C9"), DiplotypeResult::NoData);
    }

    #[test]
    fn test_unrecognized_rsids_resolve_to_wild_type() {
        let variants = vec![
            call("CYP2C9", "rs0000001", "1/1"),
            call("CYP2C9", ".", "0/1"),
        ];

        let d = resolved(resolve_diplotype(&variants, "CYP2C9"));
        assert_eq!(d.label, "*1/*1");
        assert!(d.matched_variants.is_empty());
        assert_eq!(d.total_variants, 2);
    }

    #[test]
    fn test_heterozygous_and_homozygous_example() {
        // *2 het then *3 hom → [*2, *3, *3] → [*2, *3]
        let variants = vec![
            call("CYP2C9", "rs1799853", "0/1"),
            call("CYP2C9", "rs1057910", "1/1"),
        ];

        let d = resolved(resolve_diplotype(&variants, "CYP2C9"));
        assert_eq!(d.star_alleles, ["*2".to_string(), "*3".to_string()]);
        assert_eq!(d.label, "*2/*3");
        assert_eq!(d.matched_variants.len(), 2);
        assert_eq!(d.total_variants, 2);
    }

    #[test]
    fn test_homozygous_alternate_contributes_two_copies() {
        let variants = vec![call("CYP2C19", "rs4244285", "1|1")];
        let d = resolved(resolve_diplotype(&variants, "CYP2C19"));
        assert_eq!(d.label, "*2/*2");
    }

    #[test]
    fn test_heterozygous_is_padded_on_the_left() {
        let variants = vec![call("CYP2D6", "rs3892097", "1|0")];
        let d = resolved(resolve_diplotype(&variants, "CYP2D6"));
        assert_eq!(d.label, "*1/*4");
    }

    #[test]
    fn test_homozygous_reference_is_matched_without_allele() {
        let variants = vec![
            call("TPMT", "rs1800460", "0/0"),
            call("TPMT", "rs9999999", "0/1"),
        ];

        let d = resolved(resolve_diplotype(&variants, "TPMT"));
        assert_eq!(d.label, "*1/*1");
        assert_eq!(d.matched_variants.len(), 1);
        assert_eq!(d.matched_variants[0].rsid, "rs1800460");
        assert_eq!(d.total_variants, 2);
    }

    #[test]
    fn test_label_keeps_encounter_order() {
        // Not canonicalized: *3 seen first stays first
        let variants = vec![
            call("CYP2C9", "rs1057910", "0/1"),
            call("CYP2C9", "rs1799853", "0/1"),
        ];
        let d = resolved(resolve_diplotype(&variants, "CYP2C9"));
        assert_eq!(d.label, "*3/*2");
    }

    #[test]
    fn test_always_two_alleles() {
        let variants = vec![
            call("CYP2D6", "rs3892097", "1/1"),
            call("CYP2D6", "rs16947", "1/1"),
            call("CYP2D6", "rs1135840", "0/1"),
        ];
        let d = resolved(resolve_diplotype(&variants, "CYP2D6"));
        assert_eq!(d.star_alleles.len(), 2);
        assert_eq!(d.label, "*4/*4");
        assert_eq!(d.matched_variants.len(), 3);
    }
}
