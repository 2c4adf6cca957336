// ==============================================================================
// genotype.rs - VCF Genotype Field Handling
// ==============================================================================
// Description: Parses GT strings and counts alternate alleles for zygosity
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-12
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   GT uses "/" (unphased) or "|" (phased) between allele slots, "." for an
//   uncalled slot. The alternate-allele marker is "1":
//   - 0/0 → 0 (homozygous reference)
//   - 0/1, 1|0 → 1 (heterozygous)
//   - 1/1 → 2 (homozygous alternate)
//   - ./. → uncalled, no record emitted
// ==============================================================================

use thiserror::Error;

/// Allele index that marks the alternate allele when counting zygosity
pub const ALT_ALLELE_MARKER: &str = "1";

/// Marker for an uncalled allele slot
pub const UNCALLED_MARKER: &str = ".";

/// Errors that can occur while reading a GT field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenotypeError {
    #[error("Invalid genotype format: '{0}' (allele slots must be indices or '.')")]
    InvalidFormat(String),
}

/// Replace the phased separator with the unphased one
///
/// # Examples
/// ```
/// use pgx_processor::genotype::normalize_separator;
///
/// assert_eq!(normalize_separator("0|1"), "0/1");
/// assert_eq!(normalize_separator("1/1"), "1/1");
/// ```
pub fn normalize_separator(genotype: &str) -> String {
    genotype.replace('|', "/")
}

/// Split a GT string into its allele slots
pub fn allele_slots(genotype: &str) -> Vec<&str> {
    genotype.split(['/', '|']).collect()
}

pub fn is_phased(genotype: &str) -> bool {
    genotype.contains('|')
}

/// True when every allele slot is uncalled (or the field is empty)
pub fn is_uncalled(genotype: &str) -> bool {
    let genotype = genotype.trim();
    genotype.is_empty() || allele_slots(genotype).iter().all(|slot| *slot == UNCALLED_MARKER)
}

/// Check that every slot is an allele index or "."
pub fn validate(genotype: &str) -> Result<(), GenotypeError> {
    let well_formed = allele_slots(genotype).iter().all(|slot| {
        *slot == UNCALLED_MARKER || (!slot.is_empty() && slot.bytes().all(|b| b.is_ascii_digit()))
    });

    if well_formed {
        Ok(())
    } else {
        Err(GenotypeError::InvalidFormat(genotype.to_string()))
    }
}

/// Count slots carrying the alternate-allele marker
///
/// # Examples
/// ```
/// use pgx_processor::genotype::alt_allele_count;
///
/// assert_eq!(alt_allele_count("0/0"), 0);
/// assert_eq!(alt_allele_count("0|1"), 1);
/// assert_eq!(alt_allele_count("1/1"), 2);
/// ```
pub fn alt_allele_count(genotype: &str) -> usize {
    normalize_separator(genotype)
        .split('/')
        .filter(|slot| *slot == ALT_ALLELE_MARKER)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zygosity_counts() {
        assert_eq!(alt_allele_count("0/0"), 0);
        assert_eq!(alt_allele_count("0/1"), 1);
        assert_eq!(alt_allele_count("1/0"), 1);
        assert_eq!(alt_allele_count("1|1"), 2);
    }

    #[test]
    fn test_second_alt_is_not_counted() {
        // Only index 1 marks the alternate allele
        assert_eq!(alt_allele_count("0/2"), 0);
        assert_eq!(alt_allele_count("1/2"), 1);
    }

    #[test]
    fn test_uncalled() {
        assert!(is_uncalled("./."));
        assert!(is_uncalled(".|."));
        assert!(is_uncalled("."));
        assert!(is_uncalled(""));

        // Half-calls are kept
        assert!(!is_uncalled("./1"));
        assert!(!is_uncalled("0/."));
    }

    #[test]
    fn test_phasing() {
        assert!(is_phased("0|1"));
        assert!(!is_phased("0/1"));
        assert_eq!(normalize_separator("1|0"), "1/0");
    }

    #[test]
    fn test_validate() {
        assert!(validate("0/1").is_ok());
        assert!(validate("./.").is_ok());
        assert!(validate("10|2").is_ok());

        assert_eq!(
            validate("A/G"),
            Err(GenotypeError::InvalidFormat("A/G".to_string()))
        );
        assert!(validate("0//1").is_err());
    }
}
