// ==============================================================================
// validator.rs - Input Validation
// ==============================================================================
// Description: Validates uploaded VCF bytes and drug names before analysis
// Author: Matt Barham
// Created: 2026-02-12
// Modified: 2026-02-16
// Version: 1.0.0
// Security: Size-capped before and after decompression, magic number check
// ==============================================================================

use flate2::read::GzDecoder;
use sha2::{Digest, Sha256};
use std::io::Read;
use thiserror::Error;
use tracing::{debug, info};

use crate::parsers::vcf::{
    normalize_line_endings, FILE_FORMAT_MARKER, FILE_FORMAT_WINDOW, HEADER_MARKER,
};
use crate::reference_tables::{primary_gene, supported_drugs};
use crate::risk::normalize_drug;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5 MB

/// Number of leading lines searched for the #CHROM row
pub const HEADER_LINE_WINDOW: usize = 50;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("File is empty")]
    Empty,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Not a valid VCF file (missing ##fileformat header)")]
    MissingFileFormat,

    #[error("Missing #CHROM header line")]
    MissingHeader,

    #[error("Drug '{drug}' not supported. Supported: {}", .supported.join(", "))]
    UnsupportedDrug {
        drug: String,
        supported: Vec<&'static str>,
    },

    #[error("Failed to decompress gzip input: {0}")]
    Decompress(#[from] std::io::Error),
}

/// Drug name after normalization and panel lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDrug {
    pub name: String,
    pub gene: &'static str,
}

/// Decoded VCF text ready for the parser
#[derive(Debug)]
pub struct ValidatedInput {
    pub content: String,

    /// Size of the bytes as received
    pub size: usize,

    pub compressed: bool,

    /// SHA-256 of the bytes as received
    pub hash_sha256: String,

    pub validated_at: chrono::DateTime<chrono::Utc>,
}

pub struct InputValidator {
    max_file_size: usize,
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_size(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Check size, decompress gzip input, decode, and verify VCF markers
    pub fn validate_upload(&self, bytes: &[u8]) -> Result<ValidatedInput, InputError> {
        info!("Validating upload: {} bytes", bytes.len());

        // 1. Size check
        self.check_size(bytes.len())?;

        // 2. Magic number: gzip input is inflated under the same cap
        let compressed = is_gzip(bytes);
        let raw = if compressed {
            let inflated = self.decompress(bytes)?;
            debug!("Decompressed gzip input to {} bytes", inflated.len());
            std::borrow::Cow::Owned(inflated)
        } else {
            std::borrow::Cow::Borrowed(bytes)
        };

        // 3. Decode
        let content = decode_content(&raw);

        // 4. Format markers
        validate_vcf_content(&content)?;
        debug!("Content validation passed");

        // 5. Fingerprint
        let hash = sha256_hex(bytes);
        debug!("SHA-256: {}", hash);

        Ok(ValidatedInput {
            content,
            size: bytes.len(),
            compressed,
            hash_sha256: hash,
            validated_at: chrono::Utc::now(),
        })
    }

    fn check_size(&self, size: usize) -> Result<(), InputError> {
        if size > self.max_file_size {
            return Err(InputError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>, InputError> {
        let mut inflated = Vec::new();
        GzDecoder::new(bytes)
            .take(self.max_file_size as u64 + 1)
            .read_to_end(&mut inflated)?;
        self.check_size(inflated.len())?;
        Ok(inflated)
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// UTF-8, falling back to Latin-1 (every byte maps to the same code point)
pub fn decode_content(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Input is not UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Cheap structural check run before the full parse
pub fn validate_vcf_content(content: &str) -> Result<(), InputError> {
    if content.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let window: String = content.chars().take(FILE_FORMAT_WINDOW).collect();
    if !window.contains(FILE_FORMAT_MARKER) {
        return Err(InputError::MissingFileFormat);
    }

    // CR-only files would otherwise read as a single line
    let has_header = normalize_line_endings(content)
        .lines()
        .take(HEADER_LINE_WINDOW)
        .any(|line| line.starts_with(HEADER_MARKER));
    if !has_header {
        return Err(InputError::MissingHeader);
    }

    Ok(())
}

/// Normalize a drug name and resolve its primary gene
pub fn validate_drug(drug: &str) -> Result<ValidatedDrug, InputError> {
    let name = normalize_drug(drug);
    match primary_gene(&name) {
        Some(gene) => Ok(ValidatedDrug { name, gene }),
        None => Err(InputError::UnsupportedDrug {
            drug: drug.to_string(),
            supported: supported_drugs(),
        }),
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
