// ==============================================================================
// parsers/vcf.rs - Pharmacogene VCF Variant Extractor
// ==============================================================================
// Description: Extracts annotated pharmacogene calls from VCF text
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-16
// Version: 1.0.0
// ==============================================================================
// References:
// - VCF 4.2 Spec: https://samtools.github.io/hts-specs/VCFv4.2.pdf
// - noodles-vcf: https://docs.rs/noodles-vcf/0.81.0/noodles_vcf/
// ==============================================================================
// Expected INFO annotations:
//   GENE     gene symbol (rows outside the target panel are dropped)
//   STAR     star-allele hint
//   CLINSIG  clinical significance tier
//   AF       allele frequency
//   DP       read depth
// ==============================================================================

use noodles_vcf as vcf;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::genotype::{self, GenotypeError};
use crate::models::{
    VariantRecord, DEFAULT_CLINICAL_SIGNIFICANCE, DEFAULT_FILTER, MISSING_RSID,
};
use crate::reference_tables::is_target_gene;

/// Marker that must appear near the top of every VCF
pub const FILE_FORMAT_MARKER: &str = "##fileformat=VCF";

/// Number of leading characters searched for [`FILE_FORMAT_MARKER`]
pub const FILE_FORMAT_WINDOW: usize = 500;

/// Column header row prefix
pub const HEADER_MARKER: &str = "#CHROM";

/// CHROM POS ID REF ALT QUAL FILTER INFO
const FIXED_COLUMNS: usize = 8;

/// Structural problems found while reading the VCF body or header
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Malformed header: {0}")]
    Header(String),

    #[error("Expected {expected} tab-delimited columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Invalid position value: {0}")]
    InvalidPosition(String),

    #[error("Invalid QUAL value: {0}")]
    InvalidQuality(String),

    #[error(transparent)]
    Genotype(#[from] GenotypeError),
}

/// VCF parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VCFParseError {
    #[error("Invalid VCF format: {0}")]
    InvalidFormat(String),

    #[error("VCF file has no sample data")]
    NoSampleData,

    #[error("VCF parsing failed at line {line}: {source}")]
    ParsingFailed {
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Extracts pharmacogene variant calls from decoded VCF text
///
/// Parsing is all-or-nothing: any structural anomaly aborts the whole file
/// and no partial record list is returned.
#[derive(Debug, Clone, Default)]
pub struct VCFParser;

impl VCFParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse VCF text and return one record per (kept row, called sample)
    ///
    /// # Returns
    /// * `Ok(Vec<VariantRecord>)` - Records in row order, then sample order
    /// * `Err(VCFParseError::InvalidFormat)` - Missing fileformat or #CHROM line
    /// * `Err(VCFParseError::NoSampleData)` - Header declares no samples
    /// * `Err(VCFParseError::ParsingFailed)` - Any other structural problem
    ///
    /// # Example
    /// ```
    /// use pgx_processor::parsers::VCFParser;
    ///
    /// let text = "##fileformat=VCFv4.2\n\
    ///     ###FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
    ///     #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
    ///     10\t94942290\trs1057910\tA\tC\t99\tPASS\tGENE=CYP2C9\tGT\t1/1\n";
    ///
    /// let records = VCFParser::new().parse_str(text).unwrap();
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].gene, "CYP2C9");
    /// ```
    pub fn parse_str(&self, content: &str) -> Result<Vec<VariantRecord>, VCFParseError> {
        let content = normalize_line_endings(content);

        let window: String = content.chars().take(FILE_FORMAT_WINDOW).collect();
        if !window.contains(FILE_FORMAT_MARKER) {
            return Err(VCFParseError::InvalidFormat(
                "missing ##fileformat header".to_string(),
            ));
        }

        let lines: Vec<(usize, &str)> = content
            .split('\n')
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .collect();

        let header_idx = lines
            .iter()
            .position(|(_, line)| line.starts_with(HEADER_MARKER))
            .ok_or_else(|| VCFParseError::InvalidFormat("missing #CHROM header line".to_string()))?;

        let (header_line_number, _) = lines[header_idx];
        let samples = read_sample_names(&lines[..=header_idx], header_line_number)?;
        if samples.is_empty() {
            return Err(VCFParseError::NoSampleData);
        }

        let mut records = Vec::new();
        let mut off_target_rows = 0usize;
        let mut uncalled = 0usize;
        let mut stray_comments = 0usize;

        for &(line_number, line) in &lines[header_idx + 1..] {
            // Meta lines after #CHROM are a known exporter bug; drop them
            if line.starts_with("##") {
                stray_comments += 1;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let row = parse_row(line, samples.len())
                .map_err(|source| VCFParseError::ParsingFailed { line: line_number, source })?;

            let gene = match row.info.first_value("GENE") {
                Some(gene) if is_target_gene(gene) => gene.to_string(),
                _ => {
                    off_target_rows += 1;
                    continue;
                }
            };

            for (sample, value) in samples.iter().zip(&row.sample_values) {
                let Some(gt) = row.genotype(value) else {
                    uncalled += 1;
                    continue;
                };
                if genotype::is_uncalled(gt) {
                    uncalled += 1;
                    continue;
                }
                genotype::validate(gt).map_err(|e| VCFParseError::ParsingFailed {
                    line: line_number,
                    source: e.into(),
                })?;

                records.push(row.to_record(&gene, gt, sample));
            }
        }

        debug!(
            off_target_rows,
            uncalled, stray_comments, "VCF rows skipped during extraction"
        );
        info!(
            "Extracted {} pharmacogene calls across {} sample(s)",
            records.len(),
            samples.len()
        );

        Ok(records)
    }
}

/// Collapse CRLF and bare CR line endings to LF
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse the meta block and #CHROM line with noodles and return sample names
fn read_sample_names(
    header_lines: &[(usize, &str)],
    header_line_number: usize,
) -> Result<Vec<String>, VCFParseError> {
    // noodles wants ##fileformat first; the marker may sit anywhere in the
    // leading window, so hoist it
    let (format_lines, meta_lines): (Vec<&str>, Vec<&str>) = header_lines
        .iter()
        .map(|(_, line)| *line)
        .filter(|line| !line.trim().is_empty())
        .partition(|line| line.starts_with(FILE_FORMAT_MARKER));

    let mut raw = String::new();
    for line in format_lines.iter().take(1).chain(&meta_lines) {
        raw.push_str(line);
        raw.push('\n');
    }

    let header: vcf::Header = raw.parse().map_err(|e| VCFParseError::ParsingFailed {
        line: header_line_number,
        source: RecordError::Header(format!("{}", e)),
    })?;

    Ok(header.sample_names().iter().cloned().collect())
}

/// Semicolon-delimited INFO column
#[derive(Debug, Default)]
struct InfoField<'a> {
    values: HashMap<&'a str, Option<&'a str>>,
}

impl<'a> InfoField<'a> {
    fn parse(raw: &'a str) -> Self {
        let mut values = HashMap::new();
        if raw == "." {
            return Self { values };
        }
        for entry in raw.split(';').filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((key, value)) => values.insert(key, Some(value)),
                None => values.insert(entry, None),
            };
        }
        Self { values }
    }

    /// First element of a (possibly comma-separated) value, trimmed
    fn first_value(&self, key: &str) -> Option<&'a str> {
        let raw = (*self.values.get(key)?)?;
        let first = raw.split(',').next()?.trim();
        if first.is_empty() || first == "." {
            None
        } else {
            Some(first)
        }
    }

    fn float_or(&self, key: &str, default: f64) -> f64 {
        self.first_value(key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    }

    fn int_or(&self, key: &str, default: u32) -> u32 {
        self.first_value(key)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
    }
}

/// One data line split into its columns
#[derive(Debug)]
struct VcfRow<'a> {
    chromosome: &'a str,
    position: u64,
    id: &'a str,
    ref_allele: &'a str,
    alt_allele: &'a str,
    quality: Option<f64>,
    filter: String,
    info: InfoField<'a>,
    gt_index: Option<usize>,
    sample_values: Vec<&'a str>,
}

fn parse_row(line: &str, sample_count: usize) -> Result<VcfRow<'_>, RecordError> {
    let fields: Vec<&str> = line.split('\t').collect();

    // FORMAT column plus one column per declared sample
    let expected = FIXED_COLUMNS + 1 + sample_count;
    if fields.len() != expected {
        return Err(RecordError::ColumnCount { expected, found: fields.len() });
    }

    let position = fields[1]
        .trim()
        .parse::<u64>()
        .map_err(|_| RecordError::InvalidPosition(fields[1].to_string()))?;

    let quality = match fields[5].trim() {
        "." | "" => None,
        raw => Some(
            raw.parse::<f64>()
                .map_err(|_| RecordError::InvalidQuality(raw.to_string()))?,
        ),
    };

    let filter = match fields[6].trim() {
        "" | "." | "PASS" => DEFAULT_FILTER.to_string(),
        raw => raw.split(';').collect::<Vec<_>>().join(","),
    };

    let alt_allele = match fields[4] {
        "." => "",
        alt => alt,
    };

    let gt_index = fields[8].split(':').position(|key| key == "GT");

    Ok(VcfRow {
        chromosome: fields[0],
        position,
        id: fields[2],
        ref_allele: fields[3],
        alt_allele,
        quality,
        filter,
        info: InfoField::parse(fields[7]),
        gt_index,
        sample_values: fields[FIXED_COLUMNS + 1..].to_vec(),
    })
}

impl<'a> VcfRow<'a> {
    /// GT value of one sample column, if FORMAT declares GT and the sample has it
    fn genotype<'s>(&self, sample_value: &'s str) -> Option<&'s str> {
        let idx = self.gt_index?;
        sample_value.split(':').nth(idx)
    }

    fn to_record(&self, gene: &str, gt: &str, sample: &str) -> VariantRecord {
        let rsid = match self.id {
            "" | "." => MISSING_RSID.to_string(),
            id => id.to_string(),
        };

        VariantRecord {
            rsid,
            gene: gene.to_string(),
            chromosome: self.chromosome.to_string(),
            position: self.position,
            ref_allele: self.ref_allele.to_string(),
            alt_allele: self.alt_allele.to_string(),
            quality: self.quality,
            filter: self.filter.clone(),
            genotype: gt.to_string(),
            phased: genotype::is_phased(gt),
            star_allele: self.info.first_value("STAR").map(str::to_string),
            clinical_significance: self
                .info
                .first_value("CLINSIG")
                .unwrap_or(DEFAULT_CLINICAL_SIGNIFICANCE)
                .to_string(),
            allele_freq: self.info.float_or("AF", 0.0),
            depth: self.info.int_or("DP", 0),
            sample: sample.to_string(),
        }
    }
}
