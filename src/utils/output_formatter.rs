/// Output formatter for extraction results
///
/// This module renders the coefficient sequence as a Rust constant
/// declaration and exports the JSON report.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Settings;
use crate::core::blocks::ScanStrategy;
use crate::core::extractor::{BlockSummary, CoefficientSequence};

/// Render the constant declaration.
///
/// ```text
/// const COEFFS: [U256; 2] = [
///     uint!(0x2_U256),
///     uint!(0x1_U256),
/// ];
/// // COEFFS LEN: 2;
/// ```
pub fn render_declaration<'a, I>(coefficients: I, const_name: &str, element_type: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut body = String::new();
    let mut count = 0usize;
    for coefficient in coefficients {
        body.push_str(&format!("    uint!({}_{}),\n", coefficient, element_type));
        count += 1;
    }

    let mut output = format!("const {}: [{}; {}] = [\n", const_name, element_type, count);
    output.push_str(&body);
    output.push_str("];\n");
    output.push_str(&format!("// {} LEN: {};\n", const_name, count));
    output
}

/// Format the final output, optionally wrapped in a markdown code fence
pub fn format_output(sequence: &CoefficientSequence, settings: &Settings, use_markdown: bool) -> String {
    let declaration = render_declaration(sequence.iter(), &settings.const_name, &settings.element_type);
    if use_markdown {
        format!("```\n{}```\n", declaration)
    } else {
        declaration
    }
}

#[derive(Serialize)]
struct Report<'a> {
    source: String,
    strategy: ScanStrategy,
    total: usize,
    coefficients: &'a [String],
    blocks: &'a [BlockSummary],
}

/// Export the sequence and its per-block breakdown to a JSON file
pub fn export_report_json(
    sequence: &CoefficientSequence,
    source: &Path,
    strategy: ScanStrategy,
    output_path: &Path,
) -> Result<()> {
    let report = Report {
        source: source.to_string_lossy().to_string(),
        strategy,
        total: sequence.len(),
        coefficients: &sequence.coefficients,
        blocks: &sequence.blocks,
    };

    let file = File::create(output_path)
        .context(format!("Failed to create JSON output file: {}", output_path.display()))?;

    serde_json::to_writer_pretty(file, &report)
        .context("Failed to write JSON data")?;

    Ok(())
}
