/// Coefficient Extractor - pulls polynomial coefficients out of Horner blocks
///
/// This library scans source text for polynomial evaluation blocks
/// (`result := add( ... )`), collects the hexadecimal literals in each block,
/// reverses them into Horner order and renders a `U256` constant array.

// Re-export core modules
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::Settings;
pub use crate::core::blocks::ScanStrategy;
pub use crate::core::extractor::{CoefficientExtractor, CoefficientSequence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract the coefficient sequence from a file
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `file_path` - Path to the source file
/// * `settings` - Extraction settings
///
/// # Returns
///
/// The coefficients of every block, in output order
pub fn extract_file<P: AsRef<std::path::Path>>(
    file_path: P,
    settings: &Settings,
) -> anyhow::Result<CoefficientSequence> {
    app::extract_file(file_path.as_ref(), settings)
}

/// Command-line application functionality
pub mod app {
    use anyhow::Context;
    use std::path::Path;

    use crate::config::Settings;
    use crate::core::extractor::{CoefficientExtractor, CoefficientSequence};
    use crate::utils::file_utils::read_source;
    use crate::utils::output_formatter::format_output;

    /// Read `file_path` and extract its coefficients.
    ///
    /// Settings are validated before the file is opened.
    pub fn extract_file(file_path: &Path, settings: &Settings) -> anyhow::Result<CoefficientSequence> {
        let extractor = CoefficientExtractor::new(settings.clone())?;
        let source = read_source(file_path)?;
        let sequence = extractor
            .extract(&source)
            .with_context(|| format!("Failed to extract coefficients from {}", file_path.display()))?;
        Ok(sequence)
    }

    /// Extract and render in one step.
    ///
    /// Nothing is returned unless extraction succeeded, so callers never
    /// print a partial declaration.
    pub fn render_file(
        file_path: &Path,
        settings: &Settings,
        use_markdown: bool,
    ) -> anyhow::Result<(CoefficientSequence, String)> {
        let sequence = extract_file(file_path, settings)?;
        let output = format_output(&sequence, settings, use_markdown);
        Ok((sequence, output))
    }
}
