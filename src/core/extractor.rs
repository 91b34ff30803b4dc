/// Coefficient extraction
///
/// Turns source text into the flat coefficient sequence: hex literals are
/// collected per block, reversed into Horner order, and concatenated in the
/// order the blocks appear.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{ConfigError, Settings};
use crate::core::blocks::{scan_blocks, ScanStrategy};
use crate::core::patterns::find_hex_tokens;

/// Blocks that strict mode refuses
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("block at line {line} has a closing line before its matching parenthesis")]
    AmbiguousBlock { line: usize },

    #[error("block at line {line} is never closed")]
    UnterminatedBlock { line: usize },
}

/// What one block contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    /// 1-based line of the block prefix
    pub line: usize,
    /// Tokens in output order (already reversed)
    pub tokens: Vec<String>,
    pub ambiguous: bool,
}

/// Ordered coefficients of every block, ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoefficientSequence {
    pub coefficients: Vec<String>,
    pub blocks: Vec<BlockSummary>,
}

impl CoefficientSequence {
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.coefficients.iter().map(String::as_str)
    }

    /// Lines of the blocks whose end is uncertain
    pub fn ambiguous_lines(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .filter(|block| block.ambiguous)
            .map(|block| block.line)
            .collect()
    }
}

/// Extracts coefficient sequences according to a set of [`Settings`]
#[derive(Debug, Clone)]
pub struct CoefficientExtractor {
    settings: Settings,
}

impl CoefficientExtractor {
    /// Create an extractor, rejecting invalid settings up front
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Extract the coefficient sequence from source text.
    ///
    /// Fails only in strict mode, on the first ambiguous or unterminated
    /// block. Otherwise those blocks are logged and the scan result is used
    /// as is.
    pub fn extract(&self, text: &str) -> Result<CoefficientSequence, ExtractError> {
        let scan = scan_blocks(text, &self.settings.block_prefix, self.settings.strategy);
        let mut sequence = CoefficientSequence::default();

        for block in &scan.blocks {
            if block.ambiguous {
                if self.settings.strict {
                    return Err(ExtractError::AmbiguousBlock { line: block.line });
                }
                warn!(
                    "Block at line {} has a closing line before its matching parenthesis; {} scan result kept",
                    block.line, self.settings.strategy
                );
            }

            let mut tokens: Vec<String> = find_hex_tokens(block.body)
                .into_iter()
                .map(str::to_string)
                .collect();
            tokens.reverse();
            debug!("Block at line {}: {} coefficient(s)", block.line, tokens.len());

            sequence.coefficients.extend(tokens.iter().cloned());
            sequence.blocks.push(BlockSummary {
                line: block.line,
                tokens,
                ambiguous: block.ambiguous,
            });
        }

        if let Some(line) = scan.unterminated {
            if self.settings.strict {
                return Err(ExtractError::UnterminatedBlock { line });
            }
            warn!("Block at line {} is never closed; ignoring the rest of the input", line);
        }

        info!(
            "Extracted {} coefficient(s) from {} block(s)",
            sequence.len(),
            sequence.blocks.len()
        );
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(strategy: ScanStrategy, strict: bool) -> CoefficientExtractor {
        CoefficientExtractor::new(Settings {
            strategy,
            strict,
            ..Settings::default()
        })
        .expect("valid settings")
    }

    #[test]
    fn reverses_each_block_and_keeps_block_order() {
        let text = "result := add(\n  0xA, 0xB\n)\nresult := add(\n  0xC, 0xD\n)\n";
        for strategy in [ScanStrategy::Balanced, ScanStrategy::Heuristic] {
            let sequence = extractor(strategy, false).extract(text).expect("extract");
            assert_eq!(sequence.coefficients, vec!["0xB", "0xA", "0xD", "0xC"]);
            assert_eq!(sequence.blocks.len(), 2);
            assert_eq!(sequence.blocks[1].line, 4);
        }
    }

    #[test]
    fn empty_block_contributes_nothing() {
        let text = "result := add(\n  x\n)\nresult := add(\n  0x7\n)\n";
        let sequence = extractor(ScanStrategy::Balanced, false)
            .extract(text)
            .expect("extract");
        assert_eq!(sequence.coefficients, vec!["0x7"]);
        assert!(sequence.blocks[0].tokens.is_empty());
    }

    #[test]
    fn strict_rejects_ambiguous_block() {
        let text = "  result := add(\n    0x1,\n    mulmod(x, add(\n      0x2\n    ), 0x3)\n  )\n";
        assert_eq!(
            extractor(ScanStrategy::Balanced, true).extract(text),
            Err(ExtractError::AmbiguousBlock { line: 1 })
        );

        let lenient = extractor(ScanStrategy::Balanced, false)
            .extract(text)
            .expect("extract");
        assert_eq!(lenient.coefficients, vec!["0x3", "0x2", "0x1"]);
        assert_eq!(lenient.ambiguous_lines(), vec![1]);

        let legacy = extractor(ScanStrategy::Heuristic, false)
            .extract(text)
            .expect("extract");
        assert_eq!(legacy.coefficients, vec!["0x2", "0x1"]);
    }

    #[test]
    fn strict_rejects_unterminated_block() {
        let text = "result := add(\n 0x1\n)\nresult := add(\n 0x2\n";
        assert_eq!(
            extractor(ScanStrategy::Balanced, true).extract(text),
            Err(ExtractError::UnterminatedBlock { line: 4 })
        );
        let lenient = extractor(ScanStrategy::Balanced, false)
            .extract(text)
            .expect("extract");
        assert_eq!(lenient.coefficients, vec!["0x1"]);
    }

    #[test]
    fn custom_prefix() {
        let settings = Settings {
            block_prefix: "res := addmod(".to_string(),
            ..Settings::default()
        };
        let sequence = CoefficientExtractor::new(settings)
            .expect("valid settings")
            .extract("result := add(\n 0x1\n)\nres := addmod(\n 0x2, 0x3\n)")
            .expect("extract");
        assert_eq!(sequence.coefficients, vec!["0x3", "0x2"]);
    }

    #[test]
    fn strict_heuristic_accepts_prefix_without_paren() {
        let settings = Settings {
            block_prefix: "result :=".to_string(),
            strategy: ScanStrategy::Heuristic,
            strict: true,
            ..Settings::default()
        };
        let sequence = CoefficientExtractor::new(settings)
            .expect("valid settings")
            .extract("result := add(\n 0x1 0x2\n)\n")
            .expect("well-formed block");
        assert_eq!(sequence.coefficients, vec!["0x2", "0x1"]);
        assert!(sequence.ambiguous_lines().is_empty());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings {
            element_type: "u256[]".to_string(),
            ..Settings::default()
        };
        assert!(CoefficientExtractor::new(settings).is_err());
    }
}
