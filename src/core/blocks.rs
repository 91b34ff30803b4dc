/// Block discovery
///
/// A block starts at a fixed prefix such as `result := add(` and ends at its
/// closing parenthesis. Two ways of finding that end are supported:
///
/// * `Balanced` walks the text counting `(` and `)` and closes the block when
///   the depth opened by the prefix returns to zero.
/// * `Heuristic` takes the shortest run up to the next line that starts with
///   `)`. This reproduces the legacy regex behaviour byte for byte.
///
/// Both closings are computed for every block. When they disagree the block
/// is marked ambiguous so callers can warn or refuse it. A heuristic prefix
/// that does not end with `(` has no depth to count and is never ambiguous.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::patterns::{block_pattern, CLOSING_LINE};

/// How the end of a block is located
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Explicit parenthesis depth counter
    #[default]
    Balanced,
    /// Non-greedy match up to the next closing line
    Heuristic,
}

impl std::fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStrategy::Balanced => write!(f, "balanced"),
            ScanStrategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// A block found in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Byte offset of the prefix
    pub start: usize,
    /// 1-based line of the prefix
    pub line: usize,
    /// Text between the prefix and the closing parenthesis
    pub body: &'a str,
    /// The two closing rules disagree on where this block ends
    pub ambiguous: bool,
}

/// Outcome of scanning one source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockScan<'a> {
    /// Blocks in source order
    pub blocks: Vec<Block<'a>>,
    /// Line of a prefix whose parenthesis never closes (balanced only)
    pub unterminated: Option<usize>,
}

/// Scan `text` for blocks opened by `prefix`.
///
/// `Balanced` expects the prefix to end with `(`; that paren opens depth 1.
pub fn scan_blocks<'a>(text: &'a str, prefix: &str, strategy: ScanStrategy) -> BlockScan<'a> {
    let scan = match strategy {
        ScanStrategy::Balanced => scan_balanced(text, prefix),
        ScanStrategy::Heuristic => scan_heuristic(text, prefix),
    };
    debug!(
        "{} scan found {} block(s) for prefix {:?}",
        strategy,
        scan.blocks.len(),
        prefix
    );
    scan
}

fn scan_balanced<'a>(text: &'a str, prefix: &str) -> BlockScan<'a> {
    let mut scan = BlockScan::default();
    if prefix.is_empty() {
        return scan;
    }

    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(prefix) {
        let start = cursor + found;
        let body_start = start + prefix.len();

        match balanced_close(text, body_start) {
            Some(close) => {
                scan.blocks.push(Block {
                    start,
                    line: line_at(text, start),
                    body: &text[body_start..close],
                    ambiguous: heuristic_close(text, body_start) != Some(close),
                });
                cursor = close + 1;
            }
            None => {
                // Everything after an unclosed paren is inside it, so no later
                // block can close either.
                scan.unterminated = Some(line_at(text, start));
                break;
            }
        }
    }

    scan
}

fn scan_heuristic<'a>(text: &'a str, prefix: &str) -> BlockScan<'a> {
    let mut scan = BlockScan::default();
    if prefix.is_empty() {
        return scan;
    }
    let Some(pattern) = block_pattern(prefix) else {
        return scan;
    };
    // Depth counting only means something when the prefix opens the paren.
    let opens_paren = prefix.ends_with('(');

    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // The match always ends on the closing paren.
        let close = whole.end() - 1;
        scan.blocks.push(Block {
            start: whole.start(),
            line: line_at(text, whole.start()),
            body: body.as_str(),
            ambiguous: opens_paren && balanced_close(text, body.start()) != Some(close),
        });
    }

    scan
}

/// Offset of the `)` that brings the depth opened before `body_start` back to 0
fn balanced_close(text: &str, body_start: usize) -> Option<usize> {
    let mut depth: usize = 1;
    for (offset, byte) in text.as_bytes()[body_start..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(body_start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Offset of the `)` ending the first closing line at or after `body_start`
fn heuristic_close(text: &str, body_start: usize) -> Option<usize> {
    CLOSING_LINE.find_at(text, body_start).map(|m| m.end() - 1)
}

/// 1-based line number of a byte offset
pub fn line_at(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}
