/// Pattern definitions for the coefficient extractor
///
/// This module contains the regex patterns used to locate polynomial blocks
/// and the hexadecimal literals inside them.

use lazy_static::lazy_static;
use regex::Regex;

/// Start marker of a Horner evaluation block
pub const DEFAULT_BLOCK_PREFIX: &str = "result := add(";

/// Hexadecimal literal, kept verbatim
pub const HEX_TOKEN_PATTERN: &str = r"0x[0-9a-fA-F]+";

/// A line holding only a closing parenthesis (after optional indentation)
pub const CLOSING_LINE_PATTERN: &str = r"\n\s*\)";

/// Plain identifier, used for the constant name and element type
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

lazy_static! {
    /// Precompiled hex token pattern
    pub static ref HEX_TOKEN: Regex = Regex::new(HEX_TOKEN_PATTERN)
        .unwrap_or_else(|e| panic!("invalid hex token pattern: {}", e));

    /// Precompiled closing line pattern
    pub static ref CLOSING_LINE: Regex = Regex::new(CLOSING_LINE_PATTERN)
        .unwrap_or_else(|e| panic!("invalid closing line pattern: {}", e));

    static ref IDENTIFIER: Regex = Regex::new(IDENTIFIER_PATTERN)
        .unwrap_or_else(|e| panic!("invalid identifier pattern: {}", e));
}

/// Helper function to compile pattern
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Error compiling pattern: {}", e);
            None
        }
    }
}

/// Build the non-greedy block pattern for a literal prefix.
///
/// The prefix is escaped, so any text is accepted. Capture group 1 is the
/// block body: everything up to the first line that starts with `)`.
pub fn block_pattern(prefix: &str) -> Option<Regex> {
    compile_pattern(&format!(
        r"{}([\s\S]*?){}",
        regex::escape(prefix),
        CLOSING_LINE_PATTERN
    ))
}

/// All hex literals in `text`, left to right
pub fn find_hex_tokens(text: &str) -> Vec<&str> {
    HEX_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Check if a string is a plain identifier
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}
