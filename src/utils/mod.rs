/// Utility modules for the coefficient extractor
///
/// This module contains helpers for reading the input file and formatting
/// the output.

pub mod file_utils;
pub mod output_formatter;
