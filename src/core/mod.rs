/// Core module for coefficient extraction
///
/// This module contains the block scanner, the patterns it relies on, and the
/// extractor that builds the coefficient sequence.

pub mod blocks;
pub mod extractor;
pub mod patterns;
