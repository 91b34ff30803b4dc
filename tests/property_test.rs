use coeff_extractor::core::blocks::ScanStrategy;
use coeff_extractor::utils::output_formatter::render_declaration;
use coeff_extractor::{CoefficientExtractor, Settings};
use proptest::prelude::*;

fn extractor(strategy: ScanStrategy) -> CoefficientExtractor {
    CoefficientExtractor::new(Settings {
        strategy,
        ..Settings::default()
    })
    .expect("default settings are valid")
}

fn strategies() -> impl Strategy<Value = ScanStrategy> {
    prop_oneof![Just(ScanStrategy::Balanced), Just(ScanStrategy::Heuristic)]
}

/// Blocks of hex literals, each literal in random case
fn blocks() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec("0x[0-9a-fA-F]{1,64}", 0..8),
        0..6,
    )
}

/// One Horner block per entry, one literal per line, the way generated Yul looks
fn yul_source(blocks: &[Vec<String>]) -> String {
    let mut source = String::from("let PRIME := 0x800000000000011\n");
    for (i, tokens) in blocks.iter().enumerate() {
        source.push_str(&format!("function column_{}(x) -> result {{\n", i));
        source.push_str("    result := add(\n");
        for token in tokens {
            source.push_str(&format!("        mulmod(x, {}, PRIME),\n", token));
        }
        source.push_str("        x\n    )\n}\n");
    }
    source
}

/// Count stated in the header line, the number of entries, and the trailer count
fn declared_counts(output: &str) -> (String, usize, String) {
    let lines: Vec<&str> = output.lines().collect();
    let header = lines[0]
        .trim_start_matches("const COEFFS: [U256; ")
        .trim_end_matches("] = [")
        .to_string();
    let entries = lines.iter().filter(|l| l.starts_with("    uint!(")).count();
    let trailer = lines[lines.len() - 1]
        .trim_start_matches("// COEFFS LEN: ")
        .trim_end_matches(';')
        .to_string();
    (header, entries, trailer)
}

proptest! {
    #[test]
    fn blocks_are_reversed_then_concatenated(blocks in blocks(), strategy in strategies()) {
        let sequence = extractor(strategy).extract(&yul_source(&blocks)).expect("extract");

        let expected: Vec<String> = blocks
            .iter()
            .flat_map(|tokens| tokens.iter().rev().cloned())
            .collect();
        prop_assert_eq!(&sequence.coefficients, &expected);
        prop_assert_eq!(sequence.blocks.len(), blocks.len());
        prop_assert!(sequence.ambiguous_lines().is_empty());
    }

    #[test]
    fn counts_always_agree(text in "(result := add\\(|0x[0-9a-f]{1,4}|\\n\\s*\\)|[ a-z(),]{0,6}|\\n){0,40}", strategy in strategies()) {
        let sequence = extractor(strategy).extract(&text).expect("lenient extraction never fails");
        let output = render_declaration(sequence.iter(), "COEFFS", "U256");

        let (header, entries, trailer) = declared_counts(&output);
        prop_assert_eq!(&header, &entries.to_string());
        prop_assert_eq!(&trailer, &entries.to_string());
        prop_assert_eq!(entries, sequence.len());
    }

    #[test]
    fn text_without_prefix_declares_nothing(text in "[^r]{0,200}", strategy in strategies()) {
        let sequence = extractor(strategy).extract(&text).expect("extract");
        prop_assert!(sequence.is_empty());
        prop_assert_eq!(
            render_declaration(sequence.iter(), "COEFFS", "U256"),
            "const COEFFS: [U256; 0] = [\n];\n// COEFFS LEN: 0;\n"
        );
    }

    #[test]
    fn extraction_is_deterministic(blocks in blocks(), strategy in strategies()) {
        let source = yul_source(&blocks);
        let first = extractor(strategy).extract(&source).expect("extract");
        let second = extractor(strategy).extract(&source).expect("extract");
        prop_assert_eq!(first, second);
    }
}
