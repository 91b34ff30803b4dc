/// Simple example demonstrating how to use the Coefficient Extractor library

use anyhow::Result;
use coeff_extractor::utils::output_formatter::format_output;
use coeff_extractor::{extract_file, Settings};

fn main() -> Result<()> {
    // Path to file for extraction
    let file_path = std::env::temp_dir().join("coeff_extractor_sample.yul");

    // Create sample file
    std::fs::write(
        &file_path,
        r#"function periodic_column(x) -> result {
    result := add(
        0x47da67f078d657e777a79423be81a5d41f445f9455b207ec9768858cfd134f1,
        mulmod(x, 0x2574ea7cc37bd716e0ec143a2420103589ba7b2af9d6b07569af3b108450a90, PRIME)
    )
}
"#,
    )?;

    println!("Extracting coefficients from: {}", file_path.display());

    let settings = Settings::default();
    let sequence = extract_file(&file_path, &settings)?;

    // Display per-block results
    for block in &sequence.blocks {
        println!("\nBlock at line {} ({} found):", block.line, block.tokens.len());
        for token in &block.tokens {
            println!("  - {}", token);
        }
    }

    println!("\n{}", format_output(&sequence, &settings, false));

    std::fs::remove_file(&file_path)?;
    Ok(())
}
