//! Generate CALCULATORS.md from the calculator catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog
//! ```
//!
//! The generated file is written to `hesap_core/CALCULATORS.md`.

use std::fs;
use std::path::Path;

use hesap_core::catalog::generate_catalog_markdown;

fn main() {
    println!("Generating CALCULATORS.md...");

    let markdown = generate_catalog_markdown();

    // Relative to workspace root
    let output_path = Path::new("hesap_core/CALCULATORS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
