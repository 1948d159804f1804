//! Copies the stock price fixture to OUT_DIR so it can be embedded via
//! `include_str!` at compile time.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let src_path = "../fixtures/StockData.csv";
    let src = Path::new(src_path);
    let dest = Path::new(&out_dir).join("StockData.csv");

    if src.exists() {
        fs::copy(src, &dest).unwrap_or_else(|e| {
            panic!("Failed to copy {} to {}: {}", src_path, dest.display(), e);
        });
    } else {
        // Header only, so the app loads an empty table and shows its warning
        fs::write(&dest, "date,price,stock\n").unwrap();
        println!(
            "cargo:warning=Fixture file {} not found, using empty placeholder",
            src_path
        );
    }

    println!("cargo:rerun-if-changed={}", src_path);
    println!("cargo:rerun-if-changed=build.rs");
}
