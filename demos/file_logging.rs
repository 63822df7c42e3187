//! File logging example
//!
//! Installs the default session layout under `.logs/` and writes to it.
//!
//! Run with: cargo run --example file_logging

use logger_factory::prelude::*;

fn main() -> Result<()> {
    println!("=== Logger Factory - File Logging Example ===\n");

    let factory = LoggerFactory::new();
    let session_dir = factory.install_default_destinations(".logs")?;
    factory.add_output_file(
        "application.log",
        LogLevel::INFO,
        LogLevel::CRITICAL,
        WriteMode::Append,
    );

    let ingest = factory.get_logger_with_level("ingest", LogLevel::DEBUG)?;
    let train = factory.get_logger("train")?;

    ingest.debug("Loading configuration...");
    ingest.info("Configuration loaded successfully");
    for i in 1..=5 {
        train.info(format!("Processing item {}/5", i));
        if i == 3 {
            train.warn("Item 3 took longer than expected");
        }
    }
    train.error("Failed to load optional plugin");

    ingest.flush()?;
    train.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Session logs: {}", session_dir.display());
    println!("Check 'application.log' for the appended output");
    Ok(())
}
