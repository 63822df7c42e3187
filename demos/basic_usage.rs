//! Basic usage example
//!
//! Demonstrates console routing: DEBUG and INFO go to stdout,
//! WARN and above go to stderr.
//!
//! Run with: cargo run --example basic_usage

use logger_factory::prelude::*;
use logger_factory::{info, warn};

fn main() -> Result<()> {
    println!("=== Logger Factory - Basic Usage Example ===\n");

    let factory = LoggerFactory::new();
    factory.set_console_colors(true);

    let logger = factory.get_logger_with_level("basic", LogLevel::DEBUG)?;

    logger.debug("Debug message - stdout");
    logger.info("Info message - stdout");
    logger.warn("Warning message - stderr");
    logger.error("Error message - stderr");
    logger.critical("Critical message - stderr");

    let items = 3;
    info!(logger, "Processed {} items", items);
    warn!(logger, "{} retries left", 1);

    // Same logger, same sinks; only the threshold changes
    let logger = factory.get_logger_with_level("basic", LogLevel::WARN)?;
    logger.info("Suppressed by the WARN threshold");
    logger.warn("Still visible");

    println!("\nSinks attached: {}", logger.sink_count());
    println!("Records suppressed: {}", logger.metrics().suppressed());
    Ok(())
}
