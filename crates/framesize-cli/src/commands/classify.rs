//! Classify command - pick the allocation tier for a program

use anyhow::{Context, Result};
use framesize_core::{select_tier, AllocationTier, FrameSizers};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Classification {
    program_size: usize,
    tier: AllocationTier,
    capacity: usize,
    buffer_size: usize,
}

/// Byte length of a program file
pub fn program_size_of(path: &Path) -> Result<usize> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read program file: {}", path.display()))?;
    usize::try_from(metadata.len())
        .with_context(|| format!("Program file too large: {}", path.display()))
}

pub fn render(program_size: usize, sizers: &dyn FrameSizers, json: bool) -> Result<String> {
    let tier = select_tier(program_size);
    let result = Classification {
        program_size,
        tier,
        capacity: tier.max_bytecode_size(),
        buffer_size: tier.buffer_size_with(sizers),
    };

    if json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }

    Ok(format!(
        "{} bytes -> {} (capacity {} bytes, buffer {} bytes)",
        result.program_size, result.tier, result.capacity, result.buffer_size
    ))
}

pub fn run(program_size: usize, sizers: &dyn FrameSizers, json: bool) -> Result<()> {
    println!("{}", render(program_size, sizers, json)?);
    Ok(())
}
