//! Tiers command - print the tier table with buffer sizes

use anyhow::Result;
use framesize_core::{AllocationTier, FrameSizers};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TierRow {
    tier: AllocationTier,
    capacity: usize,
    buffer_size: usize,
}

fn rows(sizers: &dyn FrameSizers) -> Vec<TierRow> {
    AllocationTier::ALL
        .into_iter()
        .map(|tier| TierRow {
            tier,
            capacity: tier.max_bytecode_size(),
            buffer_size: tier.buffer_size_with(sizers),
        })
        .collect()
}

/// Render the tier table as text or JSON
pub fn render(sizers: &dyn FrameSizers, json: bool) -> Result<String> {
    let rows = rows(sizers);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = format!("{:<8} {:>10} {:>12}\n", "tier", "capacity", "buffer");
    for row in &rows {
        out.push_str(&format!(
            "{:<8} {:>10} {:>12}\n",
            row.tier, row.capacity, row.buffer_size
        ));
    }
    Ok(out)
}

pub fn run(sizers: &dyn FrameSizers, json: bool) -> Result<()> {
    print!("{}", render(sizers, json)?);
    Ok(())
}
