//! Layout command - show region placement inside a tier's frame buffer

use anyhow::{Context, Result};
use framesize_core::{select_tier, AllocationTier, FrameLayout, FrameSizers};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LayoutReport {
    tier: AllocationTier,
    #[serde(flatten)]
    layout: FrameLayout,
}

/// Accept either a tier name or a program size (classified first)
pub fn parse_target(target: &str) -> Result<AllocationTier> {
    if let Ok(program_size) = target.trim().parse::<usize>() {
        return Ok(select_tier(program_size));
    }
    target
        .parse::<AllocationTier>()
        .with_context(|| format!("Invalid layout target: {}", target))
}

pub fn render(tier: AllocationTier, sizers: &dyn FrameSizers, json: bool) -> Result<String> {
    let layout = FrameLayout::for_tier(tier, sizers);

    if json {
        return Ok(serde_json::to_string_pretty(&LayoutReport { tier, layout })?);
    }

    let mut out = format!("tier {} (program size {})\n", tier, layout.program_size);
    out.push_str(&format!(
        "{:<10} {:>10} {:>10} {:>6}\n",
        "region", "offset", "size", "align"
    ));
    for span in &layout.regions {
        out.push_str(&format!(
            "{:<10} {:>10} {:>10} {:>6}\n",
            span.region, span.offset, span.size, span.alignment
        ));
    }
    out.push_str(&format!(
        "packed {} + overhead {} = buffer {}\n",
        layout.packed_size, layout.overhead, layout.buffer_size
    ));
    Ok(out)
}

pub fn run(target: &str, sizers: &dyn FrameSizers, json: bool) -> Result<()> {
    let tier = parse_target(target)?;
    print!("{}", render(tier, sizers, json)?);
    Ok(())
}
