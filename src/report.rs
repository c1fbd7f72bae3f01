use crate::types::ScanSummary;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use time::format_description::well_known;

/// Print the plain-text summary.
pub fn write_human<W: Write>(out: &mut W, summary: &ScanSummary) -> std::io::Result<()> {
    writeln!(out, "Scan Summary:")?;
    writeln!(out, "Target: {}", summary.target)?;
    writeln!(out, "Started: {}", rfc3339(summary))?;
    writeln!(out, "Total ports scanned: {}", summary.total_scanned)?;
    writeln!(out, "Open ports ({}):", summary.open_count())?;
    for o in &summary.open_ports {
        writeln!(out, "Port: {} is open", o.port())?;
        if let Some(b) = o.banner_text() {
            writeln!(out, "Banner: {}", b.trim_end())?;
        }
    }
    write_elapsed(out, summary)
}

/// Trailing `Time taken` line; JSON mode sends it to stderr.
pub fn write_elapsed<W: Write>(out: &mut W, summary: &ScanSummary) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Time taken: {:?}", summary.elapsed)
}

/// Open ports as a pretty JSON array.
pub fn to_json(summary: &ScanSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summary.open_ports)
}

pub fn write_json_file(path: &Path, summary: &ScanSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &summary.open_ports)
        .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    Ok(())
}

fn rfc3339(summary: &ScanSummary) -> String {
    summary
        .started_at
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
