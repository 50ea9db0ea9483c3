/// Output formatting: terminal table and JSON.
use pairrank_core::{Phase, RankedEntry, Status};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: &'a [RankedEntry],
    comparisons: u64,
    complete: bool,
    phase: Phase,
}

/// Write a ranking as a formatted terminal table.
pub fn write_table(out: &mut impl Write, ranking: &[RankedEntry]) -> io::Result<()> {
    // Find the widest item name for padding
    let name_width = ranking.iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    writeln!(out, " # | {:<name_width$} | Score", "Item")?;
    writeln!(out, "---|-{}-|------", "-".repeat(name_width))?;

    for r in ranking {
        writeln!(out, "{:>2} | {:<name_width$} | {:>5}", r.rank, r.name, r.score)?;
    }
    Ok(())
}

/// One-line summary of the status counters.
pub fn format_status(status: &Status) -> String {
    format!(
        "{} comparisons | {}/{} distinct scores | {} pairs never compared",
        status.comparison_count,
        status.unique_score_count,
        status.total_item_count,
        status.uncompared_pair_count,
    )
}

/// Write the final (or provisional) ranking in the chosen format.
pub fn write_result(
    out: &mut impl Write,
    ranking: &[RankedEntry],
    status: &Status,
    phase: Phase,
    json: bool,
) -> io::Result<()> {
    if json {
        let output = JsonOutput {
            items: ranking,
            comparisons: status.comparison_count,
            complete: phase == Phase::Converged,
            phase,
        };
        let text = serde_json::to_string_pretty(&output).map_err(io::Error::other)?;
        writeln!(out, "{text}")
    } else {
        write_table(out, ranking)?;
        writeln!(out, "\n{}", phase.message(status.comparison_count))?;
        writeln!(out, "{}", format_status(status))
    }
}
