// src/report.rs
// =============================================================================
// Prints the outcome of a run to stdout, either as a table or as JSON.
//
// The output file is the real deliverable; this is the at-a-glance view in
// the terminal.
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use crate::checker::Status;
use crate::engine::{Row, RunResult};

// JSON shape of one row: the status as it appears in the output file
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    row: usize,
    url: &'a str,
    status: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub error_codes: usize,
    pub invalid: usize,
    pub unresolved: usize,
}

impl Summary {
    pub fn of(rows: &[Row]) -> Self {
        let mut summary = Summary::default();
        for row in rows {
            match &row.status {
                Some(Status::Valid) => summary.valid += 1,
                Some(Status::ErrorCode(_)) => summary.error_codes += 1,
                Some(Status::Invalid(_)) => summary.invalid += 1,
                None => summary.unresolved += 1,
            }
        }
        summary
    }

    pub fn all_valid(&self) -> bool {
        self.error_codes == 0 && self.invalid == 0 && self.unresolved == 0
    }
}

pub fn print_results(result: &RunResult, json: bool) -> Result<()> {
    if json {
        let rows: Vec<ReportRow<'_>> = result
            .rows
            .iter()
            .map(|row| ReportRow {
                row: row.index,
                url: &row.url,
                status: status_text(row),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(result);
    }
    Ok(())
}

fn print_table(result: &RunResult) {
    println!("{:<6} {:<60} {:<30}", "ROW", "URL", "STATUS");
    println!("{}", "=".repeat(96));

    for row in &result.rows {
        // Truncate URL if too long for display
        let url_display = if row.url.chars().count() > 57 {
            format!("{}...", row.url.chars().take(57).collect::<String>())
        } else {
            row.url.clone()
        };

        println!("{:<6} {:<60} {:<30}", row.index + 1, url_display, status_text(row));
    }

    println!();

    let summary = Summary::of(&result.rows);
    println!("📊 Summary:");
    println!("   ✅ Valid: {}", summary.valid);
    println!("   ❌ Error codes: {}", summary.error_codes);
    println!("   ⚠️  Invalid: {}", summary.invalid);
    if summary.unresolved > 0 {
        println!("   ⏳ Unresolved: {}", summary.unresolved);
    }
    println!("   🌐 Checked this run: {}", result.probes_issued);
    println!("   📋 Total: {}", result.rows.len());
}

fn status_text(row: &Row) -> String {
    row.status
        .as_ref()
        .map(Status::to_string)
        .unwrap_or_default()
}
