use crate::aggregate::{Aggregate, FileTally};
use crate::duration::ConnectionTime;
use crate::types::Finding;
use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, Table};

#[must_use]
pub fn start_line(start: NaiveDate) -> String {
    format!("Using start date: {start}")
}

#[must_use]
pub fn found_line(finding: &Finding) -> String {
    format!(
        "Found connection time {} in file {}",
        finding.duration, finding.file_name
    )
}

#[must_use]
pub fn total_line(start: NaiveDate, total: ConnectionTime) -> String {
    format!("Total connection time from {start}: {total}")
}

pub fn print_start(start: NaiveDate) {
    println!("{}", start_line(start).cyan());
}

pub fn print_finding(finding: &Finding) {
    println!("{}", found_line(finding));
}

pub fn print_summary(start: NaiveDate, aggregate: &Aggregate, breakdown: bool) {
    if breakdown {
        println!();
        if aggregate.files.is_empty() {
            println!("No log files selected.");
        } else {
            println!("{}", breakdown_table(&aggregate.files));
        }
    }

    if !aggregate.warnings.is_empty() {
        println!(
            "\n{} {} problem(s) skipped:",
            "WARNING:".yellow(),
            aggregate.warnings.len()
        );
        for w in &aggregate.warnings {
            println!("  - {w}");
        }
    }

    println!("\n{}", total_line(start, aggregate.total).bold());
}

// Only files that contributed nothing are highlighted.
fn entries_color(entries: usize) -> Option<Color> {
    (entries == 0).then_some(Color::Yellow)
}

fn entries_cell(entries: usize) -> Cell {
    let cell = Cell::new(entries);
    match entries_color(entries) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

/// One row per scanned file plus a totals row.
#[must_use]
pub fn breakdown_table(files: &[FileTally]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["File", "Date", "Entries", "Subtotal"]);

    for tally in files {
        table.add_row(vec![
            Cell::new(&tally.name),
            Cell::new(tally.date),
            entries_cell(tally.entries),
            Cell::new(tally.subtotal),
        ]);
    }

    let entries: usize = files.iter().map(|t| t.entries).sum();
    let total: ConnectionTime = files.iter().map(|t| t.subtotal).sum();
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(entries).add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);

    table
}
