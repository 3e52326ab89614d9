//! Table output for the CLI.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use plant_model::ModelSummary;
use plant_persistence::{BackupEntry, Diagnostic};

use crate::commands::{CheckReport, ImportReport, InfoReport};

/// Digest characters shown in the backup table.
const SHORT_DIGEST: usize = 12;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Entity counts per kind, with a total row.
pub fn summary_table(summary: &ModelSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Count")]);
    apply_table_style(&mut table);
    for (kind, count) in summary.rows() {
        let count_cell = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(kind), count_cell]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total()).add_attribute(Attribute::Bold),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn backups_table(backups: &[BackupEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Timestamp (UTC)"),
        header_cell("#"),
        header_cell("Bytes"),
        header_cell("SHA-256"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    for backup in backups {
        let file = backup
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&backup.timestamp),
            if backup.sequence == 0 {
                dim_cell("-")
            } else {
                Cell::new(backup.sequence)
            },
            Cell::new(backup.size),
            Cell::new(short_digest(&backup.digest)),
            dim_cell(file),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table
}

pub fn print_info(info: &InfoReport) {
    println!("Snapshot: {}", info.snapshot_path.display());
    let Some(name) = &info.model_name else {
        println!("No saved model.");
        println!("Backups: {}", info.backups);
        return;
    };
    println!("Model: {name}");
    if let Some(digest) = &info.digest {
        println!("SHA-256: {digest}");
    }
    println!("Backups: {}", info.backups);
    println!("{}", summary_table(&info.report.summary));
    print_diagnostics(&info.report.diagnostics);
}

pub fn print_check(check: &CheckReport) {
    match (&check.error, &check.model_name) {
        (Some(error), _) => {
            println!("{}: rejected", check.file.display());
            println!("  {}", error.user_message());
            if let Some(suggestion) = error.suggestion() {
                println!("  hint: {suggestion}");
            }
        }
        (None, Some(name)) => {
            println!("{}: model '{name}' is valid", check.file.display());
            println!("{}", summary_table(&check.report.summary));
            print_diagnostics(&check.report.diagnostics);
        }
        (None, None) => println!("{}: valid", check.file.display()),
    }
}

pub fn print_import(import: &ImportReport) {
    println!("Imported model '{}'", import.model_name);
    println!("{}", summary_table(&import.report.summary));
    print_diagnostics(&import.report.diagnostics);
}

pub fn print_backups(backups: &[BackupEntry]) {
    if backups.is_empty() {
        println!("No backups.");
        return;
    }
    println!("{}", backups_table(backups));
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("warning: {diagnostic}");
    }
}

pub fn short_digest(digest: &str) -> &str {
    digest.get(..SHORT_DIGEST).unwrap_or(digest)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_table_lists_every_kind() {
        let summary = ModelSummary {
            points: 2,
            paths: 1,
            ..ModelSummary::default()
        };
        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("location type"));
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains('3'));
    }

    #[test]
    fn short_digest_tolerates_short_input() {
        assert_eq!(short_digest("abc"), "abc");
        assert_eq!(short_digest(&"f".repeat(64)).len(), SHORT_DIGEST);
    }
}
