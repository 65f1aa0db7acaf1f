use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use colmap_client::{ApplyOutcome, ApplyState, ImportForm};
use colmap_map::{
    ConfidenceLevel, ConfidenceThresholds, IssueSeverity, SuggestionReport, ValidationReport,
};
use colmap_model::{CandidateScore, DestinationField, ImportProfile};

pub fn print_suggestions(
    report: &SuggestionReport,
    profile: &ImportProfile,
    thresholds: &ConfidenceThresholds,
) {
    println!("Profile: {}", profile.name);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Score"),
        header_cell("Basis"),
        header_cell("Confidence"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for field in &profile.fields {
        match report.for_field(&field.id) {
            Some(candidate) => {
                table.add_row(vec![
                    field_cell(&field.id, field.required),
                    Cell::new(&candidate.column),
                    Cell::new(format!("{:.3}", candidate.score)),
                    Cell::new(candidate.basis),
                    confidence_cell(thresholds.categorize(candidate.score)),
                ]);
            }
            None => {
                table.add_row(vec![
                    field_cell(&field.id, field.required),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }
    let counts = report.count_by_level(thresholds);
    let count = |level| counts.get(&level).copied().unwrap_or(0);
    let (high, medium, low) = (
        count(ConfidenceLevel::High),
        count(ConfidenceLevel::Medium),
        count(ConfidenceLevel::Low),
    );
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} of {} fields",
            report.accepted.len(),
            profile.fields.len()
        ))
        .add_attribute(Attribute::Bold),
        match report.mean_score() {
            Some(mean) => Cell::new(format!("{mean:.3}")).add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        },
        dim_cell("-"),
        Cell::new(format!("{high}/{medium}/{low}")).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if !report.unmapped_columns.is_empty() {
        println!("Unmapped columns: {}", report.unmapped_columns.join(", "));
    }
    if !report.accepted.is_empty() {
        print_confidence_legend(thresholds);
    }
}

fn print_confidence_legend(thresholds: &ConfidenceThresholds) {
    for (level, floor) in [
        (ConfidenceLevel::High, thresholds.high),
        (ConfidenceLevel::Medium, thresholds.medium),
        (ConfidenceLevel::Low, thresholds.low),
    ] {
        println!(
            "  {:<6} score >= {floor:.2}: {}",
            level.as_str().to_uppercase(),
            level.description()
        );
    }
}

pub fn print_ranking(
    field: &DestinationField,
    ranked: &[CandidateScore],
    explanations: &[String],
    threshold: f64,
) {
    println!("Field: {} ({})", field.id, field.display_name());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Score"),
        header_cell("Basis"),
        header_cell("Measures"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (rank, (candidate, explanation)) in ranked.iter().zip(explanations).enumerate() {
        let score = format!("{:.3}", candidate.score);
        let score = if candidate.score >= threshold {
            Cell::new(score).fg(Color::Green)
        } else {
            dim_cell(score)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&candidate.column),
            score,
            Cell::new(candidate.basis),
            dim_cell(explanation),
        ]);
    }
    println!("{table}");
    println!("Threshold: {threshold:.2}");
}

pub fn print_fields(profile: &ImportProfile) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Description"),
        header_cell("Example"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in &profile.fields {
        table.add_row(vec![
            field_cell(&field.id, field.required),
            Cell::new(field.display_name()),
            if field.required {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
            optional_cell(field.description.as_deref()),
            optional_cell(field.example.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_validation(report: &ValidationReport) {
    if report.issues.is_empty() {
        println!("Mapping is valid.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|issue| issue.severity());
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            optional_cell(issue.field()),
            optional_cell(issue.column()),
            Cell::new(issue.to_string()),
        ]);
    }
    println!("{table}");
    println!(
        "{} error(s), {} warning(s)",
        report.errors().count(),
        report.warnings().count()
    );
}

pub fn print_form(form: &ImportForm, outcome: &ApplyOutcome, state: &ApplyState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (field, value) in form.selectors() {
        let source = if outcome.filled.iter().any(|f| f == field) {
            Cell::new("suggested").fg(Color::Green)
        } else if value.is_some() {
            Cell::new("preset").fg(Color::Blue)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(field), optional_cell(value), source]);
    }
    println!("{table}");
    if let Some(err) = state.error() {
        println!("No suggestions available: {}", err.user_message());
    } else if outcome.is_noop() {
        println!("No empty selector received a suggestion.");
    }
    if !outcome.skipped_unknown.is_empty() {
        println!(
            "Ignored suggestions for unknown fields: {}",
            outcome.skipped_unknown.join(", ")
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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

fn field_cell(id: &str, required: bool) -> Cell {
    if required {
        Cell::new(id)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(id).fg(Color::Blue)
    }
}

fn confidence_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(level) => {
            let color = match level {
                ConfidenceLevel::High => Color::Green,
                ConfidenceLevel::Medium => Color::Yellow,
                ConfidenceLevel::Low => Color::Red,
            };
            Cell::new(level.as_str().to_uppercase()).fg(color)
        }
        None => dim_cell("-"),
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
