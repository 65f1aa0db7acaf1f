use std::collections::BTreeSet;

use colmap_map::{SuggestionEngine, SuggestionService};
use colmap_model::{DestinationField, ImportProfile, MatchBasis, MatchConfig};
use proptest::prelude::*;

const VOCAB: [&str; 10] = [
    "email",
    "phone",
    "first_name",
    "last_name",
    "city",
    "country",
    "company",
    "zip",
    "notes",
    "amount",
];

fn engine() -> SuggestionEngine {
    SuggestionEngine::new(MatchConfig::default()).expect("default config is valid")
}

fn fields(ids: &[&str]) -> Vec<DestinationField> {
    ids.iter().map(|id| DestinationField::new(*id)).collect()
}

fn columns(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|c| (*c).to_string()).collect()
}

fn decorate(id: &str, style: u8) -> String {
    match style % 4 {
        0 => id.to_string(),
        1 => id.to_uppercase(),
        2 => id.replace('_', " "),
        _ => format!("  {}-", id.replace('_', "-").to_uppercase()),
    }
}

#[test]
fn suggests_contact_columns() {
    let report = engine()
        .suggest(
            &fields(&["email", "phone"]),
            &columns(&["Email Address", "Phone Number", "Notes"]),
        )
        .expect("suggest");
    let mapping = report.mapping();

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.get("email"), Some("Email Address"));
    assert_eq!(mapping.get("phone"), Some("Phone Number"));
    assert_eq!(report.unmapped_columns, vec!["Notes"]);
    assert!(report.unmapped_fields.is_empty());
}

#[test]
fn duplicate_labels_offer_first_in_document_order() {
    let report = engine()
        .suggest(&fields(&["name"]), &columns(&["Name", "name "]))
        .expect("suggest");

    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.accepted[0].column, "Name");
    assert_eq!(report.accepted[0].column_index, 0);
    assert_eq!(report.unmapped_columns, vec!["name "]);
}

#[test]
fn synonyms_match_exactly() {
    let mapping = engine()
        .suggest_mapping(
            &fields(&["phone", "zip", "last_name"]),
            &columns(&["Surname", "Telephone", "Postal Code"]),
        )
        .expect("suggest");

    assert_eq!(mapping.get("phone"), Some("Telephone"));
    assert_eq!(mapping.get("zip"), Some("Postal Code"));
    assert_eq!(mapping.get("last_name"), Some("Surname"));
}

#[test]
fn typos_are_recovered() {
    let report = engine()
        .suggest(&fields(&["address", "country"]), &columns(&["Adress", "Contry"]))
        .expect("suggest");

    let address = report.for_field("address").expect("address suggested");
    assert_eq!(address.column, "Adress");
    assert_eq!(address.basis, MatchBasis::EditDistance);
    assert_eq!(
        report.for_field("country").map(|c| c.column.as_str()),
        Some("Contry")
    );
}

#[test]
fn unrelated_columns_yield_empty_mapping() {
    let mapping = engine()
        .suggest_mapping(
            &fields(&["email", "phone"]),
            &columns(&["Quarter", "Widget", "Notes"]),
        )
        .expect("suggest");
    assert!(mapping.is_empty());
}

#[test]
fn projects_profile_maps_typical_sheet() {
    let service = SuggestionService::new(ImportProfile::projects()).expect("service");
    let cols = columns(&[
        "Project Code",
        "Project Name",
        "Branch",
        "Fiscal Year",
        "Win Probability",
        "Sales",
        "Total Cost",
        "Memo",
    ]);
    let mapping = service.report(&cols).expect("report").into_mapping();

    assert_eq!(mapping.get("project_code"), Some("Project Code"));
    assert_eq!(mapping.get("project_name"), Some("Project Name"));
    assert_eq!(mapping.get("branch_name"), Some("Branch"));
    assert_eq!(mapping.get("fiscal_year"), Some("Fiscal Year"));
    assert_eq!(mapping.get("order_probability"), Some("Win Probability"));
    assert_eq!(mapping.get("revenue"), Some("Sales"));
    assert_eq!(mapping.get("expenses"), Some("Total Cost"));
    assert_eq!(mapping.field_for_column("Memo"), None);
}

#[test]
fn projects_profile_maps_sheet_export_headers() {
    let service = SuggestionService::new(ImportProfile::projects()).expect("service");
    let cols = columns(&[
        "プロジェクトコード",
        "プロジェクト名",
        "支社名",
        "支社コード",
        "売上の年度",
        "受注角度",
        "売上（契約金）",
        "経費（トータル）",
    ]);
    let report = service.report(&cols).expect("report");

    assert!(report.unmapped_columns.is_empty());
    assert!(report.accepted.iter().all(|c| c.basis == MatchBasis::Exact));
    let mapping = report.into_mapping();
    assert_eq!(mapping.get("project_code"), Some("プロジェクトコード"));
    assert_eq!(mapping.get("branch_name"), Some("支社名"));
    assert_eq!(mapping.get("branch_code"), Some("支社コード"));
    assert_eq!(mapping.get("fiscal_year"), Some("売上の年度"));
    assert_eq!(mapping.get("revenue"), Some("売上（契約金）"));
    assert_eq!(mapping.get("expenses"), Some("経費（トータル）"));
}

#[test]
fn projects_profile_accepts_short_amount_headers() {
    let service = SuggestionService::new(ImportProfile::projects()).expect("service");
    let mapping = service
        .report(&columns(&["契約金", "経費", "売上の年度"]))
        .expect("report")
        .into_mapping();

    assert_eq!(mapping.get("revenue"), Some("契約金"));
    assert_eq!(mapping.get("expenses"), Some("経費"));
    assert_eq!(mapping.get("fiscal_year"), Some("売上の年度"));
}

proptest! {
    #[test]
    fn exact_labels_map_with_full_score(
        ids in proptest::sample::subsequence(VOCAB.to_vec(), 1..=VOCAB.len()),
        style in any::<u8>(),
    ) {
        let cols: Vec<String> = ids.iter().map(|id| decorate(id, style)).collect();
        let report = engine().suggest(&fields(&ids), &cols).unwrap();

        prop_assert_eq!(report.accepted.len(), ids.len());
        for (id, column) in ids.iter().zip(&cols) {
            let candidate = report.for_field(id).unwrap();
            prop_assert_eq!(&candidate.column, column);
            prop_assert_eq!(candidate.score, 1.0);
        }
    }

    #[test]
    fn columns_are_never_shared(
        ids in proptest::sample::subsequence(VOCAB.to_vec(), 1..=VOCAB.len()),
        cols in proptest::collection::vec("[A-Za-z_ -]{0,14}", 0..12),
    ) {
        let report = engine().suggest(&fields(&ids), &cols).unwrap();
        let mut seen = BTreeSet::new();
        for candidate in &report.accepted {
            prop_assert!(seen.insert(candidate.column.clone()), "column reused: {}", candidate.column);
        }
        prop_assert_eq!(report.mapping().len(), report.accepted.len());
    }

    #[test]
    fn accepted_scores_clear_threshold(
        ids in proptest::sample::subsequence(VOCAB.to_vec(), 1..=VOCAB.len()),
        cols in proptest::collection::vec("[A-Za-z_ -]{0,14}", 0..12),
        threshold in 0.3f64..0.95,
    ) {
        let engine = SuggestionEngine::new(MatchConfig::default().with_threshold(threshold)).unwrap();
        let report = engine.suggest(&fields(&ids), &cols).unwrap();
        for candidate in &report.accepted {
            prop_assert!(candidate.score >= threshold);
            let field = DestinationField::new(candidate.field.clone());
            prop_assert_eq!(engine.explain(&field, &candidate.column).score(), candidate.score);
        }
    }

    #[test]
    fn suggestion_is_pure(
        ids in proptest::sample::subsequence(VOCAB.to_vec(), 1..=VOCAB.len()),
        cols in proptest::collection::vec("[A-Za-z_ -]{0,14}", 0..12),
    ) {
        let engine = engine();
        let first = engine.suggest(&fields(&ids), &cols).unwrap();
        let second = engine.suggest(&fields(&ids), &cols).unwrap();
        prop_assert_eq!(first.accepted, second.accepted);
        prop_assert_eq!(first.unmapped_columns, second.unmapped_columns);
    }
}
