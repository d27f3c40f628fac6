use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use scout_archetypes::config::AppConfig;
use scout_archetypes::export::{write_html, write_json, write_xlsx};
use scout_archetypes::pipeline::{AnalysisInputs, Analyzer};
use scout_archetypes::AnalysisReport;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn full_inputs() -> AnalysisInputs {
    AnalysisInputs {
        transfer: Some(fixture("transfer.html")),
        loan: Some(fixture("loan.html")),
        untransferable: Some(fixture("untransferable.html")),
        multipliers: Some(fixture("multipliers.csv")),
    }
}

async fn run_fixtures() -> AnalysisReport {
    Analyzer::new(AppConfig::default())
        .run(&full_inputs())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_one_result_per_archetype_with_eligible_players() {
    let report = run_fixtures().await;

    assert_eq!(
        report.archetype_names(),
        vec![
            "Sweeper Keeper",
            "Ball-Playing Defender",
            "Stopper",
            "Winger",
            "Inside Forward",
            "Target Forward",
            "Poacher",
        ]
    );

    for result in &report.archetypes {
        assert!(!result.is_empty());
        for pair in result.records.windows(2) {
            assert!(pair[0].adjusted_rating >= pair[1].adjusted_rating);
        }
        for record in &result.records {
            assert!((0.0..=1.0).contains(&record.percentile));
        }
    }
}

#[tokio::test]
async fn test_run_summary() {
    let report = run_fixtures().await;
    let summary = &report.summary;

    assert_eq!(
        summary.rows_per_source,
        vec![
            ("Available for Transfer".to_string(), 3),
            ("Available on Loan".to_string(), 3),
            ("Not Transferrable".to_string(), 3),
        ]
    );
    assert_eq!(summary.duplicates_removed, 2);
    assert_eq!(summary.rows_merged, 7);
    assert_eq!(summary.rows_below_minutes, 1);
    assert_eq!(summary.rows_scored, 6);
    assert_eq!(summary.archetypes_scored, 7);
}

#[tokio::test]
async fn test_first_source_wins_for_duplicate_uid() {
    let report = run_fixtures().await;
    let poachers = report.get("Poacher").unwrap();

    let striker_two = poachers.records.iter().find(|r| r.uid == "2").unwrap();
    assert_eq!(striker_two.name, "Striker Two");
    assert_eq!(striker_two.signability, "Available for Transfer");

    let defenders = report.get("Stopper").unwrap();
    assert_eq!(defenders.len(), 1);
    assert_eq!(defenders.records[0].name, "Defender Three");
}

#[tokio::test]
async fn test_league_weighting_and_ranking() {
    let report = run_fixtures().await;

    // Bundesliga (85) striker outranks the Ligue 1 (75) striker.
    let poachers = report.get("Poacher").unwrap();
    let uids: Vec<&str> = poachers.records.iter().map(|r| r.uid.as_str()).collect();
    assert_eq!(uids, vec!["6", "2"]);
    assert_eq!(poachers.records[0].percentile, 1.0);
    assert_eq!(poachers.records[1].percentile, 0.0);

    // Championship is not in the sheet and falls back to "Others" (5).
    let keepers = report.get("Sweeper Keeper").unwrap();
    let seven = keepers.records.iter().find(|r| r.uid == "7").unwrap();
    assert!((seven.adjusted_rating - seven.rating * 0.05).abs() < 1e-12);
    assert_eq!(keepers.records[0].uid, "1");
}

#[tokio::test]
async fn test_garbled_division_is_canonicalized() {
    let report = run_fixtures().await;
    let defender = &report.get("Ball-Playing Defender").unwrap().records[0];

    assert_eq!(defender.division, "Primera Federación Grupo I");
    assert!((defender.adjusted_rating - defender.rating * 0.20).abs() < 1e-12);
    assert_eq!(defender.percentile, 0.5);
}

#[tokio::test]
async fn test_partial_inputs() {
    let inputs = AnalysisInputs {
        loan: Some(fixture("loan.html")),
        ..Default::default()
    };
    let report = Analyzer::new(AppConfig::default())
        .run(&inputs)
        .await
        .unwrap();

    assert_eq!(report.summary.rows_merged, 3);
    assert_eq!(report.summary.rows_scored, 2);
    assert!(report.get("Sweeper Keeper").is_none());
    assert!(report.get("Poacher").is_some());
}

#[tokio::test]
async fn test_exports_written() {
    let report = run_fixtures().await;
    let temp_dir = TempDir::new().unwrap();

    let json_path = temp_dir.path().join("report.json");
    let xlsx_path = temp_dir.path().join("report.xlsx");
    let html_path = temp_dir.path().join("report.html");

    write_json(&report, &json_path).unwrap();
    write_xlsx(&report, &xlsx_path).unwrap();
    write_html(&report, &html_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["archetypes"].as_array().unwrap().len(), 7);
    assert_eq!(json["archetypes"][6]["rows"][0]["UID"], "6");

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("Primera Federación Grupo I"));

    assert!(std::fs::metadata(&xlsx_path).unwrap().len() > 0);
}
