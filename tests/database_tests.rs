use anyhow::Result;
use tempfile::tempdir;

use earnest::storage::{Database, Quarter};

#[test]
fn database_supports_core_report_workflow() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("earnest.db");
    let db = Database::open_path(&db_path)?;

    let report_id = db
        .insert_report(
            "NVIDIA",
            Quarter::Q1,
            2024,
            "Financial Results\nRevenue was $26B.\nOutlook\nMore growth expected.",
        )?
        .expect("first insert should produce an id");

    let report = db
        .get_report("NVIDIA", Quarter::Q1, 2024)?
        .expect("report should be cached");
    assert_eq!(report.id, report_id);
    assert_eq!(report.quarter, Quarter::Q1);
    assert!(report.text.contains("Revenue was $26B."));

    // A second transcript for the same period is rejected.
    let duplicate = db.insert_report("NVIDIA", Quarter::Q1, 2024, "other text")?;
    assert!(duplicate.is_none());

    assert!(db.get_summary(report_id)?.is_none());

    db.insert_summary(report_id, "First summary.", Some("gemini-2.5-flash"))?;
    db.insert_summary(report_id, "Second summary.", Some("gemini-2.5-flash"))?;

    let summary = db.get_summary(report_id)?.expect("summary should exist");
    assert_eq!(summary.text, "Second summary.");
    assert_eq!(summary.report_id, report_id);

    let listed = db.list_reports(10)?;
    assert_eq!(listed.len(), 1);
    assert!(listed[0].has_summary);

    let hits = db.search_reports("nvid", 10)?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].company, "NVIDIA");

    Ok(())
}

#[test]
fn deleting_report_removes_summaries() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("earnest.db");
    let db = Database::open_path(&db_path)?;

    let report_id = db
        .insert_report("Alphabet", Quarter::Q2, 2023, "Q&A\nQuestions were asked.")?
        .expect("insert should produce an id");
    db.insert_summary(report_id, "Summary text.", None)?;

    assert!(db.delete_report("Alphabet", Quarter::Q2, 2023)?);

    assert!(db.get_report("Alphabet", Quarter::Q2, 2023)?.is_none());
    assert!(db.get_summary(report_id)?.is_none());
    assert!(!db.delete_report("Alphabet", Quarter::Q2, 2023)?);

    Ok(())
}

#[test]
fn reopening_database_preserves_reports() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("earnest.db");

    {
        let db = Database::open_path(&db_path)?;
        db.insert_report("Acme", Quarter::Q3, 2024, "Key Highlights\nA good quarter.")?
            .expect("insert should produce an id");
    }

    let db = Database::open_path(&db_path)?;
    assert_eq!(db.schema_version()?, 1);

    let report = db
        .get_report("Acme", Quarter::Q3, 2024)?
        .expect("report should survive reopen");
    assert!(report.text.starts_with("Key Highlights"));

    Ok(())
}
