use flowdoc::core::documenter::DocumentationRecord;
use flowdoc::core::naming::derive_names;

fn record(suggested: Option<&str>) -> DocumentationRecord {
    DocumentationRecord {
        summary: "Syncs invoices into a spreadsheet.".to_string(),
        tools_used: vec!["Google Sheets".to_string()],
        credentials_required: vec!["Google OAuth".to_string()],
        complexity_score: 4,
        usage_notes: None,
        suggested_filename: suggested.map(|s| s.to_string()),
    }
}

#[test]
fn test_suggested_filename_is_used() {
    let names = derive_names(&record(Some("Sheets_Sync_a1b2")), "export-07.json");
    assert_eq!(names.json_name, "Sheets_Sync_a1b2.json");
    assert_eq!(names.md_name, "Sheets_Sync_a1b2.md");
}

#[test]
fn test_trailing_json_extension_is_stripped() {
    let names = derive_names(&record(Some("Sheets_Sync_a1b2.json")), "export-07.json");
    assert_eq!(names.json_name, "Sheets_Sync_a1b2.json");
    assert_eq!(names.md_name, "Sheets_Sync_a1b2.md");
}

#[test]
fn test_trailing_md_extension_is_stripped() {
    let names = derive_names(&record(Some("Sheets_Sync_a1b2.md")), "export-07.json");
    assert_eq!(names.json_name, "Sheets_Sync_a1b2.json");
}

#[test]
fn test_missing_suggestion_falls_back_to_source_stem() {
    let names = derive_names(&record(None), "export-07.json");
    assert_eq!(names.json_name, "export-07.json");
    assert_eq!(names.md_name, "export-07.md");
}

#[test]
fn test_blank_suggestion_falls_back_to_source_stem() {
    let names = derive_names(&record(Some("   ")), "export-07.json");
    assert_eq!(names.json_name, "export-07.json");
    assert_eq!(names.md_name, "export-07.md");
}

#[test]
fn test_source_without_extension() {
    let names = derive_names(&record(None), "export-07");
    assert_eq!(names.json_name, "export-07.json");
    assert_eq!(names.md_name, "export-07.md");
}

#[test]
fn test_suggestion_is_trimmed() {
    let names = derive_names(&record(Some("  Slack_Alert_99.json ")), "x.json");
    assert_eq!(names.json_name, "Slack_Alert_99.json");
}
