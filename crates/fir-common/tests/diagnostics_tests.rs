use super::diagnostics::*;

#[test]
fn test_format_message_replaces_placeholders() {
    let text = format_message("Too many arguments for '{0}': expected {1}, found {2}.", &[
        "f", "1", "3",
    ]);
    assert_eq!(text, "Too many arguments for 'f': expected 1, found 3.");
}

#[test]
fn test_from_message_copies_code_name_and_category() {
    let diag = Diagnostic::from_message(
        "main.kt",
        10,
        3,
        &diagnostic_messages::UNRESOLVED_REFERENCE,
        &["foo"],
    );
    assert_eq!(diag.code, diagnostic_codes::UNRESOLVED_REFERENCE);
    assert_eq!(diag.name, "UNRESOLVED_REFERENCE");
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.message_text, "Unresolved reference: foo.");
    assert_eq!(diag.end(), 13);
    assert!(diag.is_error());
}

#[test]
fn test_message_table_has_unique_codes_and_names() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), DIAGNOSTIC_MESSAGES.len());

    let mut names: Vec<&str> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), DIAGNOSTIC_MESSAGES.len());
}

#[test]
fn test_lookup_by_code_and_name() {
    let by_code = get_diagnostic_message(diagnostic_codes::UNREACHABLE_CODE).unwrap();
    let by_name = get_diagnostic_message_by_name("UNREACHABLE_CODE").unwrap();
    assert_eq!(by_code, by_name);
    assert_eq!(by_name.category, DiagnosticCategory::Warning);
    assert!(get_diagnostic_message(9999).is_none());
}

#[test]
fn test_related_information_is_serialized_only_when_present() {
    let plain = Diagnostic::from_message("a.kt", 0, 1, &diagnostic_messages::NO_THIS, &[]);
    let json = serde_json::to_value(&plain).unwrap();
    assert!(json.get("related_information").is_none());

    let related = plain.with_related("a.kt".into(), 5, 2, "first declared here".into());
    let json = serde_json::to_value(&related).unwrap();
    assert_eq!(json["related_information"][0]["start"], 5);
}
