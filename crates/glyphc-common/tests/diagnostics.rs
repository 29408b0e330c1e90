use super::*;

#[test]
fn sink_accumulates_in_order() {
    let mut sink = VecDiagnosticsSink::new();
    sink.report(Diagnostic::error("a.emoji", Span::new(0, 1), "first", diagnostic_codes::ARITY_MISMATCH));
    sink.report(Diagnostic::warning(
        "a.emoji",
        Span::new(2, 3),
        "second",
        diagnostic_codes::DEPRECATED_USE,
    ));
    assert_eq!(sink.diagnostics().len(), 2);
    assert_eq!(sink.diagnostics()[0].message_text, "first");
    assert!(sink.has_errors());
}

#[test]
fn format_message_substitutes_placeholders() {
    let formatted = format_message("{0} overrides {1}", &["Dog", "bark"]);
    assert_eq!(formatted, "Dog overrides bark");
}

#[test]
fn message_template_lookup_by_code() {
    let template = get_message_template(diagnostic_codes::OVERRIDE_SEALED).unwrap();
    assert!(template.contains("final"));
}

#[test]
fn with_related_appends_secondary_location() {
    let d = Diagnostic::error("a.emoji", Span::new(0, 1), "oops", diagnostic_codes::RETURN_INCOMPATIBLE)
        .with_related("a.emoji", Span::new(10, 12), "declared here");
    assert_eq!(d.related_information.len(), 1);
    assert_eq!(d.related_information[0].message_text, "declared here");
}
