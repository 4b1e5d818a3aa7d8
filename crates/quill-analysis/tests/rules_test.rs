//! Rule catalog and dispatcher: findings, fixes, configuration and trivia.

use std::io::Write;

use quill_analysis::linguistics::CodeHeuristics;
use quill_analysis::rules::*;
use quill_core::config::QuillConfig;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(RuleCatalog::builtin().unwrap(), DispatchOptions::default())
}

fn findings_for<'a>(findings: &'a [Finding], rule_id: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.rule_id == rule_id).collect()
}

#[test]
fn test_duplicate_exception_single_finding_keyed_to_first_name() {
    let symbol = Symbol::new(SymbolKind::Method, "Run").with_documentation(
        "<summary>Runs the job.</summary>\n\
         <exception cref=\"System.ArgumentNullException\">A</exception>\n\
         <exception cref=\"System.ArgumentException\">B</exception>\n\
         <exception cref=\"System.ArgumentNullException\">C</exception>",
    );
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let dupes = findings_for(&findings, "QL2100");
    assert_eq!(dupes.len(), 1);
    let key = dupes[0].section.as_ref().unwrap();
    assert_eq!(key.name.as_deref(), Some("System.ArgumentNullException"));

    let fixed = d.fix(&symbol, dupes[0]).unwrap();
    assert_eq!(
        fixed.xml,
        "<summary>Runs the job.</summary>\n\
         <exception cref=\"System.ArgumentNullException\">A<para>-or-</para>C</exception>\n\
         <exception cref=\"System.ArgumentException\">B</exception>"
    );
}

#[test]
fn test_return_leading_word_proposes_gets() {
    let symbol = Symbol::new(SymbolKind::Property, "Count")
        .with_return_type(TypeRef::new("System", "Int32"))
        .with_documentation("<summary>Return the count.</summary>");
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let returns = findings_for(&findings, "QL2037");
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0].proposal, "Gets");

    let fixed = d.fix(&symbol, returns[0]).unwrap();
    assert_eq!(fixed.xml, "<summary>Gets the count.</summary>");
}

#[test]
fn test_boolean_parameter_rewritten_to_langwords() {
    let symbol = Symbol::new(SymbolKind::Method, "Configure")
        .with_parameter(ParameterInfo::new("enabled", TypeRef::boolean()))
        .with_documentation(
            "<summary>Configures caching.</summary><param name=\"enabled\">true to enable caching; otherwise, false.</param>",
        );
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let booleans = findings_for(&findings, "QL2023");
    assert_eq!(booleans.len(), 1);
    assert_eq!(
        booleans[0].section.as_ref().map(ToString::to_string).as_deref(),
        Some("param[enabled]")
    );

    let fixed = d.fix(&symbol, booleans[0]).unwrap();
    assert_eq!(
        fixed.xml,
        "<summary>Configures caching.</summary><param name=\"enabled\"><see langword=\"true\"/> to enable caching; otherwise, <see langword=\"false\"/>.</param>"
    );

    let rewritten = symbol.clone().with_documentation(&fixed.xml);
    assert!(findings_for(&d.analyze(&rewritten), "QL2023").is_empty());
}

#[test]
fn test_capitalized_boolean_literal_fix_converges() {
    let symbol = Symbol::new(SymbolKind::Method, "Configure")
        .with_parameter(ParameterInfo::new("enabled", TypeRef::boolean()))
        .with_documentation(
            "<summary>Configures caching.</summary><param name=\"enabled\">True to enable caching; otherwise, false.</param>",
        );
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let booleans = findings_for(&findings, "QL2023");
    assert_eq!(booleans.len(), 1);

    let fixed = d.fix(&symbol, booleans[0]).unwrap();
    assert_eq!(
        fixed.xml,
        "<summary>Configures caching.</summary><param name=\"enabled\"><see langword=\"true\"/> to enable caching; otherwise, <see langword=\"false\"/>.</param>"
    );
    let rewritten = symbol.clone().with_documentation(&fixed.xml);
    assert!(findings_for(&d.analyze(&rewritten), "QL2023").is_empty());
}

#[test]
fn test_xml_comment_kept_through_fix() {
    let symbol = Symbol::new(SymbolKind::Property, "Count")
        .with_return_type(TypeRef::new("System", "Int32"))
        .with_documentation("<summary>The <!-- keep --> count.</summary>");
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let gets = findings_for(&findings, "QL2012");
    assert_eq!(gets.len(), 1);
    let fixed = d.fix(&symbol, gets[0]).unwrap();
    assert_eq!(fixed.xml, "<summary>Gets the <!-- keep --> count.</summary>");
}

#[test]
fn test_dependency_property_with_foreign_markup_is_not_rewritten() {
    let symbol = Symbol::new(SymbolKind::Field, "IsOpenProperty")
        .with_containing_type(TypeRef::new("Acme", "Widget"))
        .with_modifiers(Modifiers {
            is_static: true,
            is_readonly: true,
            ..Default::default()
        })
        .with_documentation("<summary>The <c>IsOpen</c> flag of <see cref=\"T:Acme.Door\"/>.</summary>");
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let dp = findings_for(&findings, "QL2017");
    assert_eq!(dp.len(), 1);
    assert!(dp[0].fix.is_none());
    assert!(d.fix(&symbol, dp[0]).is_none());
}

#[test]
fn test_dependency_property_link_spliced() {
    let symbol = Symbol::new(SymbolKind::Field, "IsOpenProperty")
        .with_containing_type(TypeRef::new("Acme", "Widget"))
        .with_modifiers(Modifiers {
            is_static: true,
            is_readonly: true,
            ..Default::default()
        })
        .with_documentation("<summary>The IsOpen property.</summary>");
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let dp = findings_for(&findings, "QL2017");
    assert_eq!(dp.len(), 1);

    let fixed = d.fix(&symbol, dp[0]).unwrap();
    assert_eq!(
        fixed.xml,
        "<summary>Identifies the <see cref=\"Acme.Widget.IsOpen\"/> dependency property.</summary>"
    );
    let rewritten = symbol.clone().with_documentation(&fixed.xml);
    assert!(findings_for(&d.analyze(&rewritten), "QL2017").is_empty());
}

#[test]
fn test_events_are_raised() {
    let symbol = Symbol::new(SymbolKind::Event, "Closed")
        .with_documentation("<summary>Fired when the window closes.</summary>");
    let d = dispatcher();
    let findings = d.analyze(&symbol);
    let fired = findings_for(&findings, "QL2060");
    assert_eq!(fired.len(), 1);
    assert!(fired[0].message.contains("Fired"));
    let fixed = d.fix(&symbol, fired[0]).unwrap();
    assert_eq!(fixed.xml, "<summary>Raised when the window closes.</summary>");
}

#[test]
fn test_passing_comment_has_no_findings() {
    let symbol = Symbol::new(SymbolKind::Property, "Name")
        .with_return_type(TypeRef::new("System", "String"))
        .with_documentation("<summary>Gets or sets the name.</summary>\n<value>The name.</value>");
    assert!(dispatcher().analyze(&symbol).is_empty());
}

#[test]
fn test_malformed_section_does_not_hide_siblings() {
    let symbol = Symbol::new(SymbolKind::Property, "Count")
        .with_return_type(TypeRef::new("System", "Int32"))
        .with_documentation(
            "<summary>The count.</summary>\n<exception cref=\"T:System.X\">Broken <b>markup</exception>",
        );
    let findings = dispatcher().analyze(&symbol);
    assert_eq!(findings_for(&findings, "QL2012").len(), 1);
}

#[test]
fn test_findings_follow_rule_then_document_order() {
    let symbol = Symbol::new(SymbolKind::Method, "Fetch")
        .with_return_type(TypeRef::new("System.Threading.Tasks", "Task"))
        .with_documentation("<summary>Fetch the info.</summary>\n<remarks>More info here.</remarks>");
    let findings = dispatcher().analyze(&symbol);
    let ids: Vec<_> = findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["QL2040", "QL2075", "QL2220", "QL2220"]);
    let sections: Vec<_> = findings[2..]
        .iter()
        .map(|f| f.section.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(sections, vec!["summary", "remarks"]);
}

#[test]
fn test_batch_keeps_input_order() {
    let symbols = vec![
        Symbol::new(SymbolKind::Property, "A").with_documentation("<summary>The a.</summary>"),
        Symbol::new(SymbolKind::Property, "B").with_documentation("<summary>Gets the b.</summary>"),
        Symbol::new(SymbolKind::Event, "C").with_documentation("<summary>The c.</summary>"),
    ];
    let results = dispatcher().analyze_batch(&symbols);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0][0].symbol, "A");
    assert!(results[1].is_empty());
    assert_eq!(results[2][0].rule_id, "QL2001");
}

#[test]
fn test_analyze_into_sink() {
    let symbol = Symbol::new(SymbolKind::Event, "Opened").with_documentation("<summary>Opened.</summary>");
    let mut sink = CollectingSink::new();
    dispatcher().analyze_into(&symbol, &mut sink);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.findings()[0].rule_id, "QL2001");
}

#[test]
fn test_prerender_disabled() {
    let d = Dispatcher::new(
        RuleCatalog::builtin().unwrap(),
        DispatchOptions {
            prerender_fixes: false,
            ..Default::default()
        },
    );
    let symbol = Symbol::new(SymbolKind::Event, "Opened").with_documentation("<summary>Opened.</summary>");
    let findings = d.analyze(&symbol);
    assert!(findings.iter().all(|f| f.fix.is_none()));
}

#[test]
fn test_config_filters_and_overrides() {
    let config = QuillConfig::from_toml(
        r#"
[analysis]
disabled_rules = ["QL2012"]

[analysis.severity_overrides]
QL2001 = "error"
"#,
    )
    .unwrap();
    let d = Dispatcher::from_config(&config).unwrap();
    assert!(d.catalog().get("QL2012").is_none());
    assert_eq!(d.catalog().get("QL2001").unwrap().severity, Severity::Error);
}

#[test]
fn test_extra_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[rules]]
id = "ACME001"
title = "Factory methods create"
applies_to = ["method"]
name_starts_with = "Create"
phrases = ["Creates "]
fix = "prepend"
"#
    )
    .unwrap();

    let mut config = QuillConfig::default();
    config.catalog.skip_builtin = Some(true);
    config.catalog.extra_catalogs.push(file.path().to_path_buf());
    let d = Dispatcher::from_config(&config).unwrap();
    assert_eq!(d.catalog().len(), 1);

    let symbol = Symbol::new(SymbolKind::Method, "CreateWidget")
        .with_documentation("<summary>New widget instance.</summary>");
    let findings = d.analyze(&symbol);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].fix.as_deref(), Some("<summary>Creates new widget instance.</summary>"));
}

#[test]
fn test_commented_out_code_in_trivia() {
    let heuristics = CodeHeuristics::with_known_types(["StringBuilder"]);
    let trivia = vec![
        CommentTrivia::block(
            "/* Old approach:\n   StringBuilder sb = new StringBuilder();\n*/",
            Location::new("Report.cs", 40, 9),
        ),
        CommentTrivia::line("// See https://example.com/docs for details.", Location::new("Report.cs", 50, 9)),
    ];
    let findings = dispatcher().analyze_trivia(&trivia, &heuristics);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].rule_id, "QL4001");
    assert_eq!(findings[0].location.line, 41);
}

#[test]
fn test_reporter_round_trip() {
    let symbol = Symbol::new(SymbolKind::Event, "Opened").with_documentation("<summary>Opened.</summary>");
    let findings = dispatcher().analyze(&symbol);
    let reporter = create_reporter("json").unwrap();
    let out = reporter.generate(&findings).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["findings"][0]["rule_id"], "QL2001");
    assert!(create_reporter("xml").is_none());
}
