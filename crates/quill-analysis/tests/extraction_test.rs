//! Comment extraction: parsing, section lookup, flattening and rendering.

use quill_analysis::comments::*;
use quill_core::errors::{ExtractionError, QuillErrorCode};

#[test]
fn test_full_member_document() {
    let xml = r#"<?xml version="1.0"?>
<doc>
  <members>
    <member name="M:Acme.Cache.TryGet(System.String,System.Object@)">
      <summary>Attempts to get the <paramref name="key"/> entry.</summary>
      <param name="key">The key.</param>
      <param name="value">On successful return, contains the value.</param>
      <returns><see langword="true"/> if found; otherwise, <see langword="false"/>.</returns>
    </member>
  </members>
</doc>"#;
    let parsed = parse_document(xml);
    assert!(parsed.malformed.is_empty());

    let sections = Sections::extract(&parsed.comment);
    assert_eq!(sections.len(), 4);
    assert_eq!(sections.with_tag(&SectionTag::Param).count(), 2);

    let summary = sections.summary().unwrap();
    assert_eq!(
        flatten(&summary.element, &FlattenOptions::default()),
        "Attempts to get the entry."
    );
    let value = sections.param("value").unwrap();
    assert_eq!(value.key.to_string(), "param[value]");
}

#[test]
fn test_malformed_exception_keeps_siblings() {
    let xml = "<summary>Gets the value.</summary>\n\
               <exception cref=\"T:System.InvalidOperationException\">Broken <b>markup</exception>\n\
               <param name=\"x\">The x.</param>";
    let parsed = parse_document(xml);
    assert_eq!(parsed.malformed.len(), 1);
    match &parsed.malformed[0] {
        ExtractionError::MalformedSection { tag, key, .. } => {
            assert_eq!(tag, "exception");
            assert_eq!(key.as_deref(), Some("T:System.InvalidOperationException"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(parsed.malformed[0].error_code(), "MALFORMED_SECTION");

    let sections = Sections::extract(&parsed.comment);
    assert!(sections.summary().is_some());
    assert!(sections.param("x").is_some());
    assert_eq!(sections.with_tag(&SectionTag::Exception).count(), 0);
}

#[test]
fn test_garbage_input_is_not_a_crash() {
    let parsed = parse_document("<<<not xml at all");
    assert!(parsed.comment.is_empty());
    assert!(matches!(parsed.malformed.as_slice(), [ExtractionError::InvalidDocument(_)]));
}

#[test]
fn test_exception_keys_ignore_doc_id_prefix() {
    let parsed = parse_document(
        r#"<exception cref="T:System.ArgumentException">A</exception><exception cref="System.ArgumentException">B</exception>"#,
    );
    let sections = Sections::extract(&parsed.comment);
    assert_eq!(sections.all(&SectionKey::exception("System.ArgumentException")).len(), 2);
}

#[test]
fn test_flatten_modes() {
    let parsed = parse_document(
        r#"<summary>Identifies the <see cref="P:Acme.Widget.IsOpen"/> dependency property.</summary>"#,
    );
    let (_, summary) = parsed.comment.elements().next().unwrap();
    assert_eq!(
        flatten(summary, &FlattenOptions::default()),
        "Identifies the dependency property."
    );
    assert_eq!(
        flatten(summary, &FlattenOptions::with_markup(MarkupRendering::Sentinel, "#")),
        "Identifies the # dependency property."
    );
    assert_eq!(
        flatten(summary, &FlattenOptions::with_markup(MarkupRendering::Verbatim, "#")),
        "Identifies the <see cref=\"P:Acme.Widget.IsOpen\"/> dependency property."
    );
}

#[test]
fn test_render_reparses_to_same_tree() {
    let xml = "<summary>\n    Gets a &lt;b&gt; value &amp; more.\n    </summary>\n<remarks><para>One.</para><c>x</c></remarks>";
    let first = parse_document(xml).comment;
    let second = parse_document(&render(&first)).comment;
    assert_eq!(first, second);
}

#[test]
fn test_words() {
    assert_eq!(first_word("  Gets the value."), Some("Gets"));
    assert_eq!(word_at("Gets or sets the value.", 2), Some("sets"));
    assert_eq!(strip_async_prefix("Asynchronously loads the file."), "loads the file.");
    assert_eq!(first_word(""), None);
}
