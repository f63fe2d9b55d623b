//! End-to-end parser tests against DTD sources
//!
//! Covers the ordering, accumulation and substitution guarantees of the parser, plus the
//! best-effort handling of malformed input.

use dtdbind_parser::{parse_file, parse_str, AttributeDefault, AttributeType, ParseError};
use rstest::rstest;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_catalog_fixture_declaration_order() {
    let result = parse_file(fixture_path("catalog.dtd")).expect("fixture parses");
    assert_eq!(
        result.order,
        vec![
            "catalog",
            "listing",
            "address",
            "street",
            "suburb",
            "postcode",
            "price",
            "feature",
            "photo",
            "floorplan",
            "agent",
            "name",
            "phone",
            "notes",
            "description",
            "em",
            "strong",
        ]
    );
    assert_eq!(result.elements.len(), result.order.len());
}

#[test]
fn test_catalog_fixture_attributes() {
    let result = parse_file(fixture_path("catalog.dtd")).expect("fixture parses");

    let listing = result.get("listing").expect("listing declared");
    let names: Vec<_> = listing.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["status", "id", "lang", "agent-refs"]);
    assert!(listing.attributes[0].is_required());
    assert_eq!(listing.attributes[0].declared_type, AttributeType::Enumerated);
    assert_eq!(listing.attributes[2].default_value(), Some("en"));
    assert!(listing.attributes[3].declared_type.is_multi_valued());

    let catalog = result.get("catalog").expect("catalog declared");
    assert_eq!(
        catalog.attributes[0].default,
        AttributeDefault::Fixed("2.1".into())
    );
    assert_eq!(catalog.attributes[1].default, AttributeDefault::Implied);

    let price = result.get("price").expect("price declared");
    assert_eq!(price.attributes[0].default_value(), Some("AUD"));
}

#[test]
fn test_catalog_fixture_content_models() {
    let result = parse_file(fixture_path("catalog.dtd")).expect("fixture parses");
    assert_eq!(
        result.get("listing").map(|e| e.content.as_str()),
        Some("(address, price?, feature*, (photo | floorplan)*)")
    );
    assert_eq!(
        result.get("agent").map(|e| e.content.as_str()),
        Some("(name, phone?)")
    );
    assert_eq!(result.get("notes").map(|e| e.content.as_str()), Some("ANY"));
}

#[test]
fn test_declaration_split_across_lines() {
    let result = parse_str("<!ELEMENT book\n  (title,\n   author+)\n>");
    assert_eq!(
        result.get("book").map(|e| e.content.as_str()),
        Some("(title, author+)")
    );
}

#[test]
fn test_distilled_entity_example() {
    let result = parse_str(
        "<!ENTITY % e \"status ( a | b ) #REQUIRED\">\n<!ELEMENT x EMPTY>\n<!ATTLIST x %e;>",
    );
    let x = result.get("x").expect("x declared");
    assert_eq!(x.attributes.len(), 1);
    assert_eq!(x.attributes[0].name, "status");
    assert!(x.attributes[0].is_required());
    assert_eq!(x.attributes[0].declared_type, AttributeType::Enumerated);
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n\n\t\n")]
#[case::single_comment("<!-- nothing to see -->")]
#[case::multi_line_comment("<!--\n<!ELEMENT hidden EMPTY>\n-->")]
#[case::entities_only("<!ENTITY % e \"id ID #REQUIRED\">")]
fn test_inputs_without_elements(#[case] source: &str) {
    let result = parse_str(source);
    assert!(result.is_empty());
    assert!(result.elements.is_empty());
}

#[rstest]
#[case::no_content("<!ELEMENT a>")]
#[case::unterminated("<!ELEMENT a (b, c")]
#[case::entity_name("<!ELEMENT %name; EMPTY>")]
#[case::notation("<!NOTATION gif SYSTEM \"gif\">")]
fn test_malformed_declarations_are_dropped(#[case] source: &str) {
    let result = parse_str(&format!("{}\n<!ELEMENT ok EMPTY>", source));
    assert_eq!(result.order, vec!["ok"]);
}

#[test]
fn test_parse_file_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "<!ELEMENT note (to, body)>").expect("write");
    writeln!(file, "<!ELEMENT to (#PCDATA)>").expect("write");

    let result = parse_file(file.path()).expect("temp file parses");
    assert_eq!(result.order, vec!["note", "to"]);
}

#[test]
fn test_parse_file_reports_unreadable_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.dtd");

    match parse_file(&missing) {
        Err(ParseError::Open { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected open error, got {:?}", other),
    }
}

#[test]
fn test_parse_file_tolerates_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(
        b"<!ELEMENT a EMPTY>\r\n<!-- caf\xe9 -->\n<!ELEMENT b (#PCDATA)>\n\xff\xfe\n\
          <!ATTLIST b lang CDATA \"fran\xe7ais\">\n",
    )
    .expect("write");

    let result = parse_file(file.path()).expect("non-UTF-8 bytes are not fatal");
    assert_eq!(result.order, vec!["a", "b"]);
    assert_eq!(result.get("a").map(|e| e.content.as_str()), Some("EMPTY"));

    let b = result.get("b").expect("b declared");
    assert_eq!(b.attributes.len(), 1);
    assert_eq!(b.attributes[0].name, "lang");
}
