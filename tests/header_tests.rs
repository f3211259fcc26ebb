use courier::header::{ContentType, Header};

#[test]
fn lookups_ignore_case() {
    let mut header = Header::new();
    header.put("content-type", "application/json");

    assert_eq!(header.get("Content-Type"), Some("application/json"));
    assert_eq!(header.get("CONTENT-TYPE"), Some("application/json"));
    assert!(header.contains("Content-type"));
    assert_eq!(header.len(), 1);
}

#[test]
fn put_replaces_and_append_accumulates() {
    let mut header = Header::new();
    header.append("X-Trace", "a");
    header.append("x-trace", "b");
    assert_eq!(header.get_all("X-Trace"), ["a".to_string(), "b".to_string()]);

    header.put("X-TRACE", "c");
    assert_eq!(header.get_all("x-trace"), ["c".to_string()]);
}

#[test]
fn iteration_keeps_first_insertion_order_and_canonical_names() {
    let mut header = Header::new();
    header.put("x-request-id", "42");
    header.set_content_type("application/url");
    header.append("accept", "text/plain");
    header.append("accept", "application/json");
    // Replacing keeps the original position
    header.put("X-Request-Id", "43");

    let fields: Vec<(&str, &str)> = header.iter().collect();
    assert_eq!(
        fields,
        vec![
            ("X-Request-Id", "43"),
            ("Content-Type", "application/url"),
            ("Accept", "text/plain"),
            ("Accept", "application/json"),
        ]
    );
}

#[test]
fn remove_drops_every_value() {
    let mut header = Header::new();
    header.append("Via", "a");
    header.append("Via", "b");

    assert_eq!(header.remove("VIA"), Some(vec!["a".to_string(), "b".to_string()]));
    assert!(header.is_empty());
    assert_eq!(header.get("Via"), None);
    assert!(header.get_all("Via").is_empty());
}

#[test]
fn content_type_accessors_parse_charset() {
    let mut header = Header::new();
    header.set_content_type("Application/JSON; charset=\"UTF-8\"");

    assert_eq!(header.content_type_raw(), Some("Application/JSON; charset=\"UTF-8\""));
    assert_eq!(
        header.content_type(),
        Some(ContentType {
            essence: "application/json".into(),
            charset: Some("UTF-8".into()),
        })
    );
}

#[test]
fn content_type_without_parameters() {
    let parsed = ContentType::parse("image/png");
    assert_eq!(parsed.essence, "image/png");
    assert_eq!(parsed.charset, None);
    assert!(parsed.is_type("image/"));
    assert_eq!(parsed.to_string(), "image/png");
}

#[test]
fn content_disposition_accessors() {
    let mut header = Header::new();
    assert_eq!(header.content_disposition(), None);

    header.set_content_disposition("attachment; filename=report.pdf");
    assert_eq!(
        header.get("content-disposition"),
        Some("attachment; filename=report.pdf")
    );
}
