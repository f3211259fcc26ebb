use courier::binding::ParameterMap;
use proptest::prelude::*;

#[test]
fn parses_pairs_in_order() {
    let map = ParameterMap::parse("name=alice&age=30&tag=a&tag=b");

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age", "tag"]);
    assert_eq!(map.first("name"), Some("alice"));
    assert_eq!(map.get("tag"), Some(&["a".to_string(), "b".to_string()][..]));
}

#[test]
fn repeated_delimiters_collapse() {
    assert_eq!(ParameterMap::parse("a=1&&b=2"), ParameterMap::parse("a=1&b=2"));
    assert_eq!(ParameterMap::parse("a==1"), ParameterMap::parse("a=1"));
    assert_eq!(ParameterMap::parse("a==1").get("a"), Some(&["1".to_string()][..]));
}

#[test]
fn key_without_equals_has_empty_value() {
    let map = ParameterMap::parse("flag&x=1");
    assert_eq!(map.get("flag"), Some(&[String::new()][..]));
    assert_eq!(map.first("x"), Some("1"));
}

#[test]
fn only_the_first_equals_run_splits() {
    let map = ParameterMap::parse("expr=a=b==c");
    assert_eq!(map.first("expr"), Some("a=b==c"));
}

#[test]
fn empty_segments_are_skipped() {
    assert!(ParameterMap::parse("").is_empty());
    assert!(ParameterMap::parse("&&&").is_empty());

    let map = ParameterMap::parse("&a=1&");
    assert_eq!(map.len(), 1);
    assert_eq!(map.first("a"), Some("1"));
}

#[test]
fn values_are_not_percent_decoded() {
    let map = ParameterMap::parse("q=hello%20world+x");
    assert_eq!(map.first("q"), Some("hello%20world+x"));
}

#[test]
fn absent_key_is_absent() {
    let map = ParameterMap::parse("a=1");
    assert!(!map.contains_key("b"));
    assert_eq!(map.get("b"), None);
}

#[test]
fn prefix_scan_keeps_order() {
    let map = ParameterMap::parse("user.name=a&other=1&user.age=2&user.name=b");
    assert_eq!(
        map.keys_with_prefix("user.").collect::<Vec<_>>(),
        vec!["user.name", "user.age"]
    );
}

#[test]
fn collects_from_pairs() {
    let map: ParameterMap = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
    assert_eq!(map.to_query_string(), "a=1&a=3&b=2");
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,6}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9%+.~-]{0,8}"
}

proptest! {
    #[test]
    fn reencoding_preserves_key_order_and_values(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 0..16)
    ) {
        let body = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let decoded = ParameterMap::parse(&body);
        let reparsed = ParameterMap::parse(&decoded.to_query_string());
        prop_assert_eq!(&reparsed, &decoded);

        let mut first_seen: Vec<&str> = Vec::new();
        for (key, _) in &pairs {
            if !first_seen.contains(&key.as_str()) {
                first_seen.push(key);
            }
        }
        prop_assert_eq!(reparsed.keys().collect::<Vec<_>>(), first_seen);

        for (key, values) in reparsed.iter() {
            let expected: Vec<&String> = pairs
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v)
                .collect();
            prop_assert_eq!(values.iter().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn delimiter_runs_are_idempotent(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 1..8),
        amps in 1usize..4,
        eqs in 1usize..4,
    ) {
        let single = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let repeated = pairs
            .iter()
            .map(|(key, value)| format!("{key}{}{value}", "=".repeat(eqs)))
            .collect::<Vec<_>>()
            .join(&"&".repeat(amps));

        prop_assert_eq!(ParameterMap::parse(&single), ParameterMap::parse(&repeated));
    }
}
