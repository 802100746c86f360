//! Integration tests for InsensitiveMap.
//!
//! Covers the observable behavior of the public API: equivalence of key
//! spellings, original-key bookkeeping, deep wrapping, merges in and out of
//! safe mode, defaults, and conversion back to plain mappings.

use insensitive_map::{
    InsensitiveMap, InsensitiveMapError, Key, Options, PlainMap, Value, insensitive_map,
    plain_map,
};
use rstest::rstest;

// =============================================================================
// Key equivalence
// =============================================================================

#[rstest]
#[case("foo_bar")]
#[case("FOO_BAR")]
#[case("Foo Bar")]
#[case("foo bar")]
fn test_equivalent_spellings_reach_the_same_entry(#[case] spelling: &str) {
    let mut map = InsensitiveMap::new();
    map.set("Foo Bar", 1);
    assert_eq!(map.get(spelling), Some(&Value::Integer(1)));
    assert!(map.has_key(spelling));
}

#[rstest]
fn test_symbol_and_text_keys_are_interchangeable() {
    let mut map = InsensitiveMap::new();
    map.set(Key::symbol("Status Code"), 200);
    assert_eq!(map.get("status_code"), Some(&Value::Integer(200)));
    assert_eq!(map.get(Key::symbol("STATUS_CODE")), Some(&Value::Integer(200)));
}

#[rstest]
fn test_hyphen_is_not_equivalent_to_underscore() {
    let mut map = InsensitiveMap::new();
    map.set("content-type", 1);
    assert!(!map.has_key("content_type"));
}

// =============================================================================
// Original key bookkeeping
// =============================================================================

#[rstest]
fn test_last_write_wins_on_original_key() {
    let mut map = InsensitiveMap::new();
    map.set("Foo", 1);
    map.set("FOO", 2);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("foo"), Some(&Value::Integer(2)));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec![&Key::from("FOO")]);
}

#[rstest]
fn test_registry_matches_entries() {
    let mut map = InsensitiveMap::new();
    map.set("A b", 1);
    map.set(Key::symbol("C"), 2);
    map.set(3, 3);
    map.delete("a_B");

    let registry: Vec<_> = map.key_registry().collect();
    assert_eq!(
        registry,
        vec![
            (&Key::from("c"), &Key::symbol("C")),
            (&Key::Integer(3), &Key::Integer(3)),
        ]
    );
    assert_eq!(registry.len(), map.len());
}

#[rstest]
fn test_lookup_key_resolves_to_original() {
    let map = insensitive_map! { "X-Request Id" => "abc" };
    assert_eq!(map.lookup_key("x-request_id"), Key::from("X-Request Id"));
    assert_eq!(map.lookup_key("unknown"), Key::from("unknown"));
}

// =============================================================================
// Deep wrapping
// =============================================================================

#[rstest]
fn test_nested_mapping_is_insensitive() {
    let mut map = InsensitiveMap::new();
    map.set("outer", plain_map! { "Inner Key" => 1 });

    let nested = map.get("OUTER").and_then(Value::as_map).unwrap();
    assert_eq!(nested.get("inner_key"), Some(&Value::Integer(1)));
}

#[rstest]
fn test_sequence_of_mappings_is_wrapped_in_order() {
    let mut map = InsensitiveMap::new();
    map.set(
        "list",
        vec![plain_map! { "A" => 1 }, plain_map! { "B" => 2 }],
    );

    let items = map["list"].as_sequence().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("a"), Some(&Value::Integer(1)));
    assert_eq!(items[0].get("b"), None);
    assert_eq!(items[1].get("b"), Some(&Value::Integer(2)));
    assert!(items.iter().all(|item| matches!(item, Value::Map(_))));
}

#[rstest]
fn test_deeply_nested_structure() {
    let map = insensitive_map! {
        "Level One" => plain_map! {
            "Level Two" => vec![
                Value::from(plain_map! { "Level Three" => plain_map! { "Leaf" => true } }),
            ],
        },
    };

    let leaf = map["level_one"]
        .get("LEVEL_TWO")
        .and_then(Value::as_sequence)
        .and_then(|items| items[0].get("level three"))
        .and_then(|level| level.get("LEAF"));
    assert_eq!(leaf, Some(&Value::Boolean(true)));
}

#[rstest]
fn test_stored_values_never_hold_plain_maps() {
    fn contains_plain(value: &Value) -> bool {
        match value {
            Value::Plain(_) => true,
            Value::Sequence(items) => items.iter().any(contains_plain),
            Value::Map(map) => map.values().any(contains_plain),
            _ => false,
        }
    }

    let map = insensitive_map! {
        "a" => plain_map! { "b" => vec![plain_map! { "c" => plain_map! {} }] },
        "d" => vec![vec![plain_map! { "e" => 1 }]],
    };
    assert!(!map.values().any(contains_plain));
}

// =============================================================================
// Safe mode
// =============================================================================

#[rstest]
fn test_safe_mode_rejects_clash_atomically() {
    let mut map = InsensitiveMap::new();
    map.set_safe_mode(true);
    map.set("existing", 0);

    let result = map.merge_in(plain_map! { "Foo" => 1, "foo" => 2 });
    match result {
        Err(InsensitiveMapError::KeyClash(clash)) => {
            assert_eq!(clash.first, Key::from("Foo"));
            assert_eq!(clash.second, Key::from("foo"));
        }
        other => panic!("expected a key clash, got {other:?}"),
    }

    assert_eq!(map.len(), 1);
    assert!(!map.has_key("foo"));
}

#[rstest]
fn test_unsafe_mode_resolves_clash_to_last_key() {
    let mut map = InsensitiveMap::new();
    map.merge_in(plain_map! { "Foo" => 1, "foo" => 2 }).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.keys().next(), Some(&Key::from("foo")));
    assert_eq!(map.get("FOO"), Some(&Value::Integer(2)));
}

#[rstest]
fn test_safe_mode_is_inherited_at_assignment() {
    let mut child = InsensitiveMap::new();
    child.set("x", 1);
    assert!(!child.is_safe_mode());

    let mut parent = InsensitiveMap::with_options(Options::new().safe_mode(true));
    parent.set("child", child);
    assert!(parent["child"].as_map().unwrap().is_safe_mode());

    // Nested maps keep the mode they were stored with.
    parent.set_safe_mode(false);
    assert!(parent["child"].as_map().unwrap().is_safe_mode());
}

#[rstest]
fn test_safe_mode_nested_map_rejects_its_own_clashes() {
    let mut parent = InsensitiveMap::with_options(Options::new().safe_mode(true));
    parent.set("child", plain_map! { "a" => 1 });

    let child = parent.get_map_mut("CHILD").unwrap();
    assert!(child.merge_in(plain_map! { "K" => 1, "k" => 2 }).is_err());
    assert_eq!(child.len(), 1);
}

#[rstest]
#[case(Value::Integer(1), "integer")]
#[case(Value::from("true"), "text")]
#[case(Value::Nil, "nil")]
fn test_invalid_mode_value(#[case] value: Value, #[case] found: &'static str) {
    let mut map = InsensitiveMap::new();
    assert_eq!(
        map.set_safe_mode_from(&value),
        Err(InsensitiveMapError::InvalidModeValue { found })
    );
    assert!(!map.is_safe_mode());
}

// =============================================================================
// Merges
// =============================================================================

#[rstest]
fn test_merge_is_pure() {
    let map = insensitive_map! { "Keep" => 1 };
    let before = map.clone();
    let registry_before: Vec<(Key, Key)> = map
        .key_registry()
        .map(|(normalized, original)| (normalized.clone(), original.clone()))
        .collect();

    let merged = map
        .merge(plain_map! { "KEEP" => 2, "Added" => 3 })
        .unwrap();

    assert_eq!(map, before);
    let registry_after: Vec<(Key, Key)> = map
        .key_registry()
        .map(|(normalized, original)| (normalized.clone(), original.clone()))
        .collect();
    assert_eq!(registry_before, registry_after);
    assert_eq!(merged.get("keep"), Some(&Value::Integer(2)));
    assert_eq!(merged.original_key(&Key::from("keep")), Some(&Key::from("KEEP")));
}

#[rstest]
fn test_merge_recursive_builds_nested_maps() {
    let mut map = InsensitiveMap::new();
    map.merge_recursive(plain_map! {
        "Outer" => plain_map! { "Middle" => plain_map! { "Inner" => 1 } },
    })
    .unwrap();

    assert_eq!(
        map["outer"].get("middle").and_then(|middle| middle.get("INNER")),
        Some(&Value::Integer(1))
    );
}

#[rstest]
fn test_merge_in_returns_self_for_chaining() {
    let mut map = InsensitiveMap::new();
    map.merge_in(plain_map! { "a" => 1 })
        .unwrap()
        .merge_in(plain_map! { "b" => 2 })
        .unwrap();
    assert_eq!(map.len(), 2);
}

// =============================================================================
// Defaults and required lookups
// =============================================================================

#[rstest]
fn test_default_value_on_miss_only() {
    let mut map = InsensitiveMap::new();
    map.set("Present", Value::Nil);
    map.set_default("fallback");

    assert_eq!(map.lookup("present").as_deref(), Some(&Value::Nil));
    assert_eq!(map.lookup("absent").as_deref(), Some(&Value::from("fallback")));
    assert!(!map.has_key("absent"));
}

#[rstest]
fn test_default_producer_receives_requested_key() {
    let mut map = InsensitiveMap::new();
    map.set_default_producer(|key: &Key| Value::from(format!("missing {key}")));

    assert_eq!(
        map.lookup(Key::symbol("Name")).as_deref(),
        Some(&Value::from("missing :Name"))
    );
}

#[rstest]
fn test_values_at_applies_default() {
    let mut map = insensitive_map! { "a" => 1 };
    map.set_default(0);

    let values: Vec<Value> = map
        .values_at(["A", "b"])
        .into_iter()
        .map(|value| value.map(|value| value.into_owned()).unwrap_or(Value::Nil))
        .collect();
    assert_eq!(values, vec![Value::Integer(1), Value::Integer(0)]);
}

#[rstest]
fn test_fetch_ignores_default() {
    let mut map = InsensitiveMap::new();
    map.set_default(0);
    assert!(matches!(
        map.fetch("missing"),
        Err(InsensitiveMapError::KeyNotFound { .. })
    ));
}

// =============================================================================
// Conversion
// =============================================================================

#[rstest]
fn test_to_plain_mapping_round_trip() {
    let source: PlainMap = plain_map! {
        "Alpha" => 1,
        "alpha" => 2,
        "Beta Gamma" => "x",
        7 => false,
    };
    let map = InsensitiveMap::from_plain(source.clone());
    let plain = map.to_plain_mapping();

    assert_eq!(plain.len(), 3);
    assert_eq!(plain.get(&Key::from("alpha")), Some(&Value::Integer(2)));
    assert_eq!(plain.get(&Key::from("Alpha")), None);
    assert_eq!(plain.get(&Key::from("Beta Gamma")), Some(&Value::from("x")));
    assert_eq!(plain.get(&Key::Integer(7)), Some(&Value::Boolean(false)));

    for (key, value) in &plain {
        assert_eq!(map.get(key), Some(value));
    }
}

#[rstest]
#[should_panic(expected = "no entry found for key")]
fn test_index_panics_on_missing_key() {
    let map = InsensitiveMap::new();
    let _ = &map["missing"];
}
