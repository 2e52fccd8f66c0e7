//! Tagged-template integration tests
//!
//! Exercises the public API the way the CLI and REPL use it.

use numerus_core::{
    Error, RenderOptions, SubstitutionPolicy, TaggedTemplate, assemble, from_roman, render,
    render_lines, to_roman,
};
use proptest::prelude::*;

#[test]
fn test_round_trip_classical_range() {
    for n in 1..=3999u64 {
        let numeral = to_roman(n);
        assert_eq!(from_roman(&numeral).unwrap(), n, "round trip of {}", numeral);
    }
}

#[test]
fn test_round_trip_beyond_classical_range() {
    for n in [4000u64, 4999, 10_000, 123_456] {
        assert_eq!(from_roman(&to_roman(n)).unwrap(), n);
    }
}

#[test]
fn test_zero_quirk_round_trips() {
    assert_eq!(to_roman(0), "");
    assert_eq!(from_roman("").unwrap(), 0);
}

#[test]
fn test_cats_templates() {
    let options = RenderOptions::default();

    let one = TaggedTemplate::new(["I have ", " cats."], [2u64]).unwrap();
    assert_eq!(assemble(&one, &options).unwrap(), "I have II cats.");

    let two =
        TaggedTemplate::new(["I have ", " cats. But my neighbour has ", ""], [2u64, 4]).unwrap();
    assert_eq!(
        assemble(&two, &options).unwrap(),
        "I have II cats. But my neighbour has IV"
    );
}

#[test]
fn test_render_from_source() {
    let options = RenderOptions::default();
    assert_eq!(
        render("romeNumerize`I have ${2} cats.`", &options).unwrap(),
        "I have II cats."
    );
    assert_eq!(
        render("I have ${2} cats. But my neighbour has ${4}", &options).unwrap(),
        "I have II cats. But my neighbour has IV"
    );
}

#[test]
fn test_non_numeric_with_sentinel_does_not_fail() {
    let options = RenderOptions::default().with_policy(SubstitutionPolicy::Sentinel);
    let out = render("I have ${lots} cats and ${3} dogs.", &options).unwrap();
    assert_eq!(out, "I have NaN cats and III dogs.");
}

#[test]
fn test_non_numeric_fail_closed_is_structured() {
    let err = render("I have ${lots} cats.", &RenderOptions::default()).unwrap_err();
    match err {
        Error::Substitution { index, source } => {
            assert_eq!(index, 0);
            assert_eq!(*source, Error::invalid_input("lots"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_options_from_toml() {
    let options: RenderOptions = toml::from_str(
        r#"
        policy = "sentinel"
        sentinel = "?"
        "#,
    )
    .unwrap();
    assert_eq!(options.policy, SubstitutionPolicy::Sentinel);
    assert_eq!(options.sentinel, "?");
    assert_eq!(options.max_value, RenderOptions::default().max_value);
}

#[test]
fn test_render_lines_mixed() {
    let results = render_lines("${10}\n`${10}`\nroman`${x}`\n", &RenderOptions::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_deref(), Ok("X"));
    assert_eq!(results[1].as_deref(), Ok("10"));
    assert!(results[2].is_err());
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.!?]{0,12}"
}

proptest! {
    #[test]
    fn test_output_keeps_outer_segments(
        segments in prop::collection::vec(segment(), 1..6),
        seed in prop::collection::vec(0u64..5000, 5),
    ) {
        let values: Vec<u64> = seed.into_iter().take(segments.len() - 1).collect();
        let first = segments[0].clone();
        let last = segments[segments.len() - 1].clone();

        let template = TaggedTemplate::new(segments, values).unwrap();
        let out = assemble(&template, &RenderOptions::default()).unwrap();

        prop_assert!(out.starts_with(&first));
        prop_assert!(out.ends_with(&last));
    }

    #[test]
    fn test_sentinel_never_fails_on_text(
        words in prop::collection::vec("[a-z]{1,6}", 1..4),
    ) {
        let options = RenderOptions::default().with_policy(SubstitutionPolicy::Sentinel);
        let segments = vec![String::new(); words.len() + 1];
        let template = TaggedTemplate::new(segments, words.clone()).unwrap();

        let out = assemble(&template, &options).unwrap();
        prop_assert_eq!(out, "NaN".repeat(words.len()));
    }

    #[test]
    fn test_length_mismatch_is_rejected(
        segments in 0usize..6,
        values in 0usize..6,
    ) {
        prop_assume!(segments != values + 1);
        let result = TaggedTemplate::new(vec![String::new(); segments], vec![1u64; values]);
        let is_malformed = matches!(result, Err(Error::MalformedTemplate { .. }));
        prop_assert!(is_malformed);
    }
}
