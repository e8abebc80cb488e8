//! Pipeline tests across the pattern cascade, resolver, and fragmenter.

use super::*;

fn concat(nodes: &[ContentNode]) -> String {
    nodes.iter().map(|n| n.text()).collect()
}

fn year_of(span: &Span) -> i32 {
    span.year_info().expect("expected a year span").year
}

// === Scenario: decade matches carry the decade's leading number ===
#[test]
fn decade_span_parses_leading_number() {
    let spans = detect_years("1850s");
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.text, "1850s");
    assert_eq!((span.start, span.end), (0, 5));
    let info = span.year_info().unwrap();
    assert_eq!(info.year, 1850);
    assert!(info.is_decade);
    assert!(!info.is_bc_era);
}

// === Scenario: era-marked years are stored negated ===
#[test]
fn bc_era_span_negates_magnitude() {
    let spans = detect_years("500 BCE");
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.text, "500 BCE");
    assert_eq!(year_of(span), -500);
    assert!(span.year_info().unwrap().is_bc_era);

    let spans = detect_years("44 BC");
    assert_eq!(spans.len(), 1);
    assert_eq!(year_of(&spans[0]), -44);
}

#[test]
fn era_markers_are_case_insensitive() {
    assert_eq!(year_of(&detect_years("300 aec")[0]), -300);
    assert_eq!(year_of(&detect_years("1200 a.C.")[0]), -1200);
    assert_eq!(year_of(&detect_years("753bc")[0]), -753);
}

// === Scenario: a mixed-case era marker is a year, never also a place ===
#[test]
fn mixed_case_era_marker_is_not_claimed_as_place() {
    let text = "Caesar died in 44 Bce after the wars.";
    let nodes = annotate(text);
    assert_eq!(concat(&nodes), text);

    let places: Vec<&str> = nodes
        .iter()
        .filter_map(|n| match n {
            ContentNode::Place(span) => Some(span.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(places, ["Caesar"]);

    let years: Vec<i32> = nodes
        .iter()
        .filter_map(|n| match n {
            ContentNode::Year(span) => span.year_info().map(|info| info.year),
            _ => None,
        })
        .collect();
    assert_eq!(years, [-44]);

    // Same shape with the other capitalizable marker.
    let spans = detect("300 Aec");
    assert_eq!(spans.len(), 1);
    assert!(spans[0].is_year());
}

// === Scenario: numeric bounds are enforced per pass ===
#[test]
fn year_bounds() {
    // Future years are not annotated.
    assert!(detect_years("2026").is_empty());
    assert_eq!(year_of(&detect_years("2025")[0]), 2025);

    // Plain-year floor.
    assert_eq!(year_of(&detect_years("-10000")[0]), -10000);
    assert!(detect_years("-10001").is_empty());

    // Era magnitude ceiling.
    assert_eq!(year_of(&detect_years("10000 BC")[0]), -10000);
    assert!(detect_years("20000 BC")
        .iter()
        .all(|s| !s.year_info().unwrap().is_bc_era));

    // Decade ceiling: "2030s" is neither a decade nor a plain year.
    assert!(detect_years("2030s").is_empty());
}

// === Scenario: the plain-year pass is shadowed by higher-priority passes ===
#[test]
fn plain_year_yields_to_era_span() {
    let spans = detect_years("Rome fell long after 500 BCE and rose by 1850");
    assert_eq!(spans.len(), 2);
    let years: Vec<i32> = spans.iter().map(year_of).collect();
    assert!(years.contains(&-500));
    assert!(years.contains(&1850));
}

#[test]
fn digits_glued_to_letters_are_not_years() {
    assert!(detect_years("ISO8601 and A1234B").is_empty());
}

#[test]
fn leading_minus_needs_its_own_boundary() {
    let spans = detect_years("at -500 exactly");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "-500");
    assert_eq!(year_of(&spans[0]), -500);

    // A minus glued to a word is a hyphen, not a sign.
    let spans = detect_years("route-66 runs west");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "66");
    assert_eq!(year_of(&spans[0]), 66);
}

// === Scenario: multi-word place names come out as one span ===
#[test]
fn multi_word_place_is_single_span() {
    let spans = detect_places("New York City");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "New York City");
    assert_eq!((spans[0].start, spans[0].end), (0, 13));
}

#[test]
fn linking_particles_join_place_words() {
    let spans = detect_places("from Rio de Janeiro southward");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "Rio de Janeiro");
}

#[test]
fn place_never_ends_on_a_particle() {
    let spans = detect_places("Paris in the spring");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "Paris");
}

#[test]
fn place_continuation_caps_at_four_tokens() {
    let spans = detect_places("Alpha Bravo Charlie Delta Echo");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "Alpha Bravo Charlie Delta");
    assert_eq!(spans[1].text, "Echo");
}

#[test]
fn sentence_starters_do_not_begin_places() {
    assert!(detect_places("Visit somewhere warm").is_empty());
    assert!(detect_places("This and That").is_empty());
    // ...but a real place after a starter still matches.
    let spans = detect_places("Visit Lisbon");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "Lisbon");
}

#[test]
fn punctuation_splits_place_candidates() {
    let spans = detect_places("Paris, France");
    let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Paris", "France"]);
}

// === Scenario: empty and whitespace-only input is the valid no-op case ===
#[test]
fn blank_input_yields_no_candidates() {
    assert!(detect("").is_empty());
    assert!(detect("   \n\t  ").is_empty());
    assert_eq!(annotate(""), vec![ContentNode::Text(String::new())]);
}

// === Scenario: resolve returns spans sorted by start, non-overlapping ===
#[test]
fn resolve_sorts_by_start() {
    let text = "Napoleon reached Moscow in 1812";
    let mut candidates = detect(text);
    candidates.reverse();
    let resolved = resolve(candidates);
    let starts: Vec<usize> = resolved.iter().map(|s| s.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    let spans: Vec<&Span> = resolved.iter().collect();
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

// === Scenario: fragmenting round-trips the source text exactly ===
#[test]
fn fragment_round_trip() {
    let samples = [
        "Visit Paris in the 1920s.",
        "The siege of Carthage ended in 146 BC, long before 1850.",
        "Nothing to annotate here.",
        "1066 1066 1066",
        "Café society thrived in Wien around the 1900s",
        "",
        "   spaced   out   500 BCE   ",
    ];
    for text in samples {
        let nodes = annotate(text);
        assert_eq!(concat(&nodes), text, "round-trip failed for {text:?}");
    }
}

#[test]
fn fragment_empty_spans_short_circuits() {
    let nodes = fragment("unchanged", &resolve(Vec::new()));
    assert_eq!(nodes, vec![ContentNode::Text("unchanged".to_string())]);
}

// === Scenario: a full sentence fragments into plain and annotated runs ===
#[test]
fn end_to_end_sentence() {
    let nodes = annotate("Visit Paris in the 1920s.");
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes[0], ContentNode::Text("Visit ".to_string()));
    match &nodes[1] {
        ContentNode::Place(span) => assert_eq!(span.text, "Paris"),
        other => panic!("expected place node, got {other:?}"),
    }
    assert_eq!(nodes[2], ContentNode::Text(" in the ".to_string()));
    match &nodes[3] {
        ContentNode::Year(span) => {
            assert_eq!(span.text, "1920s");
            let info = span.year_info().unwrap();
            assert_eq!(info.year, 1920);
            assert!(info.is_decade);
        }
        other => panic!("expected year node, got {other:?}"),
    }
    assert_eq!(nodes[4], ContentNode::Text(".".to_string()));
}

// === Scenario: the decade scanner agrees with its regex equivalent ===
#[test]
fn decade_scanner_matches_regex_equivalent() {
    let re = regex_lite::Regex::new(r"\b([0-9]{2,4})s\b").unwrap();
    let corpus = "In the 1850s and again in the 90s, but not in 12345s, \
                  nor x1850s, nor 1850sx; the 2020s close the range.";
    let expected: Vec<(usize, usize)> = re
        .find_iter(corpus)
        .map(|m| (m.start(), m.end()))
        .collect();
    let actual: Vec<(usize, usize)> = detect_years(corpus)
        .into_iter()
        .filter(|s| s.year_info().unwrap().is_decade)
        .map(|s| (s.start, s.end))
        .collect();
    assert_eq!(actual, expected);
}
