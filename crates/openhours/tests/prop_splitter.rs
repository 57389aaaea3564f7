//! Property-based tests for layout splitting using proptest.
//!
//! Layouts are generated from a token soup of weekdays, times, separators and
//! noise, so many of them are malformed. The properties must hold regardless.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use openhours::Splitter;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_weekday() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Mo"),
        Just("Tu"),
        Just("We"),
        Just("Th"),
        Just("Fr"),
        Just("Sa"),
        Just("Su"),
        Just("mo"),
        Just("SU"),
        Just("tH"),
    ]
    .prop_map(str::to_string)
}

fn arb_time() -> impl Strategy<Value = String> {
    (0u32..=24, 0u32..=59).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}

fn arb_range() -> impl Strategy<Value = String> {
    (arb_time(), arb_time()).prop_map(|(a, b)| format!("{}-{}", a, b))
}

fn arb_noise() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-"),
        Just(","),
        Just(";"),
        Just(" "),
        Just("*"),
        Just("foo"),
        Just("24/7"),
        Just("0"),
    ]
    .prop_map(str::to_string)
}

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_weekday(),
        3 => arb_range(),
        1 => arb_time(),
        2 => arb_noise(),
    ]
}

fn arb_layout() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_token(), 0..12).prop_map(|tokens| tokens.join(" "))
}

/// A well-formed layout: day groups each followed by one or more ranges.
fn arb_valid_layout() -> impl Strategy<Value = String> {
    let rule = (
        prop::collection::vec(arb_weekday(), 1..3),
        prop::collection::vec(arb_range(), 1..3),
    )
        .prop_map(|(days, ranges)| format!("{} {}", days.join(","), ranges.join(" ")));
    prop::collection::vec(rule, 1..4).prop_map(|rules| rules.join("; "))
}

const DAY_TOKENS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// A rule of a well-formed layout: weekday indices (Monday is 0) and
/// `((open_h, open_m), (close_h, close_m))` ranges.
type Rule = (Vec<usize>, Vec<((u32, u32), (u32, u32))>);

fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    let time = (0u32..=24, 0u32..=59);
    let rule = (
        prop::collection::vec(0usize..7, 1..3),
        prop::collection::vec((time.clone(), time), 1..4),
    );
    prop::collection::vec(rule, 1..4)
}

fn render(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|(days, ranges)| {
            let days: Vec<&str> = days.iter().map(|&d| DAY_TOKENS[d]).collect();
            let ranges: Vec<String> = ranges
                .iter()
                .map(|&((h1, m1), (h2, m2))| format!("{:02}:{:02}-{:02}:{:02}", h1, m1, h2, m2))
                .collect();
            format!("{} {}", days.join(","), ranges.join(" "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Brute force: is `reference` inside any written `[open, close)` range on
/// its weekday? A closing 00:00 or 24:xx means 23:59.
fn inside_any_range(rules: &[Rule], reference: &DateTime<Utc>) -> bool {
    let day = reference.weekday().num_days_from_monday() as usize;
    let now = reference.hour() * 60 + reference.minute();
    rules
        .iter()
        .filter(|(days, _)| days.contains(&day))
        .flat_map(|(_, ranges)| ranges)
        .any(|&((h1, m1), (h2, m2))| {
            let open = h1 * 60 + m1;
            let close = match (h2, m2) {
                (0, 0) | (24, _) => 23 * 60 + 59,
                _ => h2 * 60 + m2,
            };
            open <= now && now < close
        })
}

/// Reference instants in 2020-2030 with whole minutes. The last minute of
/// the day is excluded: 23:59 is the latest closing boundary, and a range is
/// closed at its closing instant.
fn arb_reference() -> impl Strategy<Value = DateTime<Utc>> {
    (2020i32..=2030, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59)
        .prop_filter("23:59 is always closed", |&(_, _, _, h, m)| (h, m) != (23, 59))
        .prop_map(|(y, mo, d, h, mi)| Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Split and Match always agree, including on errors
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn split_and_match_agree(layout in arb_layout(), reference in arb_reference()) {
        let mut splitter = Splitter::new(reference);
        let split = splitter.split(&layout).map(|s| s.is_open());
        let matched = splitter.matches(&layout);
        prop_assert_eq!(split, matched, "layout {:?}", layout);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Output is sorted and of even length
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_sorted_and_even(layout in arb_layout(), reference in arb_reference()) {
        let mut splitter = Splitter::new(reference);
        if let Ok(split) = splitter.split(&layout) {
            let boundaries = split.boundaries();
            prop_assert_eq!(boundaries.len() % 2, 0);
            for pair in boundaries.windows(2) {
                prop_assert!(pair[0].at <= pair[1].at, "not sorted: {:?}", layout);
            }
            if let Some(i) = split.match_index() {
                prop_assert!(boundaries[i].closing);
                prop_assert!(boundaries[i].at > reference);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Reusing a splitter never changes the answer
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reuse_is_idempotent(
        first in arb_layout(),
        layout in arb_layout(),
        reference in arb_reference(),
    ) {
        let mut fresh = Splitter::new(reference);
        let expected = fresh.split(&layout).map(|s| s.boundaries().to_vec());

        let mut reused = Splitter::new(reference);
        let _ = reused.split(&first);
        let _ = reused.matches(&first);
        let actual = reused.split(&layout).map(|s| s.boundaries().to_vec());

        prop_assert_eq!(expected, actual);
    }
}

// ---------------------------------------------------------------------------
// Property 4: 24/7 is open at every reference instant
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn full_week_is_always_open(reference in arb_reference()) {
        let mut splitter = Splitter::new(reference);
        let split = splitter.split("24/7").unwrap();
        prop_assert_eq!(split.boundaries().len(), 14);
        prop_assert!(split.is_open());
        prop_assert!(splitter.matches("24/7").unwrap());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Well-formed layouts never fail
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn well_formed_layouts_parse(layout in arb_valid_layout(), reference in arb_reference()) {
        let mut splitter = Splitter::new(reference);
        prop_assert!(splitter.split(&layout).is_ok(), "layout {:?}", layout);
    }
}

// ---------------------------------------------------------------------------
// Property 6: The verdict matches a brute-force range check
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn verdict_matches_written_ranges(rules in arb_rules(), reference in arb_reference()) {
        let layout = render(&rules);
        let expected = inside_any_range(&rules, &reference);

        let mut splitter = Splitter::new(reference);
        let split = splitter.split(&layout).unwrap();
        prop_assert_eq!(split.is_open(), expected, "split {:?} at {}", layout, reference);
        prop_assert_eq!(
            splitter.matches(&layout).unwrap(),
            expected,
            "match {:?} at {}",
            layout,
            reference
        );
    }
}
