//! Property-based tests for issueradar.
//!
//! These tests generate random exports and record sets to find edge cases.

use std::collections::HashSet;

use proptest::prelude::*;

use issueradar::core::{FilterConfig, Message, TOP_KEYWORDS, apply_filters, extract, forward_fill_dates};
use issueradar::parse;
use issueradar::parsing::{Period, to_24_hour};

/// Generate a random export line from a fixed vocabulary (no regex!)
fn arb_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "--------------- 2024년 3월 4일 월요일 ---------------".to_string(),
        "--------------- 2024년 3월 5일 화요일 ---------------".to_string(),
        "--------------- 2024년 2월 30일 금요일 ---------------".to_string(),
        "[민수] [오전 9:05] 배송이 아직 안 왔어요".to_string(),
        "[지은] [오후 2:30] 교과서 누락됐어요".to_string(),
        "[현우] [오전 12:00] 정산 확인 부탁드려요".to_string(),
        "[서연] [오후 12:45] 감사합니다".to_string(),
        "[민수] [오전 13:00] 잘못된 시각".to_string(),
        "이어지는 줄".to_string(),
        "민수님이 들어왔습니다.".to_string(),
        String::new(),
    ])
}

fn arb_export(max_lines: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..max_lines).prop_map(|lines| lines.join("\n"))
}

/// Generate a record with an optional date phrase.
fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop::sample::select(vec!["민수", "지은", "현우", "Admin"]),
        prop::sample::select(vec![
            "배송이 아직 안 왔어요",
            "교과서 누락됐어요",
            "배송 지연 배송 지연",
            "불량 교환 요청",
            "감사합니다",
            "ok 👍",
            "",
        ]),
        prop::option::of(prop::sample::select(vec![
            "2024년 3월 4일 월요일",
            "2024년 3월 5일 화요일",
            "2024년 13월 1일",
        ])),
    )
        .prop_map(|(user, text, date)| {
            let msg = Message::new(user, "10:00", text);
            match date {
                Some(d) => msg.with_date(d),
                None => msg,
            }
        })
}

fn arb_keywords() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["배송", "누락", "불량", "지연", "감사", "없음"]),
        0..4,
    )
    .prop_map(|words| words.into_iter().map(String::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // =========================================================================
    // Clock conversion
    // =========================================================================

    #[test]
    fn to_24_hour_valid_readings(hour in 1u32..=12, minute in 0u32..60) {
        for period in [Period::Am, Period::Pm] {
            let time = to_24_hour(period, hour, minute).unwrap();
            prop_assert_eq!(time.len(), 5);

            let (hh, mm) = time.split_once(':').unwrap();
            let hh: u32 = hh.parse().unwrap();
            let mm: u32 = mm.parse().unwrap();
            prop_assert_eq!(mm, minute);

            let expected = match (period, hour) {
                (Period::Am, 12) => 0,
                (Period::Am, h) => h,
                (Period::Pm, 12) => 12,
                (Period::Pm, h) => h + 12,
            };
            prop_assert_eq!(hh, expected);
        }
    }

    #[test]
    fn to_24_hour_rejects_out_of_range(hour in 13u32..100, minute in 60u32..100) {
        prop_assert!(to_24_hour(Period::Am, hour, 0).is_none());
        prop_assert!(to_24_hour(Period::Pm, 0, 0).is_none());
        prop_assert!(to_24_hour(Period::Pm, 1, minute).is_none());
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn line_numbers_strictly_increase(export in arb_export(40)) {
        let records = parse(export.as_bytes());
        for pair in records.windows(2) {
            prop_assert!(pair[0].line < pair[1].line);
        }
    }

    #[test]
    fn parse_never_exceeds_line_count(export in arb_export(40)) {
        let records = parse(export.as_bytes());
        prop_assert!(records.len() <= export.lines().count());
        for msg in &records {
            prop_assert!(msg.date.is_some());
            prop_assert!(msg.time.len() == 5);
        }
    }

    // =========================================================================
    // Date handling
    // =========================================================================

    #[test]
    fn forward_fill_is_idempotent(messages in prop::collection::vec(arb_message(), 0..30)) {
        let once = forward_fill_dates(messages);
        let twice = forward_fill_dates(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn forward_fill_keeps_length_and_text(messages in prop::collection::vec(arb_message(), 0..30)) {
        let filled = forward_fill_dates(messages.clone());
        prop_assert_eq!(filled.len(), messages.len());
        for (before, after) in messages.iter().zip(&filled) {
            prop_assert_eq!(&before.text, &after.text);
            if before.date.is_some() {
                prop_assert_eq!(&before.date, &after.date);
            }
        }
    }

    #[test]
    fn filter_never_increases_count(messages in prop::collection::vec(arb_message(), 0..30)) {
        let filter = FilterConfig::new().with_date_from("2024-03-05").unwrap();
        let total = messages.len();
        prop_assert!(apply_filters(messages, &filter).len() <= total);
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    #[test]
    fn more_keywords_never_match_less(
        messages in prop::collection::vec(arb_message(), 0..30),
        base in arb_keywords(),
        extra in arb_keywords(),
    ) {
        let mut superset = base.clone();
        superset.extend(extra);

        let small = extract(&messages, &base);
        let large = extract(&messages, &superset);
        prop_assert!(large.matched.len() >= small.matched.len());

        let large_lines: HashSet<_> = large.matched.iter().map(|m| (&m.user, &m.text)).collect();
        for msg in &small.matched {
            prop_assert!(large_lines.contains(&(&msg.user, &msg.text)));
        }
    }

    #[test]
    fn ranked_is_bounded_and_sorted(
        messages in prop::collection::vec(arb_message(), 0..30),
        keywords in arb_keywords(),
    ) {
        let result = extract(&messages, &keywords);
        prop_assert!(result.ranked.len() <= TOP_KEYWORDS);
        for pair in result.ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        for k in &result.ranked {
            prop_assert!(k.count > 0);
        }
    }

    #[test]
    fn empty_keywords_match_nothing(messages in prop::collection::vec(arb_message(), 0..30)) {
        let result = extract(&messages, &[]);
        prop_assert!(result.matched.is_empty());
        prop_assert!(result.ranked.is_empty());
    }
}
