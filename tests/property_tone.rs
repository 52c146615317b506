use proptest::prelude::*;
use tonecheck::tone::rules::{BlockedPhraseRule, Severity};
use tonecheck::tone::scorer::score_text;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Error),
        Just(Severity::Warning),
        Just(Severity::Info),
    ]
}

fn rule() -> impl Strategy<Value = BlockedPhraseRule> {
    (
        "[a-z]{1,6}",
        severity(),
        prop::collection::vec("[a-c]", 0..3),
    )
        .prop_map(|(phrase, severity, applies_to)| BlockedPhraseRule {
            phrase,
            suggestion: String::new(),
            severity,
            applies_to,
        })
}

// ── Score stays in range ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_always_within_bounds(
        text in "\\PC{0,300}",
        account in "[a-c]",
        rules in prop::collection::vec(rule(), 0..20)
    ) {
        let result = score_text(&text, &account, &rules);
        prop_assert!(result.score <= 100, "score {} out of range", result.score);
    }

    #[test]
    fn issues_never_exceed_rules_plus_heuristics(
        text in "[a-z !.?🎉]{0,200}",
        rules in prop::collection::vec(rule(), 0..10)
    ) {
        let result = score_text(&text, "a", &rules);
        prop_assert!(result.issues.len() <= rules.len() + 3);
    }
}

// ── Whitespace is always clean ─────────────────────────────────────────────

proptest! {
    #[test]
    fn whitespace_always_perfect(
        text in "[ \\t\\n\\r]{0,50}",
        rules in prop::collection::vec(rule(), 0..10)
    ) {
        let result = score_text(&text, "a", &rules);
        prop_assert_eq!(result.score, 100);
        prop_assert!(result.issues.is_empty());
    }
}

// ── Without rules, only heuristics move the score ──────────────────────────

proptest! {
    #[test]
    fn no_rules_score_independent_of_account(
        text in "\\PC{0,200}",
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}"
    ) {
        prop_assert_eq!(score_text(&text, &a, &[]), score_text(&text, &b, &[]));
    }

    #[test]
    fn no_rules_score_has_only_heuristic_deductions(text in "\\PC{0,200}") {
        let result = score_text(&text, "a", &[]);
        // Any subset of 8, 5 and 3
        let possible = [100, 92, 95, 97, 87, 89, 92, 84];
        prop_assert!(possible.contains(&result.score), "unexpected score {}", result.score);
    }

    #[test]
    fn scoring_is_deterministic(
        text in "\\PC{0,200}",
        rules in prop::collection::vec(rule(), 0..10)
    ) {
        prop_assert_eq!(score_text(&text, "b", &rules), score_text(&text, "b", &rules));
    }
}
