// Writing-style heuristics that run regardless of the configured rules.
//
// Each check looks at the raw post text and returns at most one issue along
// with the points it costs. They are independent: any combination can fire.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::rules::Severity;
use super::scorer::Issue;

/// Sentences longer than this many words get flagged.
pub const LONG_SENTENCE_WORDS: usize = 40;

/// Exclamation marks at or above this count get flagged.
pub const EXCLAMATION_THRESHOLD: usize = 3;

pub const EMOJI_PENALTY: u32 = 8;
pub const EXCLAMATION_PENALTY: u32 = 5;
pub const LONG_SENTENCE_PENALTY: u32 = 3;

/// Two or more adjacent emoji code points.
///
/// The first range is everything UTF-16 encodes with a D83C–DBFF high
/// surrogate; the second is the Miscellaneous Symbols and Dingbats block.
static EMOJI_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{1F000}-\x{10FFFF}\x{2600}-\x{27BF}]{2,}").expect("emoji run pattern is valid")
});

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence end pattern is valid"));

/// Flag runs of consecutive emoji anywhere in the text.
pub fn check_emoji_run(text: &str) -> Option<(Issue, u32)> {
    if !EMOJI_RUN_RE.is_match(text) {
        return None;
    }
    Some((
        Issue {
            phrase: "Multiple consecutive emojis".to_string(),
            suggestion: "Use one emoji or none. Let words do the work.".to_string(),
            severity: Severity::Warning,
        },
        EMOJI_PENALTY,
    ))
}

/// Flag posts that lean on exclamation marks.
pub fn check_exclamations(text: &str) -> Option<(Issue, u32)> {
    let count = text.chars().filter(|&c| c == '!').count();
    if count < EXCLAMATION_THRESHOLD {
        return None;
    }
    Some((
        Issue {
            phrase: format!("{count} exclamation marks"),
            suggestion: "Reduce exclamation marks. Calm confidence doesn't need them.".to_string(),
            severity: Severity::Warning,
        },
        EXCLAMATION_PENALTY,
    ))
}

/// Count the sentences that run past the word limit.
pub fn count_long_sentences(text: &str) -> usize {
    SENTENCE_END_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .filter(|s| s.split_whitespace().count() > LONG_SENTENCE_WORDS)
        .count()
}

/// Flag long sentences. One aggregate issue no matter how many there are.
pub fn check_long_sentences(text: &str) -> Option<(Issue, u32)> {
    let long = count_long_sentences(text);
    if long == 0 {
        return None;
    }
    Some((
        Issue {
            phrase: format!("{long} long sentence(s)"),
            suggestion: "Break long sentences into shorter, punchier ones.".to_string(),
            severity: Severity::Info,
        },
        LONG_SENTENCE_PENALTY,
    ))
}
