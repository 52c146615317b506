// Post approval workflow — the status state machine and the tone gate.
//
// A post moves draft -> design review -> final review -> approved ->
// scheduled -> posted, with reviewers able to send it back to draft. A
// scheduled post that isn't published in time settles to missed and can be
// rescheduled.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::tone::scorer::ScoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    DesignReview,
    FinalReview,
    Approved,
    Scheduled,
    Posted,
    Missed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::DesignReview => "design_review",
            PostStatus::FinalReview => "final_review",
            PostStatus::Approved => "approved",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Posted => "posted",
            PostStatus::Missed => "missed",
        }
    }

    /// Statuses reachable in one step from this one.
    pub fn next_statuses(&self) -> &'static [PostStatus] {
        use PostStatus::*;
        match self {
            Draft => &[DesignReview],
            DesignReview => &[FinalReview, Draft],
            FinalReview => &[Approved, Draft],
            Approved => &[Scheduled, Draft],
            Scheduled => &[Posted, Missed, Approved],
            Missed => &[Scheduled],
            Posted => &[],
        }
    }

    pub fn can_transition_to(&self, to: PostStatus) -> bool {
        self.next_statuses().contains(&to)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }

    /// Move to `to`, or fail if the workflow doesn't allow that step.
    pub fn transition(self, to: PostStatus) -> Result<PostStatus> {
        if !self.can_transition_to(to) {
            anyhow::bail!(
                "Cannot move a post from {} to {}",
                self.as_str(),
                to.as_str()
            );
        }
        Ok(to)
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons a post can't leave final review. Empty means the gate passes.
pub fn approval_blockers(result: &ScoreResult, min_score: u32) -> Vec<String> {
    let mut blockers = Vec::new();

    let errors: Vec<&str> = result
        .issues
        .iter()
        .filter(|i| i.severity == crate::tone::rules::Severity::Error)
        .map(|i| i.phrase.as_str())
        .collect();
    if !errors.is_empty() {
        blockers.push(format!("Blocked phrases present: {}", errors.join(", ")));
    }

    if result.score < min_score {
        blockers.push(format!(
            "Tone score {} is below the approval threshold of {}",
            result.score, min_score
        ));
    }

    blockers
}

/// Approve a post in final review, applying the tone gate first.
pub fn approve(status: PostStatus, result: &ScoreResult, min_score: u32) -> Result<PostStatus> {
    if status != PostStatus::FinalReview {
        anyhow::bail!("Only posts in final_review can be approved (post is {status})");
    }
    let blockers = approval_blockers(result, min_score);
    if !blockers.is_empty() {
        anyhow::bail!("Tone check failed:\n  {}", blockers.join("\n  "));
    }
    status.transition(PostStatus::Approved)
}

/// Where a scheduled post stands at `now`.
///
/// Once the scheduled time plus `grace` has passed, the post is missed.
pub fn settle_scheduled(
    scheduled_at: DateTime<Utc>,
    now: DateTime<Utc>,
    grace: Duration,
) -> PostStatus {
    if now > scheduled_at + grace {
        PostStatus::Missed
    } else {
        PostStatus::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::rules::Severity;
    use crate::tone::scorer::Issue;
    use chrono::TimeZone;

    const ALL: [PostStatus; 7] = [
        PostStatus::Draft,
        PostStatus::DesignReview,
        PostStatus::FinalReview,
        PostStatus::Approved,
        PostStatus::Scheduled,
        PostStatus::Posted,
        PostStatus::Missed,
    ];

    fn result(score: u32, severities: &[Severity]) -> ScoreResult {
        ScoreResult {
            score,
            issues: severities
                .iter()
                .enumerate()
                .map(|(i, &severity)| Issue {
                    phrase: format!("phrase{i}"),
                    suggestion: String::new(),
                    severity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_happy_path() {
        let mut status = PostStatus::Draft;
        for next in [
            PostStatus::DesignReview,
            PostStatus::FinalReview,
            PostStatus::Approved,
            PostStatus::Scheduled,
            PostStatus::Posted,
        ] {
            status = status.transition(next).unwrap();
        }
        assert!(status.is_terminal());
    }

    #[test]
    fn test_only_listed_transitions_allowed() {
        for from in ALL {
            for to in ALL {
                let allowed = from.next_statuses().contains(&to);
                assert_eq!(from.transition(to).is_ok(), allowed, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_cannot_skip_review() {
        let err = PostStatus::Draft
            .transition(PostStatus::Approved)
            .unwrap_err();
        assert!(err.to_string().contains("draft to approved"));
    }

    #[test]
    fn test_missed_can_be_rescheduled() {
        assert!(PostStatus::Missed.can_transition_to(PostStatus::Scheduled));
        assert!(!PostStatus::Missed.can_transition_to(PostStatus::Posted));
    }

    #[test]
    fn test_gate_passes_clean_result() {
        assert!(approval_blockers(&result(100, &[]), 70).is_empty());
        assert!(approval_blockers(&result(70, &[Severity::Warning]), 70).is_empty());
    }

    #[test]
    fn test_gate_blocks_error_issues() {
        let blockers = approval_blockers(&result(85, &[Severity::Error]), 70);
        assert_eq!(blockers.len(), 1);
        assert!(blockers[0].contains("phrase0"));
    }

    #[test]
    fn test_gate_blocks_low_score() {
        let blockers = approval_blockers(&result(60, &[Severity::Warning]), 70);
        assert_eq!(blockers.len(), 1);
        assert!(blockers[0].contains("60"));
    }

    #[test]
    fn test_approve() {
        let ok = approve(PostStatus::FinalReview, &result(90, &[]), 70).unwrap();
        assert_eq!(ok, PostStatus::Approved);

        assert!(approve(PostStatus::FinalReview, &result(50, &[]), 70).is_err());
        assert!(approve(PostStatus::DesignReview, &result(100, &[]), 70).is_err());
    }

    #[test]
    fn test_settle_scheduled() {
        let scheduled = Utc.with_ymd_and_hms(2026, 10, 13, 12, 0, 0).unwrap();
        let grace = Duration::minutes(30);

        let before = Utc.with_ymd_and_hms(2026, 10, 13, 11, 0, 0).unwrap();
        assert_eq!(settle_scheduled(scheduled, before, grace), PostStatus::Scheduled);

        let within = Utc.with_ymd_and_hms(2026, 10, 13, 12, 30, 0).unwrap();
        assert_eq!(settle_scheduled(scheduled, within, grace), PostStatus::Scheduled);

        let after = Utc.with_ymd_and_hms(2026, 10, 13, 12, 31, 0).unwrap();
        assert_eq!(settle_scheduled(scheduled, after, grace), PostStatus::Missed);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PostStatus::FinalReview).unwrap();
        assert_eq!(json, "\"final_review\"");
        for status in ALL {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
    }
}
