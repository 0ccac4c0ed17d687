//! Reconciliation of verifier opinions against the generator's claim.

use crate::quiz::question::Question;
use crate::verification::opinion::{Opinion, OpinionSet};
use crate::verification::outcome::LanguageVerdicts;
use crate::verification::policy::{VerifierFailurePolicy, VerifierRole};
use serde::Serialize;

pub const REASON_DUPLICATE_OPTIONS: &str = "duplicate options in initial";
pub const REASON_OPTION_COUNT: &str = "expected 4 options in initial";
pub const REASON_INVALID_CLAIM: &str = "invalid correct_option_id in initial";
pub const REASON_MISMATCH: &str = "correct option mismatch";
pub const REASON_NO_OPINIONS: &str = "no other opinions available for verification";
pub const REASON_VERIFIER_UNAVAILABLE: &str = "verifier unavailable";
pub const REASON_TASK_FAILED: &str = "verification task failed";

/// Classification of a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}

/// One verifier's contribution after the failure policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOpinions {
    Opinions(OpinionSet),
    Unavailable(VerifierRole),
}

/// Apply `policy` to a verifier response (`None` = failed call or bad output).
pub fn resolve_opinions(
    role: VerifierRole,
    response: Option<OpinionSet>,
    initial: &OpinionSet,
    policy: VerifierFailurePolicy,
) -> ResolvedOpinions {
    match (response, policy) {
        (Some(opinions), _) => ResolvedOpinions::Opinions(opinions),
        (None, VerifierFailurePolicy::TrustClaim) => ResolvedOpinions::Opinions(initial.clone()),
        (None, VerifierFailurePolicy::Abstain) => ResolvedOpinions::Opinions(OpinionSet::default()),
        (None, VerifierFailurePolicy::Reject) => ResolvedOpinions::Unavailable(role),
    }
}

/// Structural checks on the question itself. Returns the claimed answer text.
fn check_integrity(question: &Question) -> Result<&str, String> {
    if !question.has_distinct_options() {
        return Err(REASON_DUPLICATE_OPTIONS.to_string());
    }
    if !question.has_expected_option_count() {
        return Err(format!(
            "{} (got {})",
            REASON_OPTION_COUNT,
            question.options.len()
        ));
    }
    question
        .claimed_answer()
        .ok_or_else(|| format!("{} ({})", REASON_INVALID_CLAIM, question.correct_option_id))
}

fn check_agreement(
    claim: &str,
    primary: Option<&Opinion>,
    secondary: Option<&Opinion>,
) -> Verdict {
    let opinions: Vec<(VerifierRole, &Opinion)> = [
        (VerifierRole::Primary, primary),
        (VerifierRole::Secondary, secondary),
    ]
    .into_iter()
    .filter_map(|(role, opinion)| opinion.map(|o| (role, o)))
    .collect();

    if opinions.is_empty() {
        return Verdict::Rejected(REASON_NO_OPINIONS.to_string());
    }

    if opinions.iter().all(|(_, o)| o.is_sole_answer(claim)) {
        return Verdict::Accepted;
    }

    let detail = opinions
        .iter()
        .map(|(role, o)| format!("{}: {:?}", role, o.correct_options))
        .collect::<Vec<_>>()
        .join(", ");
    Verdict::Rejected(format!(
        "{} (initial: {:?}, {})",
        REASON_MISMATCH, claim, detail
    ))
}

/// Decide whether a question is good.
///
/// Checks run in order and stop at the first failure:
/// 1. options are pairwise distinct, there are exactly 4, and the claimed
///    index points into them;
/// 2. every opinion present names exactly one option, equal to the claim;
/// 3. at least one opinion is present.
pub fn reconcile(
    question: &Question,
    primary: Option<&Opinion>,
    secondary: Option<&Opinion>,
) -> Verdict {
    match check_integrity(question) {
        Ok(claim) => check_agreement(claim, primary, secondary),
        Err(reason) => Verdict::Rejected(reason),
    }
}

/// Partition one language batch into good and bad questions.
///
/// Order within each bucket follows the input order. Rejected questions
/// get their reason attached.
pub fn partition(
    questions: Vec<Question>,
    primary: &ResolvedOpinions,
    secondary: &ResolvedOpinions,
) -> LanguageVerdicts {
    let unavailable: Vec<&str> = [primary, secondary]
        .into_iter()
        .filter_map(|r| match r {
            ResolvedOpinions::Unavailable(role) => Some(role.as_str()),
            ResolvedOpinions::Opinions(_) => None,
        })
        .collect();

    let mut verdicts = LanguageVerdicts::default();
    for mut question in questions {
        let verdict = match check_integrity(&question) {
            Err(reason) => Verdict::Rejected(reason),
            Ok(_) if !unavailable.is_empty() => Verdict::Rejected(format!(
                "{}: {}",
                REASON_VERIFIER_UNAVAILABLE,
                unavailable.join(", ")
            )),
            Ok(claim) => check_agreement(
                claim,
                lookup(primary, question.question_id),
                lookup(secondary, question.question_id),
            ),
        };

        match verdict {
            Verdict::Accepted => verdicts.good.push(question),
            Verdict::Rejected(reason) => {
                question.reject(reason);
                verdicts.bad.push(question);
            }
        }
    }
    verdicts
}

fn lookup(resolved: &ResolvedOpinions, question_id: i64) -> Option<&Opinion> {
    match resolved {
        ResolvedOpinions::Opinions(set) => set.find(question_id),
        ResolvedOpinions::Unavailable(_) => None,
    }
}
