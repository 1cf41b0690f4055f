use crate::citation::Purpose;

/// A phrase set and the purpose it signals.
#[derive(Debug, Clone, Copy)]
pub struct PurposeRule {
    pub purpose: Purpose,
    pub phrases: &'static [&'static str],
}

/// Evaluated top to bottom; the first rule with a matching phrase wins.
pub const PURPOSE_RULES: &[PurposeRule] = &[
    PurposeRule {
        purpose: Purpose::ContrastingView,
        phrases: &[
            "in contrast",
            "however",
            "unlike",
            "contrary to",
            "differs from",
            "differ from",
            "contradicts",
            "contradict",
            "challenges",
            "disputes",
            "whereas",
            "on the other hand",
            "inconsistent with",
        ],
    },
    PurposeRule {
        purpose: Purpose::MethodologySource,
        phrases: &[
            "following the method of",
            "following the approach of",
            "following the procedure of",
            "using the approach of",
            "using the method of",
            "method of",
            "methods of",
            "approach of",
            "protocol of",
            "procedure of",
            "algorithm of",
            "technique of",
            "as described by",
            "as described in",
            "adapted from",
            "we followed",
        ],
    },
    PurposeRule {
        purpose: Purpose::Comparison,
        phrases: &[
            "compared to",
            "compared with",
            "relative to",
            "in comparison",
            "similar to",
            "comparable to",
            "analogous to",
            "outperforms",
        ],
    },
    PurposeRule {
        purpose: Purpose::BackgroundContext,
        phrases: &[
            "previous studies",
            "previous work",
            "previously",
            "prior work",
            "prior studies",
            "earlier work",
            "earlier studies",
            "has been studied",
            "have been studied",
            "extensively studied",
            "well established",
            "well-established",
            "is well known",
            "it is known",
            "has long been",
            "for a review",
            "reviewed in",
            "background",
        ],
    },
];

/// Checked only when no rule matched.
pub const SUPPORTING_PHRASES: &[&str] = &[
    "supports",
    "supported by",
    "confirms",
    "confirmed",
    "consistent with",
    "in agreement with",
    "in line with",
    "agrees with",
    "as shown by",
    "demonstrated by",
    "reported by",
    "corroborates",
    "corroborated",
];

/// Label a context window.
pub fn classify_purpose(window: &str) -> Purpose {
    let lowered = window.to_lowercase();
    for rule in PURPOSE_RULES {
        if rule.phrases.iter().any(|p| contains_phrase(&lowered, p)) {
            return rule.purpose;
        }
    }
    if SUPPORTING_PHRASES.iter().any(|p| contains_phrase(&lowered, p)) {
        return Purpose::SupportingEvidence;
    }
    Purpose::GeneralReference
}

/// Whole-word containment: `phrase` must not be glued to letters or digits.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(idx, _)| {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + phrase.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
