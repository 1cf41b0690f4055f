use citemap::citation::purpose::contains_phrase;
use citemap::citation::{classify_purpose, PURPOSE_RULES};
use citemap::Purpose;

#[test]
fn test_rule_order_is_fixed() {
    let order: Vec<Purpose> = PURPOSE_RULES.iter().map(|r| r.purpose).collect();
    assert_eq!(
        order,
        vec![
            Purpose::ContrastingView,
            Purpose::MethodologySource,
            Purpose::Comparison,
            Purpose::BackgroundContext
        ]
    );
}

#[test]
fn test_each_purpose() {
    assert_eq!(classify_purpose("This was confirmed by Smith (2020)."), Purpose::SupportingEvidence);
    assert_eq!(classify_purpose("In contrast to Smith (2020), we find no effect."), Purpose::ContrastingView);
    assert_eq!(classify_purpose("We followed the protocol of Smith (2020)."), Purpose::MethodologySource);
    assert_eq!(classify_purpose("Our yield is high compared with [3]."), Purpose::Comparison);
    assert_eq!(classify_purpose("Previous studies [1] looked at this."), Purpose::BackgroundContext);
    assert_eq!(classify_purpose("As in [1], the sample was small."), Purpose::GeneralReference);
}

#[test]
fn test_earlier_rule_wins() {
    assert_eq!(classify_purpose("However, this is similar to [2]."), Purpose::ContrastingView);
    assert_eq!(
        classify_purpose("Using the method of [4], compared to [5]."),
        Purpose::MethodologySource
    );
}

#[test]
fn test_supporting_is_checked_after_rule_table() {
    assert_eq!(
        classify_purpose("This is consistent with previous work [1]."),
        Purpose::BackgroundContext
    );
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_eq!(classify_purpose("HOWEVER, [1] disagrees."), Purpose::ContrastingView);
}

#[test]
fn test_phrases_match_whole_words_only() {
    assert_eq!(classify_purpose("The unlikely outcome [1]."), Purpose::GeneralReference);
    assert!(contains_phrase("this is unlike [1]", "unlike"));
    assert!(!contains_phrase("this is unlikely", "unlike"));
    assert!(contains_phrase("unlike", "unlike"));
}

#[test]
fn test_empty_window() {
    assert_eq!(classify_purpose(""), Purpose::GeneralReference);
}
