use citemap::citation::detect_citations;
use citemap::citation::detector::parse_numbers;
use citemap::{AnalysisConfig, FormatKind};

fn detect(text: &str) -> Vec<citemap::Citation> {
    detect_citations(text, &AnalysisConfig::default())
}

#[test]
fn test_single_numeric_citations() {
    let text = "Protein folding is hard [1]. It was studied before [2].";
    let citations = detect(text);
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].format_kind, FormatKind::Numeric);
    assert_eq!(citations[0].raw_match, "[1]");
    assert_eq!(citations[0].offset, text.find("[1]").unwrap());
    assert_eq!(citations[0].cited_numbers, vec![1]);
    assert_eq!(citations[1].cited_numbers, vec![2]);
}

#[test]
fn test_numeric_range_and_list() {
    let text = "Several groups [3-5] and others [1, 4, 6-8] agree.";
    let citations = detect(text);
    assert_eq!(citations.len(), 2);

    assert_eq!(citations[0].format_kind, FormatKind::NumericRange);
    assert_eq!(citations[0].raw_match, "[3-5]");
    assert_eq!(citations[0].cited_numbers, vec![3, 4, 5]);

    assert_eq!(citations[1].format_kind, FormatKind::NumericList);
    assert_eq!(citations[1].cited_numbers, vec![1, 4, 6, 7, 8]);
}

#[test]
fn test_narrative_author_year() {
    let text = "Smith et al. (2019) showed that the effect is small.";
    let citations = detect(text);
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].format_kind, FormatKind::AuthorYear);
    assert_eq!(citations[0].raw_match, "Smith et al. (2019)");
    assert_eq!(citations[0].offset, 0);
}

#[test]
fn test_parenthetical_group_yields_one_citation_per_item() {
    let text = "This is well documented (Smith, 2020; Jones and Lee, 2019).";
    let citations = detect(text);
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].raw_match, "Smith, 2020");
    assert_eq!(citations[1].raw_match, "Jones and Lee, 2019");
    for citation in &citations {
        assert_eq!(&text[citation.offset..citation.end], citation.raw_match);
    }
}

#[test]
fn test_leading_sentence_word_is_not_part_of_author() {
    let text = "However, Smith (2020) reported the opposite.";
    let citations = detect(text);
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].raw_match, "Smith (2020)");
    assert_eq!(citations[0].offset, text.find("Smith").unwrap());
}

#[test]
fn test_non_author_words_are_ignored() {
    let citations = detect("The values are listed in Table (2019) and Figure (2020).");
    assert!(citations.is_empty());
}

#[test]
fn test_invalid_brackets_are_dropped() {
    assert!(detect("Zero [0] is not a reference.").is_empty());
    assert!(detect("Reversed [5-2] ranges are noise.").is_empty());
    assert!(detect("Huge ranges [1-500] are noise.").is_empty());
}

#[test]
fn test_range_width_follows_config() {
    let config = AnalysisConfig {
        max_numeric_range: 3,
        ..AnalysisConfig::default()
    };
    assert_eq!(detect_citations("Cited [1-3].", &config).len(), 1);
    assert!(detect_citations("Cited [1-4].", &config).is_empty());
}

#[test]
fn test_citations_are_ordered_and_disjoint() {
    let text = "Early work [2] and Smith (2020) as well as [4-6] (Brown, 2015; Green 2016) and [7, 9].";
    let citations = detect(text);
    assert_eq!(citations.len(), 6);
    for pair in citations.windows(2) {
        assert!(pair[0].offset < pair[1].offset);
        assert!(pair[0].end <= pair[1].offset);
    }
    for citation in &citations {
        assert_eq!(&text[citation.offset..citation.end], citation.raw_match);
    }
}

#[test]
fn test_detection_is_deterministic() {
    let text = "A [1], B (Smith, 2020), C [2-3].";
    assert_eq!(detect(text), detect(text));
}

#[test]
fn test_no_citations_in_plain_text() {
    assert!(detect("").is_empty());
    assert!(detect("Nothing to see here, just prose written in 2020.").is_empty());
}

#[test]
fn test_parse_numbers() {
    assert_eq!(parse_numbers("[2, 3-4]", 100), Some(vec![2, 3, 4]));
    assert_eq!(parse_numbers("[1, 1, 2]", 100), Some(vec![1, 2]));
    assert_eq!(parse_numbers("[0]", 100), None);
    assert_eq!(parse_numbers("[9-3]", 100), None);
    assert_eq!(parse_numbers("[]", 100), None);
}

#[test]
fn test_narrative_with_page_locator_and_year_list() {
    let text = "Smith (2020, p. 5) disagreed, as did Jones (2019, 2020).";
    let citations = detect(text);
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].raw_match, "Smith (2020, p. 5)");
    assert_eq!(citations[1].raw_match, "Jones (2019, 2020)");
    for citation in &citations {
        assert_eq!(citation.format_kind, FormatKind::AuthorYear);
        assert_eq!(&text[citation.offset..citation.end], citation.raw_match);
    }
}

#[test]
fn test_parenthetical_year_list() {
    let citations = detect("Seen before (Smith, 2019, 2020; Lee, 2018).");
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].raw_match, "Smith, 2019, 2020");
    assert_eq!(citations[1].raw_match, "Lee, 2018");
}

#[test]
fn test_surname_particles_are_kept() {
    let text = "As van der Berg (2020) showed, transport is slow (de Souza, 2019).";
    let citations = detect(text);
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].raw_match, "van der Berg (2020)");
    assert_eq!(citations[0].offset, text.find("van der").unwrap());
    assert_eq!(citations[1].raw_match, "de Souza, 2019");
}
