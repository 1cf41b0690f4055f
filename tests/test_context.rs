use citemap::citation::context::section_at;
use citemap::citation::{detect_citations, detect_sections, extract_context};
use citemap::{AnalysisConfig, Citation, FormatKind, Section};

const PAPER: &str = "1. Introduction\n\
Protein folding is hard [1].\n\
2. Methods\n\
We used the protocol of Smith (2020).\n\
Results\n\
results were mixed, as seen in [2].\n\
Discussion\n\
This agrees with [3].\n\
Conclusions\n\
More work is needed [4].\n";

#[test]
fn test_detect_sections() {
    let sections: Vec<Section> = detect_sections(PAPER).iter().map(|h| h.section).collect();
    assert_eq!(
        sections,
        vec![
            Section::Introduction,
            Section::Methods,
            Section::Results,
            Section::Discussion,
            Section::Conclusion
        ]
    );
}

#[test]
fn test_heading_offsets_point_at_line_start() {
    let headings = detect_sections(PAPER);
    assert_eq!(headings[0].offset, 0);
    assert_eq!(headings[1].offset, PAPER.find("2. Methods").unwrap());
}

#[test]
fn test_body_lines_are_not_headings() {
    // lowercase "results were mixed" must not open a new section
    let headings = detect_sections("Results\nresults were mixed.\nmethods matter\n");
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].section, Section::Results);

    assert!(detect_sections("Introduction of the new method was slow and costly overall.\n").is_empty());
    assert!(detect_sections("Methods:\n").is_empty());
}

#[test]
fn test_prose_line_starting_with_heading_word() {
    let text = "Results\nx\nResults from prior trials\nx\nResults and Discussion\nx\n";
    let headings = detect_sections(text);
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[0].offset, 0);
    assert_eq!(headings[1].offset, text.find("Results and").unwrap());
    assert!(detect_sections("Methods used here\n").is_empty());
    assert_eq!(detect_sections("2.1 Methods of Analysis\n")[0].section, Section::Methods);
}

#[test]
fn test_heading_vocabulary() {
    let text = "Background\nx\nMaterials and Methods\nx\nIV. Findings\nx\nConcluding Remarks\nx\n";
    let sections: Vec<Section> = detect_sections(text).iter().map(|h| h.section).collect();
    assert_eq!(
        sections,
        vec![Section::Introduction, Section::Methods, Section::Results, Section::Conclusion]
    );
}

#[test]
fn test_citations_take_their_section() {
    let config = AnalysisConfig::default();
    let headings = detect_sections(PAPER);
    let mut citations = detect_citations(PAPER, &config);
    for citation in citations.iter_mut() {
        extract_context(citation, PAPER, &headings, config.context_width);
    }
    let sections: Vec<Section> = citations.iter().map(|c| c.section).collect();
    assert_eq!(
        sections,
        vec![
            Section::Introduction,
            Section::Methods,
            Section::Results,
            Section::Discussion,
            Section::Conclusion
        ]
    );
}

#[test]
fn test_unknown_section_without_headings() {
    assert_eq!(section_at(&[], 10), Section::Unknown);
    let headings = detect_sections("Some text [1].\nMethods\nMore [2].\n");
    assert_eq!(section_at(&headings, 5), Section::Unknown);
    assert_eq!(section_at(&headings, 30), Section::Methods);
}

#[test]
fn test_context_window_is_centred_on_offset() {
    let text = "abcdefghijklmnopqrstuvwxyz [1] abcdefghijklmnopqrstuvwxyz";
    let offset = text.find("[1]").unwrap();
    let mut citation = Citation::new("[1]", FormatKind::Numeric, offset, offset + 3);
    extract_context(&mut citation, text, &[], 20);
    assert_eq!(citation.context_window, &text[offset - 10..offset + 10]);
}

#[test]
fn test_context_window_is_clipped_to_text() {
    let text = "[1] short";
    let mut citation = Citation::new("[1]", FormatKind::Numeric, 0, 3);
    extract_context(&mut citation, text, &[], 200);
    assert_eq!(citation.context_window, text);
}

#[test]
fn test_context_window_respects_char_boundaries() {
    let text = "ééééé [1] ééééé";
    let offset = text.find("[1]").unwrap();
    let mut citation = Citation::new("[1]", FormatKind::Numeric, offset, offset + 3);
    extract_context(&mut citation, text, &[], 4);
    assert!(!citation.context_window.is_empty());
    assert!(text.contains(&citation.context_window));
}
