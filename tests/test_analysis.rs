use citemap::{analyze_paper, AnalysisConfig, CiteMapError, Diagnostic, FormatKind, InputField, Paper, Purpose};

#[test]
fn test_supporting_author_year_citation_is_matched() {
    let paper = Paper::builder("Stability Study")
        .author("Doe, J.")
        .year(2021)
        .raw_text("The stability result was confirmed by Smith (2020) in a later trial.")
        .reference_block("Smith, J. (2020). Protein Stability. Journal X.")
        .build();
    let result = analyze_paper(&paper, &AnalysisConfig::default()).unwrap();

    assert_eq!(result.citations.len(), 1);
    let citation = &result.citations[0];
    assert_eq!(citation.format_kind, FormatKind::AuthorYear);
    assert_eq!(citation.raw_match, "Smith (2020)");
    assert_eq!(citation.purpose, Purpose::SupportingEvidence);
    assert_eq!(citation.matched_reference, Some(0));
    assert_eq!(result.network.edges.len(), 1);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_empty_reference_block() {
    let paper = Paper::builder("Folding")
        .author("Doe, J.")
        .year(2021)
        .raw_text("Folding is slow [1]. Aggregation is fast [1].")
        .build();
    let result = analyze_paper(&paper, &AnalysisConfig::default()).unwrap();

    assert_eq!(result.citations.len(), 2);
    assert!(result.citations.iter().all(|c| c.matched_reference.is_none()));
    assert!(result.network.edges.is_empty());
    assert_eq!(result.statistics.citation_density, 0.0);
    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::EmptyInput {
            citekey: "doe2021folding".to_string(),
            field: InputField::ReferenceBlock,
        }]
    );
}

#[test]
fn test_empty_paper_is_not_an_error() {
    let paper = Paper::builder("Blank").year(2020).build();
    let result = analyze_paper(&paper, &AnalysisConfig::default()).unwrap();
    assert!(result.citations.is_empty());
    assert!(result.references.is_empty());
    assert_eq!(result.network.nodes.len(), 1);
    assert_eq!(result.diagnostics.len(), 2);
}

#[test]
fn test_missing_citekey_is_rejected() {
    let paper = Paper {
        title: "No Key".to_string(),
        authors: Vec::new(),
        year: None,
        citekey: "  ".to_string(),
        raw_text: "Text [1].".to_string(),
        reference_block: String::new(),
    };
    let err = analyze_paper(&paper, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, CiteMapError::InvalidPaper { .. }));
}

#[test]
fn test_malformed_references_are_reported() {
    let paper = Paper::builder("Mixed")
        .citekey("mixed2021")
        .raw_text("See [1] and [2].")
        .reference_block("[1] Smith, J. (2020). Fine.\n[2] see the supplementary notes\n")
        .build();
    let result = analyze_paper(&paper, &AnalysisConfig::default()).unwrap();
    assert_eq!(result.references.len(), 2);
    assert_eq!(result.statistics.matched_citations, 2);
    assert!(result.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::MalformedReferenceEntry { reference_index: 1, .. }
    )));
}

#[test]
fn test_analysis_is_idempotent() {
    let paper = Paper::builder("Repeat")
        .author("Doe, J.")
        .year(2021)
        .raw_text("Introduction\nHowever, Smith (2020) disagrees [1].\nMethods\nWe followed [2].\n")
        .reference_block("[1] Smith, J. (2020). One.\n[2] Jones, A. (2018). Two.\n")
        .build();
    let config = AnalysisConfig::default();
    let first = analyze_paper(&paper, &config).unwrap();
    let second = analyze_paper(&paper, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_result_serializes_as_plain_data() {
    let paper = Paper::builder("Folding")
        .author("Doe, J.")
        .year(2021)
        .raw_text("In contrast to [1], we disagree.")
        .reference_block("[1] Smith, J. (2020). One.\n")
        .build();
    let result = analyze_paper(&paper, &AnalysisConfig::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["paper"]["citekey"], "doe2021folding");
    assert_eq!(value["citations"][0]["purpose"], "contrasting_view");
    assert_eq!(value["citations"][0]["format_kind"], "numeric");
    assert_eq!(value["network"]["clusters"]["contrasting_view"][0], "ref_1");

    let back: citemap::PaperCitationResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
