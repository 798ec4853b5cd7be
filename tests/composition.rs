// Composition tests — the whole pipeline from CSV bytes to AnalysisResult.
//
// These tests exercise the data flow between stages:
//   CSV -> records -> sentiment -> TF-IDF -> topics -> graph -> images
// and check the result shape callers depend on, plus the failure paths that
// must surface as a single typed error with nothing partial.

use image::GenericImageView;

use murmur::config::AnalysisConfig;
use murmur::error::{AnalysisError, ErrorEnvelope};
use murmur::render::decode_base64;
use murmur::{analyze, analyze_records, AnalysisResult};

fn run(csv: &str) -> Result<AnalysisResult, AnalysisError> {
    analyze(csv.as_bytes(), &AnalysisConfig::default())
}

fn decode_png(encoded: &str) -> image::DynamicImage {
    let bytes = decode_base64(encoded).unwrap();
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
}

const REVIEWS_CSV: &str = "\
id,comment,author
1,I love this,ana
2,I hate this,ben
3,this is fine,cy
";

// ============================================================
// Chain: three-record comment table
// ============================================================

#[test]
fn three_comment_records_end_to_end() {
    let result = run(REVIEWS_CSV).unwrap();

    assert_eq!(result.sentiments.len(), 3);
    for s in &result.sentiments {
        assert!((-1.0..=1.0).contains(s));
    }
    let summary = result.sentiment_summary;
    assert_eq!(summary.positive + summary.negative + summary.neutral, 3);
    assert!(summary.positive >= 1);
    assert!(summary.negative >= 1);

    assert_eq!(result.topics.len(), 5);
    for topic in &result.topics {
        assert!(topic.len() <= 10);
    }
    assert!(result.tfidf.len() <= 20);
    assert!(result.centralities.len() <= 10);
}

#[test]
fn images_decode_to_pngs_of_expected_size() {
    let result = run(REVIEWS_CSV).unwrap();

    let cloud = decode_png(&result.wordcloud);
    assert_eq!(cloud.dimensions(), (800, 400));

    let graph = decode_png(&result.cooccurrence_img);
    assert_eq!(graph.dimensions(), (1000, 800));
}

#[test]
fn network_matches_centralities() {
    let result = run(REVIEWS_CSV).unwrap();
    let node_ids: Vec<&str> = result.network.nodes.iter().map(|n| n.id.as_str()).collect();
    for (node, _) in &result.centralities {
        assert!(node_ids.contains(&node.as_str()));
    }
    // "this" is in every record, so it pairs with every other node
    assert_eq!(result.centralities[0].0, "this");
    assert!((result.centralities[0].1 - 1.0).abs() < 1e-12);
}

#[test]
fn result_serializes_with_expected_fields() {
    let result = run(REVIEWS_CSV).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    for field in [
        "sentiments",
        "sentiment_summary",
        "topics",
        "tfidf",
        "network",
        "centralities",
        "wordcloud",
        "cooccurrence_img",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    let summary = &json["sentiment_summary"];
    for label in ["positive", "negative", "neutral"] {
        assert!(summary.get(label).is_some(), "missing {label}");
    }
    assert!(json["network"]["nodes"][0].get("id").is_some());
    assert!(json["tfidf"][0][0].is_string());
    assert!(json["tfidf"][0][1].is_number());
}

#[test]
fn identical_input_gives_identical_result() {
    let a = run(REVIEWS_CSV).unwrap();
    let b = run(REVIEWS_CSV).unwrap();
    assert_eq!(a, b);
}

// ============================================================
// Vocabulary: ordinary comment words and accented text
// ============================================================

#[test]
fn short_everyday_comments_are_analyzed() {
    let result = run("comment\nGreat work, thanks for the help!\nreally good\n").unwrap();
    let terms: Vec<&str> = result.tfidf.iter().map(|(t, _)| t.as_str()).collect();
    for term in ["great", "work", "thanks", "help", "really", "good"] {
        assert!(terms.contains(&term), "{term} missing from {terms:?}");
    }
}

#[test]
fn accented_words_agree_across_stages() {
    let result = run("text\ncafé crème\ncafé résumé\n").unwrap();
    let terms: Vec<&str> = result.tfidf.iter().map(|(t, _)| t.as_str()).collect();
    let nodes: Vec<&str> = result.network.nodes.iter().map(|n| n.id.as_str()).collect();
    for word in ["café", "crème", "résumé"] {
        assert!(terms.contains(&word), "{word} missing from tf-idf {terms:?}");
        assert!(nodes.contains(&word), "{word} missing from graph {nodes:?}");
    }
}

// ============================================================
// Loader behaviour seen through the pipeline
// ============================================================

#[test]
fn first_matching_column_wins() {
    let csv = "message,text\nsunflower fields,asteroid belt\nsunflower seeds,asteroid mining\n";
    let result = run(csv).unwrap();
    let terms: Vec<&str> = result.tfidf.iter().map(|(t, _)| t.as_str()).collect();
    assert!(terms.contains(&"sunflower"));
    assert!(!terms.contains(&"asteroid"));
}

#[test]
fn header_match_ignores_case_and_padding() {
    let csv = "  Comment ,score\ngreat pizza,5\nsoggy pizza,2\n";
    let result = run(csv).unwrap();
    assert_eq!(result.sentiments.len(), 2);
}

#[test]
fn empty_cells_are_dropped() {
    let csv = "text\nmountain trail\n\nNaN\nmountain lake\n";
    let result = run(csv).unwrap();
    assert_eq!(result.sentiments.len(), 2);
}

// ============================================================
// Failure paths
// ============================================================

#[test]
fn no_text_column_fails() {
    let err = run("id,author\n1,ana\n").unwrap_err();
    assert!(matches!(err, AnalysisError::NoTextColumnFound));
    assert_eq!(ErrorEnvelope::from(&err).kind, "NoTextColumnFound");
}

#[test]
fn stop_words_only_is_empty_corpus() {
    let err = run("text\nthe a an\n").unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyCorpus));
}

#[test]
fn empty_record_list_is_empty_corpus() {
    let err = analyze_records(&[], &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyCorpus));
}

#[test]
fn invalid_utf8_is_malformed() {
    let err = analyze(b"text\n\xff\xfe broken\n", &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedInput(_)));
}

#[test]
fn error_envelope_serializes_kind_and_message() {
    let err = run("text\nthe a an\n").unwrap_err();
    let json = serde_json::to_value(ErrorEnvelope::from(&err)).unwrap();
    assert_eq!(json["kind"], "EmptyCorpus");
    assert!(json["error"].as_str().unwrap().contains("empty vocabulary"));
}
