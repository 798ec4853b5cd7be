// Unit tests for TF-IDF extraction and the LDA topic model.
//
// Tests the invariants callers rely on: the top-term list is sorted with no
// duplicates, the vocabulary never exceeds its cap, and a fixed seed gives
// identical topics on identical input.

use std::collections::HashSet;

use murmur::deadline::Deadline;
use murmur::error::AnalysisError;
use murmur::topics::lda::{LatentDirichletAllocation, LdaParams};
use murmur::topics::tfidf::TfIdfExtractor;

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn garden_corpus() -> Vec<String> {
    docs(&[
        "Tomatoes need sunlight and regular watering in summer",
        "Compost improves soil structure for tomatoes and peppers",
        "Peppers and tomatoes grow well in raised beds",
        "Pruning roses encourages blooms through the summer",
        "Roses need rich soil and steady watering",
        "Mulch keeps soil moist and suppresses weeds around roses",
        "Weeds compete with peppers for nutrients and water",
        "Raised beds drain well after heavy rain",
    ])
}

/// Records whose distinct-word count exceeds any small vocabulary cap.
fn wide_corpus(words: usize) -> Vec<String> {
    (0..words)
        .map(|i| format!("zq{i:04}x quasar{i:04}y"))
        .collect()
}

// ============================================================
// TfIdfExtractor — top terms
// ============================================================

#[test]
fn top_terms_are_sorted_descending() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let top = m.top_terms(20);
    assert!(!top.is_empty());
    assert!(top.len() <= 20);
    for pair in top.windows(2) {
        assert!(pair[0].1 >= pair[1].1, "{pair:?} out of order");
    }
}

#[test]
fn top_terms_have_no_duplicates() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let top = m.top_terms(20);
    let distinct: HashSet<&str> = top.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(distinct.len(), top.len());
}

#[test]
fn top_terms_fewer_than_requested_when_vocabulary_small() {
    let m = TfIdfExtractor::default()
        .fit_transform(&docs(&["harbor lighthouse", "lighthouse keeper"]))
        .unwrap();
    assert_eq!(m.top_terms(20).len(), 3);
}

#[test]
fn repeated_term_ranks_first() {
    let m = TfIdfExtractor::default()
        .fit_transform(&docs(&[
            "tomatoes everywhere",
            "tomatoes again",
            "tomatoes forever",
        ]))
        .unwrap();
    assert_eq!(m.top_terms(1)[0].0, "tomatoes");
}

// ============================================================
// TfIdfExtractor — vocabulary cap
// ============================================================

#[test]
fn vocabulary_capped_at_default_limit() {
    let m = TfIdfExtractor::default()
        .fit_transform(&wide_corpus(700))
        .unwrap();
    assert_eq!(m.vocabulary.len(), 1000);
}

#[test]
fn vocabulary_below_cap_keeps_every_term() {
    let m = TfIdfExtractor::default()
        .fit_transform(&wide_corpus(30))
        .unwrap();
    assert_eq!(m.vocabulary.len(), 60);
}

#[test]
fn matrix_has_one_row_per_record() {
    let corpus = garden_corpus();
    let m = TfIdfExtractor::default().fit_transform(&corpus).unwrap();
    assert_eq!(m.n_records(), corpus.len());
}

#[test]
fn stop_word_only_corpus_is_empty() {
    let err = TfIdfExtractor::default()
        .fit_transform(&docs(&["the a an"]))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyCorpus));
}

// ============================================================
// LatentDirichletAllocation
// ============================================================

#[test]
fn five_topics_of_up_to_ten_terms() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let lda = LatentDirichletAllocation::fit(&LdaParams::default(), &m, &Deadline::unbounded())
        .unwrap();
    let topics = lda.top_terms(&m.vocabulary, 10);
    assert_eq!(topics.len(), 5);
    for topic in &topics {
        assert_eq!(topic.len(), 10.min(m.vocabulary.len()));
        let distinct: HashSet<&String> = topic.iter().collect();
        assert_eq!(distinct.len(), topic.len());
    }
}

#[test]
fn topic_terms_ascend_in_weight() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let lda = LatentDirichletAllocation::fit(&LdaParams::default(), &m, &Deadline::unbounded())
        .unwrap();
    let topics = lda.top_terms(&m.vocabulary, 10);
    for (weights, terms) in lda.components().iter().zip(&topics) {
        let ws: Vec<f64> = terms
            .iter()
            .map(|t| weights[m.vocabulary.index_of(t).unwrap()])
            .collect();
        for pair in ws.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}

#[test]
fn short_vocabulary_gives_short_topics() {
    let m = TfIdfExtractor::default()
        .fit_transform(&docs(&["kayak paddle", "paddle river"]))
        .unwrap();
    let lda = LatentDirichletAllocation::fit(&LdaParams::default(), &m, &Deadline::unbounded())
        .unwrap();
    for topic in lda.top_terms(&m.vocabulary, 10) {
        assert_eq!(topic.len(), 3);
    }
}

#[test]
fn fixed_seed_reproduces_topics() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let params = LdaParams::default();
    let a = LatentDirichletAllocation::fit(&params, &m, &Deadline::unbounded()).unwrap();
    let b = LatentDirichletAllocation::fit(&params, &m, &Deadline::unbounded()).unwrap();
    assert_eq!(a.components(), b.components());
    assert_eq!(a.top_terms(&m.vocabulary, 10), b.top_terms(&m.vocabulary, 10));
}

#[test]
fn expired_deadline_stops_fitting() {
    let m = TfIdfExtractor::default()
        .fit_transform(&garden_corpus())
        .unwrap();
    let deadline = Deadline::start(std::time::Duration::ZERO);
    let err = LatentDirichletAllocation::fit(&LdaParams::default(), &m, &deadline).unwrap_err();
    assert!(matches!(err, AnalysisError::DeadlineExceeded { .. }));
}
