// Unit tests for TF-IDF vectorization: vocabulary selection, IDF weights,
// row normalization.

use hoaxeval::error::FeatureError;
use hoaxeval::features::{StopWords, TfidfParams, TfidfVectorizer};

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn unigrams() -> TfidfParams {
    TfidfParams {
        ngram_range: (1, 1),
        ..TfidfParams::default()
    }
}

// ============================================================
// Vocabulary
// ============================================================

#[test]
fn vocabulary_is_alphabetical() {
    let mut v = TfidfVectorizer::new(unigrams());
    v.fit(&docs(&["zebra apple", "mango apple"])).unwrap();
    assert_eq!(v.terms(), &["apple", "mango", "zebra"]);
    assert_eq!(v.term_index("mango"), Some(1));
}

#[test]
fn max_features_keeps_most_frequent_terms() {
    let mut v = TfidfVectorizer::new(TfidfParams {
        max_features: Some(2),
        ..unigrams()
    });
    v.fit(&docs(&[
        "hoax hoax hoax news",
        "news viral hoax",
        "viral news report",
    ]))
    .unwrap();
    // hoax: 4, news: 3, viral: 2, report: 1
    assert_eq!(v.terms(), &["hoax", "news"]);
}

#[test]
fn max_features_ties_break_alphabetically() {
    let mut v = TfidfVectorizer::new(TfidfParams {
        max_features: Some(2),
        ..unigrams()
    });
    v.fit(&docs(&["delta charlie bravo alpha"])).unwrap();
    assert_eq!(v.terms(), &["alpha", "bravo"]);
}

#[test]
fn max_features_caps_columns() {
    let corpus: Vec<String> = (0..50).map(|i| format!("term{i} shared words")).collect();
    let mut v = TfidfVectorizer::new(TfidfParams {
        max_features: Some(10),
        ..TfidfParams::default()
    });
    let x = v.fit_transform(&corpus).unwrap();
    assert_eq!(x.ncols(), 10);
    assert_eq!(x.nrows(), 50);
}

#[test]
fn english_stop_words_are_removed() {
    let mut v = TfidfVectorizer::new(TfidfParams {
        stop_words: StopWords::English,
        ..unigrams()
    });
    v.fit(&docs(&["the president and the minister"])).unwrap();
    assert!(v.term_index("the").is_none());
    assert!(v.term_index("and").is_none());
    assert!(v.term_index("president").is_some());
}

#[test]
fn only_short_tokens_gives_empty_vocabulary() {
    let mut v = TfidfVectorizer::new(TfidfParams::default());
    let err = v.fit(&docs(&["a b c", "d e"])).unwrap_err();
    assert!(matches!(err, FeatureError::EmptyVocabulary));
}

// ============================================================
// Weights
// ============================================================

#[test]
fn idf_is_smoothed() {
    let mut v = TfidfVectorizer::new(unigrams());
    v.fit(&docs(&["common rare", "common", "common"])).unwrap();

    let common = v.idf()[v.term_index("common").unwrap()];
    let rare = v.idf()[v.term_index("rare").unwrap()];
    // ln((1 + n) / (1 + df)) + 1 with n = 3
    assert!((common - 1.0).abs() < 1e-12);
    assert!((rare - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
}

#[test]
fn rows_are_l2_normalized() {
    let mut v = TfidfVectorizer::new(TfidfParams::default());
    let x = v
        .fit_transform(&docs(&[
            "breaking news about the election",
            "the election results were announced",
            "viral claim about miracle cure",
        ]))
        .unwrap();

    for row in x.rows() {
        let norm = row.dot(&row).sqrt();
        assert!((norm - 1.0).abs() < 1e-9, "row norm {norm}");
    }
    assert!(x.iter().all(|&v| v >= 0.0));
}

#[test]
fn unseen_document_becomes_zero_row() {
    let mut v = TfidfVectorizer::new(unigrams());
    v.fit(&docs(&["known words only"])).unwrap();
    let x = v.transform(&docs(&["completely different"])).unwrap();
    assert!(x.iter().all(|&v| v == 0.0));
}

#[test]
fn transform_is_deterministic() {
    let corpus = docs(&["alpha beta gamma", "beta gamma delta", "gamma delta alpha"]);
    let mut a = TfidfVectorizer::new(TfidfParams::default());
    let mut b = TfidfVectorizer::new(TfidfParams::default());
    assert_eq!(a.fit_transform(&corpus).unwrap(), b.fit_transform(&corpus).unwrap());
}
