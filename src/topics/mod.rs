// Topic extraction — TF-IDF term weighting and LDA topics over the same vocabulary.

pub mod lda;
pub mod tfidf;
