// Text feature extraction: TF-IDF vectorization.

pub mod tfidf;

pub use tfidf::{StopWords, TfidfParams, TfidfVectorizer};
