// hoaxeval: Compare text classifiers on a labeled hoax-news corpus
//
// This is the library root. Each module corresponds to a stage or a
// building block of the evaluation pipeline.

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod output;
pub mod pipeline;
