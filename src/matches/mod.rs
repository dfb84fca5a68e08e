//! Match processing pipeline

pub mod processor;

pub use processor::MatchProcessor;
