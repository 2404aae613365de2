pub mod common;
pub mod extractor;
