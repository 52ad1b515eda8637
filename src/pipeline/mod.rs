// Data processing pipeline: ingestion and validation/normalization

pub mod ingestion;
pub mod processing;

// Re-export the entry points most callers need
pub use processing::validate::validate;
