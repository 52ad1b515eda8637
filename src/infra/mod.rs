// Infrastructure adapters implementing the application ports

pub mod analysis_adapter;
pub mod csv_source;

pub use analysis_adapter::HttpAnalysisAdapter;
pub use csv_source::CsvFileSource;
