// Application layer: ports and use-case orchestration

pub mod analyze_use_case;
pub mod ports;
pub mod validate_use_case;

pub use analyze_use_case::AnalyzeUseCase;
pub use validate_use_case::ValidateUseCase;
