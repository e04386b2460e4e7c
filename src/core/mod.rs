pub mod errors;
pub mod normalize;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    AlgorithmicComplexity, HalsteadMetrics, LineLengthMetrics, QualityGrade, QualityMetrics,
    RiskLevel, TrendDirection,
};
