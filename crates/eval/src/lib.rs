pub mod benchmark;
pub mod relevance;
pub mod variants;

pub use benchmark::{BenchmarkResults, EntityReport, PatternScore, QueryBenchmarker, QueryTestResult};
pub use relevance::{BRAND_PROFILE, BREEDER_PROFILE, KeywordProfile};
pub use variants::{EvalMode, QueryVariant};
