pub mod result;

pub use result::{AnalysisResult, ResultPayload};
