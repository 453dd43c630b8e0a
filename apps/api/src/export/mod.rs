pub mod facade;
pub mod handlers;

pub use facade::{Artifact, ReportExporter};
