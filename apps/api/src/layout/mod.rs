// Report layout: page model, font metrics, word wrap, overflow policy, and the
// flow engine that positions every section of the visual report.
// Pure computation; callers on the async runtime move it to spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod overflow;
pub mod page;
pub mod wrap;

// Re-export the public API consumed by the renderer and the export facade.
pub use engine::{compute_layout, PageLayout};
