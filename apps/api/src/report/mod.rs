// Report content shared by the text and visual outputs: tier policy, text
// formatting, and the compact preview card.

pub mod preview;
pub mod text;
pub mod tier;

pub use preview::{build_preview, CompactPreview};
pub use text::format_text_report;
