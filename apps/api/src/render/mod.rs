// Visual report output: layout → drawing primitives → PDF bytes.

pub mod pdf;
pub mod renderer;

pub use pdf::encode_pdf;
pub use renderer::render;
