pub mod docx;
pub mod json;
pub mod layout;
pub mod pdf;

pub use docx::render_docx;
pub use json::{parse_record, render_json};
pub use pdf::{render_pdf, PdfOptions};
