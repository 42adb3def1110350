//! Markup adapters: finding templates and writing translations into them.

mod html;
mod templates;

pub use html::HtmlDocument;
pub use templates::{TemplateScan, scan_templates};
