//! # postdoc
//!
//! Renders a Postman collection as a single Markdown document. Folders
//! become headings, requests become blocks holding their URL, headers,
//! body, parameters, authorization and sample responses.
//!
//! ```
//! let json = r#"{
//!     "info": { "name": "API" },
//!     "item": [{ "name": "Get", "request": { "method": "GET", "url": { "raw": "http://x" } } }]
//! }"#;
//! let markdown = postdoc::convert_str(json).unwrap();
//! assert!(markdown.starts_with("# API\n"));
//! assert!(markdown.contains(">http://x\n"));
//! ```

pub mod error;
pub mod parser;
pub mod renderer;
pub mod sink;

pub use error::{Error, Result};
pub use parser::{load_collection, parse_collection, Collection, Node};
pub use renderer::{DocumentRenderer, Render, RenderContext};
pub use sink::{DocumentSink, FileSink, WriterSink};

#[cfg(test)]
mod tests;

/// Renders a collection to Markdown.
pub fn render(collection: &Collection) -> String {
    DocumentRenderer.render(collection)
}

/// Parses collection JSON and renders it.
pub fn convert_str(json: &str) -> Result<String> {
    Ok(render(&parse_collection(json)?))
}

/// Renders a collection and hands the text to `sink` exactly once.
pub fn export(collection: &Collection, sink: &mut dyn DocumentSink) -> Result<()> {
    sink.persist(&render(collection))
}
