//! Rendering module for converting resume documents to output formats.

pub mod fragment;
mod html;
mod json;
mod markdown;
mod options;

pub use fragment::{Fragment, InlineStyle, Node, StyleRole};
pub use html::{to_html, HtmlRenderer};
pub use json::{from_json, to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
