//! Presentation rendering for structured components.
//!
//! # Module structure
//! - `node` - Typed presentation nodes with escaping at the writer boundary
//! - `component` - Mapping from `UIComponent` to fragments
//! - `markdown` - The minimal markdown dialect (bold, line breaks)

mod component;
mod markdown;
mod node;

pub use component::render_component;
pub use markdown::{escape_html, markdown_to_html};
pub use node::HtmlNode;
