mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
pub mod site;

pub use block::{BlockKind, TextSpan};
pub use config::{Config, ConfigError, PathsConfig, SiteConfig};
pub use error::{Error, Result};
pub use html::{Attributes, ElementNode, render};
pub use inline::parse_inline;
pub use parser::{build_tree, classify, extract_title, split_blocks};

/// Convert markdown text into an HTML fragment wrapped in a `div`.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    let tree = build_tree(markdown)?;
    render(&tree)
}
