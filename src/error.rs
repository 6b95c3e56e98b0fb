use thiserror::Error;

/// Errors raised while converting markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An inline `**`, `_` or `` ` `` opened a span that never closes.
    #[error("unmatched `{delimiter}` delimiter in {text:?}")]
    UnmatchedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("leaf node <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingValue { tag: Option<String> },

    #[error("container node has no tag")]
    MissingTag,

    #[error("container node <{tag}> has no children")]
    MissingChildren { tag: String },

    /// The document does not open with a level 1 heading.
    #[error("title must be a level 1 heading, found {found:?}")]
    NotATitle { found: String },
}

pub type Result<T> = std::result::Result<T, Error>;
