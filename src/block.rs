/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, target: String },
    Image { alt: String, target: String },
}

/// Structural kind of a blank-line delimited block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Level is always in `1..=6`.
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}
