use crate::block::TextSpan;
use crate::error::{Error, Result};

/// Attributes in the order they were added.
pub type Attributes = Vec<(String, String)>;

/// A node in the HTML output tree.
///
/// Fields are optional so that a malformed tree can be represented and
/// rejected by [`render`]; the constructors always fill them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementNode {
    /// Literal value, optionally wrapped in a tag. No tag means bare text.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    Container {
        tag: Option<String>,
        children: Option<Vec<ElementNode>>,
        attributes: Attributes,
    },
}

impl ElementNode {
    /// Untagged leaf, rendered verbatim.
    pub fn text(value: impl Into<String>) -> Self {
        ElementNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        ElementNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn container(tag: impl Into<String>, children: Vec<ElementNode>) -> Self {
        ElementNode::Container {
            tag: Some(tag.into()),
            children: Some(children),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute; emitted after any attributes already present.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            ElementNode::Leaf { attributes, .. } | ElementNode::Container { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }
}

impl From<TextSpan> for ElementNode {
    fn from(span: TextSpan) -> Self {
        match span {
            TextSpan::Plain(text) => ElementNode::text(text),
            TextSpan::Bold(text) => ElementNode::leaf("b", text),
            TextSpan::Italic(text) => ElementNode::leaf("i", text),
            TextSpan::Code(text) => ElementNode::leaf("code", text),
            TextSpan::Link { text, target } => {
                ElementNode::leaf("a", text).with_attribute("href", target)
            }
            TextSpan::Image { alt, target } => ElementNode::leaf("img", "")
                .with_attribute("src", target)
                .with_attribute("alt", alt),
        }
    }
}

/// Serialize a node and everything below it to an HTML string.
pub fn render(node: &ElementNode) -> Result<String> {
    let mut out = String::new();
    write_node(node, &mut out)?;
    Ok(out)
}

fn write_node(node: &ElementNode, out: &mut String) -> Result<()> {
    match node {
        ElementNode::Leaf {
            tag,
            value,
            attributes,
        } => {
            let value = value.as_deref().ok_or_else(|| Error::MissingValue { tag: tag.clone() })?;
            match tag {
                Some(tag) => {
                    open_tag(tag, attributes, out);
                    out.push_str(value);
                    close_tag(tag, out);
                }
                None => out.push_str(value),
            }
        }
        ElementNode::Container {
            tag,
            children,
            attributes,
        } => {
            let tag = tag.as_deref().ok_or(Error::MissingTag)?;
            let children = children.as_ref().ok_or_else(|| Error::MissingChildren {
                tag: tag.to_string(),
            })?;
            open_tag(tag, attributes, out);
            for child in children {
                write_node(child, out)?;
            }
            close_tag(tag, out);
        }
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
