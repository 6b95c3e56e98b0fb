use log::debug;

use crate::block::BlockKind;
use crate::error::{Error, Result};
use crate::html::ElementNode;
use crate::inline::parse_inline;

const CODE_FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

type Rule = fn(&str) -> Option<BlockKind>;

/// Checked in order, first match wins. Anything left over is a paragraph.
const RULES: [Rule; 5] = [heading, code, quote, ordered_list, unordered_list];

/// Determine the structural kind of a single block.
pub fn classify(block: &str) -> BlockKind {
    RULES
        .iter()
        .find_map(|rule| rule(block))
        .unwrap_or(BlockKind::Paragraph)
}

/// Level and byte length of a `#`..`######` marker plus its whitespace.
fn heading_marker(line: &str) -> Option<(u8, usize)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let space = line[level..].chars().next().filter(|c| c.is_whitespace())?;
    Some((level as u8, level + space.len_utf8()))
}

fn first_line(block: &str) -> &str {
    block.split('\n').next().unwrap_or(block)
}

fn heading(block: &str) -> Option<BlockKind> {
    heading_marker(first_line(block)).map(|(level, _)| BlockKind::Heading(level))
}

fn code(block: &str) -> Option<BlockKind> {
    let lines: Vec<&str> = block.split('\n').collect();
    let fenced = lines.len() >= 2 && lines[0] == CODE_FENCE && lines[lines.len() - 1] == CODE_FENCE;
    fenced.then_some(BlockKind::Code)
}

fn quote(block: &str) -> Option<BlockKind> {
    block
        .split('\n')
        .all(|line| line.starts_with('>'))
        .then_some(BlockKind::Quote)
}

fn ordered_list(block: &str) -> Option<BlockKind> {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
        .then_some(BlockKind::OrderedList)
}

fn unordered_list(block: &str) -> Option<BlockKind> {
    block
        .split('\n')
        .all(|line| line.starts_with("- "))
        .then_some(BlockKind::UnorderedList)
}

fn spans_to_nodes(text: &str) -> Result<Vec<ElementNode>> {
    Ok(parse_inline(text)?.into_iter().map(ElementNode::from).collect())
}

/// Lines after the first are folded into the heading text with spaces, the
/// same as a paragraph, rather than dropped. `extract_title` still reads the
/// first line only.
fn heading_node(block: &str, level: u8) -> Result<ElementNode> {
    let start = heading_marker(first_line(block)).map_or(0, |(_, len)| len);
    let content = block[start..].replace('\n', " ");
    Ok(ElementNode::container(format!("h{level}"), spans_to_nodes(&content)?))
}

fn code_node(block: &str) -> ElementNode {
    let lines: Vec<&str> = block.split('\n').collect();
    let inner = lines.get(1..lines.len().saturating_sub(1)).unwrap_or_default();
    let mut content = inner.join("\n");
    content.push('\n');
    ElementNode::container("pre", vec![ElementNode::leaf("code", content)])
}

fn quote_node(block: &str) -> Result<ElementNode> {
    let content = block
        .split('\n')
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(ElementNode::container("blockquote", spans_to_nodes(&content)?))
}

fn list_node(block: &str, ordered: bool) -> Result<ElementNode> {
    let mut items = Vec::new();

    for (i, line) in block.split('\n').filter(|l| !l.trim().is_empty()).enumerate() {
        let line = line.trim();
        let marker = if ordered {
            format!("{}. ", i + 1)
        } else {
            "- ".to_string()
        };
        let content = line.strip_prefix(marker.as_str()).unwrap_or(line).trim();
        items.push(ElementNode::container("li", spans_to_nodes(content)?));
    }

    Ok(ElementNode::container(if ordered { "ol" } else { "ul" }, items))
}

fn paragraph_node(block: &str) -> Result<ElementNode> {
    let content = block.replace('\n', " ");
    Ok(ElementNode::container("p", spans_to_nodes(&content)?))
}

fn block_to_node(block: &str, kind: BlockKind) -> Result<ElementNode> {
    match kind {
        BlockKind::Heading(level) => heading_node(block, level),
        BlockKind::Code => Ok(code_node(block)),
        BlockKind::Quote => quote_node(block),
        BlockKind::UnorderedList => list_node(block, false),
        BlockKind::OrderedList => list_node(block, true),
        BlockKind::Paragraph => paragraph_node(block),
    }
}

/// Parse a whole document into a `div` holding one element per block.
pub fn build_tree(markdown: &str) -> Result<ElementNode> {
    let mut children = Vec::new();

    for block in split_blocks(markdown) {
        let kind = classify(&block);
        debug!("block classified as {kind:?}: {:?}", first_line(&block));
        children.push(block_to_node(&block, kind)?);
    }

    Ok(ElementNode::container("div", children))
}

/// Raw text of the level 1 heading that opens the document.
pub fn extract_title(markdown: &str) -> Result<String> {
    let line = first_line(markdown);
    match heading_marker(line) {
        Some((1, len)) => Ok(line[len..].trim_end().to_string()),
        _ => Err(Error::NotATitle {
            found: line.to_string(),
        }),
    }
}
