use std::sync::OnceLock;

use regex::Regex;

use crate::block::TextSpan;
use crate::error::{Error, Result};

/// Split a line of text into typed spans.
///
/// Passes run in a fixed order: bold, italic, code, image, link. Each pass
/// only re-splits spans that are still plain, so `**` is claimed before `_`
/// gets a look, and `![alt](url)` is claimed before `[text](url)`.
pub fn parse_inline(text: &str) -> Result<Vec<TextSpan>> {
    let spans = vec![TextSpan::Plain(text.to_string())];
    let spans = split_delimited(spans, "**", TextSpan::Bold)?;
    let spans = split_delimited(spans, "_", TextSpan::Italic)?;
    let spans = split_delimited(spans, "`", TextSpan::Code)?;
    let spans = split_matches(spans, image_regex(), |alt, target| TextSpan::Image {
        alt,
        target,
    });
    let spans = split_matches(spans, link_regex(), |text, target| TextSpan::Link {
        text,
        target,
    });
    Ok(spans)
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("Invalid image regex"))
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("Invalid link regex"))
}

fn push_plain(out: &mut Vec<TextSpan>, text: &str) {
    if !text.is_empty() {
        out.push(TextSpan::Plain(text.to_string()));
    }
}

/// One delimiter pass: peel `delim ... delim` pairs off the front of each
/// plain span until none remain.
fn split_delimited(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    make: fn(String) -> TextSpan,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = text.as_str();
        while let Some(open) = rest.find(delimiter) {
            let inner = &rest[open + delimiter.len()..];
            let close = inner
                .find(delimiter)
                .ok_or_else(|| Error::UnmatchedDelimiter {
                    delimiter,
                    text: text.clone(),
                })?;

            push_plain(&mut out, &rest[..open]);
            // The typed span may legitimately be empty (`****`).
            out.push(make(inner[..close].to_string()));
            rest = &inner[close + delimiter.len()..];
        }
        push_plain(&mut out, rest);
    }

    Ok(out)
}

/// Image and link pass: replace every `[label](target)` style match inside
/// plain spans with a typed span built by `make(label, target)`.
fn split_matches(
    spans: Vec<TextSpan>,
    pattern: &Regex,
    make: fn(String, String) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(label), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            push_plain(&mut out, &text[last..whole.start()]);
            out.push(make(label.as_str().to_string(), target.as_str().to_string()));
            last = whole.end();
        }
        push_plain(&mut out, &text[last..]);
    }

    out
}
